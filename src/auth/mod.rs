pub mod password;

use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Every minted token lives exactly this long; there is no refresh.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// The three independently authenticating actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Club,
    Player,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Club => "club",
            Role::Player => "player",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Club => write!(f, "Club"),
            Role::Player => write!(f, "Player"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "subjectId")]
    pub subject_id: i64,
    #[serde(rename = "subjectEmail")]
    pub subject_email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(role: Role, subject_id: i64, subject_email: impl Into<String>) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp();

        Self {
            subject_id,
            subject_email: subject_email.into(),
            role,
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token is missing")]
    TokenMissing,
    #[error("{0} ID is missing")]
    IdentifierMissing(Role),
    #[error("Invalid token")]
    TokenInvalid,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Unauthorized access")]
    IdentityMismatch,
    #[error("token signing failed: {0}")]
    Signing(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Signs and verifies tokens for a single role.
#[derive(Clone)]
pub struct Authenticator {
    role: Role,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Authenticator {
    pub fn new(role: Role, secret: &str) -> Self {
        Self {
            role,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn issue(&self, subject_id: i64, subject_email: &str) -> Result<String, AuthError> {
        self.sign(&Claims::new(self.role, subject_id, subject_email))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Checks, in order: token present, id present, signature and expiry,
    /// and that the token's subject is the id the caller claims to be.
    pub fn verify(&self, token: Option<&str>, claimed_id: Option<i64>) -> Result<Claims, AuthError> {
        let token = token.filter(|t| !t.trim().is_empty()).ok_or(AuthError::TokenMissing)?;
        let claimed_id = claimed_id.ok_or(AuthError::IdentifierMissing(self.role))?;

        let claims = self.decode(token)?;

        if claims.subject_id != claimed_id || claims.role != self.role {
            tracing::warn!(
                role = self.role.as_str(),
                subject = claims.subject_id,
                claimed = claimed_id,
                "token subject does not match claimed id"
            );
            return Err(AuthError::IdentityMismatch);
        }

        Ok(claims)
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token.trim(), &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }
}

/// One authenticator per role, each keyed by its own secret.
#[derive(Clone)]
pub struct Authenticators {
    pub admin: Authenticator,
    pub club: Authenticator,
    pub player: Authenticator,
}

impl Authenticators {
    pub fn from_config(security: &SecurityConfig) -> Self {
        Self {
            admin: Authenticator::new(Role::Admin, &security.admin_jwt_secret),
            club: Authenticator::new(Role::Club, &security.club_jwt_secret),
            player: Authenticator::new(Role::Player, &security.player_jwt_secret),
        }
    }

    pub fn for_role(&self, role: Role) -> &Authenticator {
        match role {
            Role::Admin => &self.admin,
            Role::Club => &self.club,
            Role::Player => &self.player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticators() -> Authenticators {
        Authenticators {
            admin: Authenticator::new(Role::Admin, "admin-secret"),
            club: Authenticator::new(Role::Club, "club-secret"),
            player: Authenticator::new(Role::Player, "player-secret"),
        }
    }

    #[test]
    fn issued_token_verifies_for_its_subject() {
        let auth = authenticators();
        let token = auth.admin.issue(7, "a@x.com").unwrap();

        let claims = auth.admin.verify(Some(&token), Some(7)).unwrap();
        assert_eq!(claims.subject_id, 7);
        assert_eq!(claims.subject_email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn missing_token_is_reported_before_missing_id() {
        let auth = authenticators();
        assert_eq!(auth.club.verify(None, None).unwrap_err(), AuthError::TokenMissing);
        assert_eq!(auth.club.verify(Some("  "), Some(1)).unwrap_err(), AuthError::TokenMissing);
    }

    #[test]
    fn missing_id_names_the_role() {
        let auth = authenticators();
        let token = auth.player.issue(3, "p@x.com").unwrap();
        let err = auth.player.verify(Some(&token), None).unwrap_err();
        assert_eq!(err, AuthError::IdentifierMissing(Role::Player));
        assert_eq!(err.to_string(), "Player ID is missing");
    }

    #[test]
    fn token_from_another_role_is_invalid() {
        let auth = authenticators();
        let club_token = auth.club.issue(1, "c@x.com").unwrap();

        assert_eq!(auth.admin.verify(Some(&club_token), Some(1)).unwrap_err(), AuthError::TokenInvalid);
        assert_eq!(auth.player.verify(Some(&club_token), Some(1)).unwrap_err(), AuthError::TokenInvalid);
    }

    #[test]
    fn subject_must_match_claimed_id() {
        let auth = authenticators();
        let token = auth.club.issue(1, "c@x.com").unwrap();
        assert_eq!(auth.club.verify(Some(&token), Some(2)).unwrap_err(), AuthError::IdentityMismatch);
    }

    #[test]
    fn expired_token_is_distinguished() {
        let auth = authenticators();
        let mut claims = Claims::new(Role::Admin, 5, "a@x.com");
        claims.iat -= 3 * 3600;
        claims.exp -= 3 * 3600;
        let token = auth.admin.sign(&claims).unwrap();

        assert_eq!(auth.admin.verify(Some(&token), Some(5)).unwrap_err(), AuthError::TokenExpired);
    }

    #[test]
    fn garbage_token_is_invalid() {
        let auth = authenticators();
        assert_eq!(auth.admin.verify(Some("not.a.jwt"), Some(1)).unwrap_err(), AuthError::TokenInvalid);
    }
}
