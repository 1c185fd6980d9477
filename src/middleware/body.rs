use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

use crate::auth::AuthError;
use crate::error::ApiError;

/// Name of the header carrying the bearer token.
pub const TOKEN_HEADER: &str = "token";

/// JSON body whose rejections are reported in the API envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// The `token` header of a protected call.
///
/// Listed ahead of the body extractor so a tokenless request is refused
/// with 403 before its body is parsed.
#[derive(Debug, Clone)]
pub struct AuthToken(pub String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        token_from_headers(&parts.headers)
            .map(|token| AuthToken(token.to_string()))
            .ok_or_else(|| AuthError::TokenMissing.into())
    }
}

/// Deserializers for clients that send numbers as strings and vice versa.
pub mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// Identifier as a number or numeric string; blank or null is absent.
    pub fn id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Int(v)) => Ok(Some(v)),
            Some(Raw::Float(v)) => Err(D::Error::custom(format!("identifier must be an integer, got {}", v))),
            Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
            Some(Raw::Text(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid identifier `{}`", s))),
        }
    }

    /// Free-form value kept as text so validators can report on it.
    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
            Raw::Int(v) => v.to_string(),
            Raw::Float(v) => v.to_string(),
            Raw::Text(s) => s,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Body {
        #[serde(default, deserialize_with = "lenient::id")]
        admin_id: Option<i64>,
        #[serde(default, deserialize_with = "lenient::text")]
        player_age: Option<String>,
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let a: Body = serde_json::from_str(r#"{"adminId": 4, "playerAge": 21}"#).unwrap();
        let b: Body = serde_json::from_str(r#"{"adminId": "4", "playerAge": "21"}"#).unwrap();
        let c: Body = serde_json::from_str(r#"{}"#).unwrap();

        assert_eq!(a.admin_id, Some(4));
        assert_eq!(b.admin_id, Some(4));
        assert_eq!(a.player_age.as_deref(), Some("21"));
        assert_eq!(b.player_age.as_deref(), Some("21"));
        assert_eq!(c.admin_id, None);
    }

    #[test]
    fn non_numeric_id_is_rejected() {
        assert!(serde_json::from_str::<Body>(r#"{"adminId": "four"}"#).is_err());
    }

    #[test]
    fn token_header_is_trimmed() {
        let mut headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        headers.insert(TOKEN_HEADER, HeaderValue::from_static(" abc "));
        assert_eq!(token_from_headers(&headers), Some("abc"));
    }

    #[tokio::test]
    async fn auth_token_requires_the_header() {
        let (mut parts, _) = axum::http::Request::post("/").body(()).unwrap().into_parts();
        let err = AuthToken::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.message(), "Token is missing");

        let (mut parts, _) = axum::http::Request::post("/")
            .header(TOKEN_HEADER, "abc")
            .body(())
            .unwrap()
            .into_parts();
        let token = AuthToken::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(token.as_str(), "abc");
    }
}
