//! Operations shared by the three self-registering roles.

use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, PgPool};

use crate::auth::{password::PasswordHasher, Role};
use crate::database::models::{Admin, Club, Player};
use crate::database::status::{PlayerState, ADMIN_ACTIVE, CLUB_ACTIVE};
use crate::database::{found, reason, StoreError};

/// A table of accounts that can log in.
pub trait Account: for<'r> FromRow<'r, PgRow> + Serialize + Send + Unpin {
    const ROLE: Role;
    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    const EMAIL_COLUMN: &'static str;
    const PASSWORD_COLUMN: &'static str;
    /// Rows that may log in and act.
    const ELIGIBLE: &'static str;
    const NOT_FOUND: &'static str;

    fn id(&self) -> i64;
    fn email(&self) -> &str;
    fn password_hash(&self) -> &str;
}

impl Account for Admin {
    const ROLE: Role = Role::Admin;
    const TABLE: &'static str = "admins";
    const ID_COLUMN: &'static str = "admin_id";
    const EMAIL_COLUMN: &'static str = "admin_email";
    const PASSWORD_COLUMN: &'static str = "admin_password";
    const ELIGIBLE: &'static str = ADMIN_ACTIVE;
    const NOT_FOUND: &'static str = reason::ADMIN_NOT_FOUND;

    fn id(&self) -> i64 {
        self.admin_id
    }
    fn email(&self) -> &str {
        &self.admin_email
    }
    fn password_hash(&self) -> &str {
        &self.admin_password
    }
}

impl Account for Club {
    const ROLE: Role = Role::Club;
    const TABLE: &'static str = "clubs";
    const ID_COLUMN: &'static str = "club_id";
    const EMAIL_COLUMN: &'static str = "club_email";
    const PASSWORD_COLUMN: &'static str = "club_password";
    const ELIGIBLE: &'static str = CLUB_ACTIVE;
    const NOT_FOUND: &'static str = reason::CLUB_NOT_FOUND;

    fn id(&self) -> i64 {
        self.club_id
    }
    fn email(&self) -> &str {
        &self.club_email
    }
    fn password_hash(&self) -> &str {
        &self.club_password
    }
}

impl Account for Player {
    const ROLE: Role = Role::Player;
    const TABLE: &'static str = "players";
    const ID_COLUMN: &'static str = "player_id";
    const EMAIL_COLUMN: &'static str = "player_email";
    const PASSWORD_COLUMN: &'static str = "player_password";
    const ELIGIBLE: &'static str = PlayerState::Active.predicate();
    const NOT_FOUND: &'static str = reason::PLAYER_NOT_FOUND;

    fn id(&self) -> i64 {
        self.player_id
    }
    fn email(&self) -> &str {
        &self.player_email
    }
    fn password_hash(&self) -> &str {
        &self.player_password
    }
}

/// The acting account, which must be eligible before anything it targets is looked at.
pub async fn find_eligible<A: Account>(pool: &PgPool, id: i64) -> Result<A, StoreError> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = $1 AND {}",
        A::TABLE,
        A::ID_COLUMN,
        A::ELIGIBLE
    );
    let row = sqlx::query_as::<_, A>(&sql).bind(id).fetch_optional(pool).await?;
    found(row, A::NOT_FOUND)
}

/// Whether a non-deleted row already uses this email (case-insensitive).
pub async fn email_taken<A: Account>(pool: &PgPool, email: &str) -> Result<bool, StoreError> {
    let sql = format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE lower({}) = lower($1) AND NOT delete_status)",
        A::TABLE,
        A::EMAIL_COLUMN
    );
    let (taken,): (bool,) = sqlx::query_as(&sql).bind(email).fetch_one(pool).await?;
    Ok(taken)
}

/// Fails with `DuplicateEmail` when the email is in use.
pub async fn ensure_email_free<A: Account>(pool: &PgPool, email: &str) -> Result<(), StoreError> {
    if email_taken::<A>(pool, email).await? {
        tracing::warn!(role = A::ROLE.as_str(), "registration with an email already in use");
        return Err(StoreError::DuplicateEmail);
    }
    Ok(())
}

/// Email + password check against eligible rows only.
pub async fn authenticate<A: Account>(
    pool: &PgPool,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<A, StoreError> {
    let sql = format!(
        "SELECT * FROM {} WHERE lower({}) = lower($1) AND {} LIMIT 1",
        A::TABLE,
        A::EMAIL_COLUMN,
        A::ELIGIBLE
    );
    let account = sqlx::query_as::<_, A>(&sql).bind(email).fetch_optional(pool).await?;

    let Some(account) = account else {
        tracing::info!(role = A::ROLE.as_str(), "login for unknown or ineligible account");
        return Err(StoreError::Rejected(A::NOT_FOUND));
    };

    if !hasher.verify(password, account.password_hash()).await? {
        tracing::info!(role = A::ROLE.as_str(), id = account.id(), "login with wrong password");
        return Err(StoreError::Rejected(reason::WRONG_PASSWORD));
    }

    Ok(account)
}

pub async fn change_password<A: Account>(
    pool: &PgPool,
    hasher: &PasswordHasher,
    id: i64,
    old_password: &str,
    new_password: &str,
) -> Result<(), StoreError> {
    let account = find_eligible::<A>(pool, id).await?;

    if !hasher.verify(old_password, account.password_hash()).await? {
        return Err(StoreError::Rejected(reason::INCORRECT_OLD_PASSWORD));
    }

    let hashed = hasher.hash(new_password).await?;
    let sql = format!(
        "UPDATE {} SET {} = $2, updated_date = now() WHERE {} = $1 AND {}",
        A::TABLE,
        A::PASSWORD_COLUMN,
        A::ID_COLUMN,
        A::ELIGIBLE
    );
    let result = sqlx::query(&sql).bind(id).bind(hashed).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::Rejected(A::NOT_FOUND));
    }

    tracing::info!(role = A::ROLE.as_str(), id, "password changed");
    Ok(())
}
