pub mod accounts;
pub mod admins;
pub mod clubs;
pub mod feed;
pub mod injuries;
pub mod manager;
pub mod messages;
pub mod models;
pub mod players;
pub mod status;

pub use manager::DatabaseManager;

use thiserror::Error;

use crate::auth::AuthError;

/// Canonical reasons reported in the `error` field of a 422.
pub mod reason {
    pub const ADMIN_NOT_FOUND: &str = "Admin not found";
    pub const CLUB_NOT_FOUND: &str = "Club not found";
    pub const PLAYER_NOT_FOUND: &str = "Player not found";
    pub const WRONG_PASSWORD: &str = "Wrong password";
    pub const INCORRECT_OLD_PASSWORD: &str = "Incorrect old password";
    pub const MATCH_NOT_FOUND: &str = "Match not found";
    pub const MATCH_NOT_FOUND_OR_ENDED: &str = "Match not found or already ended";
    pub const NEWS_NOT_FOUND: &str = "Football news not found";
    pub const NOTIFICATION_NOT_FOUND: &str = "Notification not found";
    pub const LEAVE_NOT_FOUND: &str = "Leave request not found";
    pub const LEAVE_NOT_ELIGIBLE: &str = "Leave request not found or not eligible for approval";
    pub const PLAYER_ALREADY_APPROVED: &str = "Player not found or already approved";
    pub const PLAYER_ALREADY_SUSPENDED: &str = "Player not found or already suspended";
    pub const PLAYER_NOT_SUSPENDED: &str = "Player not found or not suspended";
    pub const PLAYER_ALREADY_DELETED: &str = "Player not found or already deleted";
}

/// Errors from the entity store
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule refused the operation; the reason is client-facing.
    #[error("{0}")]
    Rejected(&'static str),

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Password error: {0}")]
    Password(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    /// Maps a unique-index violation on insert/update to `DuplicateEmail`.
    pub fn from_write(err: sqlx::Error) -> Self {
        let unique_violation = err
            .as_database_error()
            .and_then(|db| db.code())
            .map_or(false, |code| code == "23505");

        if unique_violation {
            StoreError::DuplicateEmail
        } else {
            StoreError::Sqlx(err)
        }
    }
}

impl From<AuthError> for StoreError {
    fn from(err: AuthError) -> Self {
        StoreError::Password(err.to_string())
    }
}

/// `Ok(row)` or the given rejection when the lookup came back empty.
pub(crate) fn found<T>(row: Option<T>, missing: &'static str) -> Result<T, StoreError> {
    row.ok_or(StoreError::Rejected(missing))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_duplicates() {
        assert!(matches!(StoreError::from_write(sqlx::Error::RowNotFound), StoreError::Sqlx(_)));
    }

    #[test]
    fn found_maps_absence_to_reason() {
        assert_eq!(found(Some(3), reason::CLUB_NOT_FOUND).unwrap(), 3);
        match found::<i32>(None, reason::CLUB_NOT_FOUND) {
            Err(StoreError::Rejected(r)) => assert_eq!(r, "Club not found"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
