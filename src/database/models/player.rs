use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A registered player.
///
/// `club_name` and `manager_name` are copied from the club when the player
/// registers and are not refreshed when the club later renames itself.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: i64,
    pub club_id: i64,
    pub club_name: String,
    pub manager_name: String,
    pub player_name: String,
    pub player_email: String,
    #[serde(skip_serializing)]
    pub player_password: String,
    pub player_image: String,
    pub player_mobile: String,
    pub player_age: i32,
    pub player_position: String,
    pub player_country: String,
    pub player_address: String,
    pub registered_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub is_approved: bool,
    pub is_suspended: bool,
    pub is_injured: bool,
    pub delete_status: bool,
}

#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub club_id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
    pub mobile: String,
    pub age: i32,
    pub position: String,
    pub country: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct PlayerProfileUpdate {
    pub name: String,
    pub mobile: String,
    pub address: String,
    pub age: i32,
    pub position: String,
    pub country: String,
}
