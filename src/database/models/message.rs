use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Club to player message. Read-only once written.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNotification {
    pub notification_id: i64,
    pub club_id: i64,
    pub player_id: i64,
    pub message: String,
    pub is_success: bool,
    pub added_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub leave_request_id: i64,
    pub club_id: i64,
    pub player_id: i64,
    pub player_name: String,
    pub message: String,
    pub is_success: bool,
    pub is_approved: bool,
    pub added_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}
