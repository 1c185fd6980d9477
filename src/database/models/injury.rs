use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Injury {
    pub injury_id: i64,
    pub player_id: i64,
    pub club_id: i64,
    pub player_name: String,
    pub player_image: String,
    pub club_name: String,
    pub injury_type: String,
    pub average_recovery_time: String,
    pub added_date: DateTime<Utc>,
}
