use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub club_id: i64,
    pub club_name: String,
    pub club_email: String,
    #[serde(skip_serializing)]
    pub club_password: String,
    pub club_image: String,
    pub club_address: String,
    pub manager_name: String,
    pub manager_email: String,
    pub manager_mobile: String,
    pub manager_image: String,
    pub registered_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub is_suspended: bool,
    pub delete_status: bool,
}

/// What other actors see of a club in listings.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    pub club_id: i64,
    pub club_name: String,
    pub club_image: String,
    pub club_address: String,
    pub manager_name: String,
    pub manager_image: String,
    pub registered_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewClub {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
    pub address: String,
    pub manager_name: String,
    pub manager_email: String,
    pub manager_mobile: String,
    pub manager_image: String,
}
