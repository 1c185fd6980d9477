use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub admin_id: i64,
    pub admin_name: String,
    pub admin_email: String,
    #[serde(skip_serializing)]
    pub admin_password: String,
    pub admin_image: String,
    pub admin_mobile: String,
    pub admin_address: String,
    pub registered_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub delete_status: bool,
}

/// Fields accepted by admin self-registration, already validated.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub image: String,
    pub mobile: String,
    pub address: String,
}
