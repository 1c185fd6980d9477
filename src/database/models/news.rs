use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FootballNews {
    pub football_news_id: i64,
    pub admin_id: i64,
    pub football_news_title: String,
    pub football_news_content: String,
    pub football_news_image: String,
    pub added_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}
