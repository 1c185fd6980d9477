use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub match_id: i64,
    pub admin_id: i64,
    pub match_name: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_team_image: String,
    pub away_team_image: String,
    pub match_location: String,
    pub match_prize: String,
    pub match_date: String,
    pub added_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub end_status: bool,
}

#[derive(Debug, Clone)]
pub struct NewMatch {
    pub name: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_team_image: String,
    pub away_team_image: String,
    pub location: String,
    pub prize: String,
    pub date: String,
}

/// Score line recorded against a match. Team names and images are copied
/// from the match when the row is written.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MatchPoint {
    pub point_id: i64,
    pub admin_id: i64,
    pub match_id: i64,
    pub match_name: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_team_image: String,
    pub away_team_image: String,
    pub team_one_total_goals_in_match: i32,
    pub team_two_total_goals_in_match: i32,
    pub added_date: DateTime<Utc>,
}
