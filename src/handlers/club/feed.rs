// Read-only view of what admins publish: live matches, scores and news.

use axum::extract::State;
use serde::Deserialize;

use super::acting_club;
use crate::database::feed::{self, Owner};
use crate::database::models::{FootballNews, Match, MatchPoint};
use crate::database::status::MatchState;
use crate::handlers::{required_id, Context};
use crate::middleware::{lenient, ApiResponse, ApiResult, AuthToken, JsonBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub match_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub football_news_id: Option<i64>,
}

/// POST /api/club/viewAllMatches
pub async fn view_all_matches(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Vec<Match>> {
    acting_club(&state, &token, body.club_id).await?;
    let matches = feed::list_matches(&state.db, Owner::Anyone, MatchState::Live).await?;
    Ok(ApiResponse::success("All Club Matches retrieved successfully", matches))
}

/// POST /api/club/viewOneMatch
pub async fn view_one_match(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Match> {
    acting_club(&state, &token, body.club_id).await?;
    let match_id = required_id(body.match_id, "Match")?;

    let found = feed::find_match(&state.db, Owner::Anyone, match_id, MatchState::Live)
        .await
        .context("Match not available")?;
    Ok(ApiResponse::success("Club Match details", found))
}

/// POST /api/club/viewAllMatchPoints
pub async fn view_all_match_points(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Vec<MatchPoint>> {
    acting_club(&state, &token, body.club_id).await?;
    let points = feed::list_points(&state.db, Owner::Anyone).await?;
    Ok(ApiResponse::success("All Club Match Points retrieved successfully", points))
}

/// POST /api/club/viewAllNews
pub async fn view_all_news(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Vec<FootballNews>> {
    acting_club(&state, &token, body.club_id).await?;
    let news = feed::list_news(&state.db, Owner::Anyone).await?;
    Ok(ApiResponse::success("All club news retrieved successfully", news))
}

/// POST /api/club/viewOneNews
pub async fn view_one_news(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<FootballNews> {
    acting_club(&state, &token, body.club_id).await?;
    let news_id = required_id(body.football_news_id, "Football News")?;

    let news = feed::find_news(&state.db, Owner::Anyone, news_id)
        .await
        .context("Football news not available")?;
    Ok(ApiResponse::success("Football news retrieved successfully", news))
}
