use axum::extract::State;
use serde::Deserialize;

use super::acting_player;
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
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub match_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub football_news_id: Option<i64>,
}

/// POST /api/player/viewAllMatches
pub async fn view_all_matches(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Vec<Match>> {
    acting_player(&state, &token, body.player_id).await?;
    let matches = feed::list_matches(&state.db, Owner::Anyone, MatchState::Live).await?;
    Ok(ApiResponse::success("All Player Matches retrieved successfully", matches))
}

/// POST /api/player/viewOneMatch
pub async fn view_one_match(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Match> {
    acting_player(&state, &token, body.player_id).await?;
    let match_id = required_id(body.match_id, "Match")?;

    let found = feed::find_match(&state.db, Owner::Anyone, match_id, MatchState::Live)
        .await
        .context("Match not available")?;
    Ok(ApiResponse::success("Player Match details", found))
}

/// POST /api/player/viewAllMatchPoints
pub async fn view_all_match_points(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Vec<MatchPoint>> {
    acting_player(&state, &token, body.player_id).await?;
    let points = feed::list_points(&state.db, Owner::Anyone).await?;
    Ok(ApiResponse::success("All Player Match Points retrieved successfully", points))
}

/// POST /api/player/viewAllNews
pub async fn view_all_news(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<Vec<FootballNews>> {
    acting_player(&state, &token, body.player_id).await?;
    let news = feed::list_news(&state.db, Owner::Anyone).await?;
    Ok(ApiResponse::success("All player news retrieved successfully", news))
}

/// POST /api/player/viewOneNews
pub async fn view_one_news(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<FeedRequest>,
) -> ApiResult<FootballNews> {
    acting_player(&state, &token, body.player_id).await?;
    let news_id = required_id(body.football_news_id, "Football News")?;

    let news = feed::find_news(&state.db, Owner::Anyone, news_id)
        .await
        .context("Football news not available")?;
    Ok(ApiResponse::success("Football news retrieved successfully", news))
}
