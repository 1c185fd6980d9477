use axum::extract::State;
use serde::Deserialize;

use super::acting_club;
use crate::database::models::{Injury, Player};
use crate::database::status::{
    PlayerState, Transition, APPROVE_PLAYER, DELETE_PLAYER, SUSPEND_PLAYER, UNSUSPEND_PLAYER,
};
use crate::database::{injuries, players};
use crate::error::ApiError;
use crate::handlers::{required_id, Context};
use crate::middleware::{lenient, ApiResponse, ApiResult, AuthToken, JsonBody};
use crate::state::AppState;
use crate::validation::{self, ValidationReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub search_query: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InjuryRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub injury_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub average_recovery_time: Option<String>,
}

async fn list(
    state: &AppState,
    token: &AuthToken,
    body: &PlayerRequest,
    player_state: PlayerState,
) -> Result<Vec<Player>, ApiError> {
    let club = acting_club(state, token, body.club_id).await?;
    Ok(players::list_for_club(&state.db, club.club_id, player_state).await?)
}

async fn one(
    state: &AppState,
    token: &AuthToken,
    body: &PlayerRequest,
    player_state: PlayerState,
) -> Result<Player, ApiError> {
    let club = acting_club(state, token, body.club_id).await?;
    let player_id = required_id(body.player_id, "Player")?;
    players::find_for_club(&state.db, club.club_id, player_id, player_state)
        .await
        .context("Player not available")
}

async fn transition(
    state: &AppState,
    token: &AuthToken,
    body: &PlayerRequest,
    change: Transition,
    failure: &'static str,
) -> Result<Player, ApiError> {
    let club = acting_club(state, token, body.club_id).await?;
    let player_id = required_id(body.player_id, "Player")?;
    players::transition(&state.db, club.club_id, player_id, change)
        .await
        .context(failure)
}

/// POST /api/club/viewAllUnapprovedPlayers
pub async fn view_all_unapproved_players(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Vec<Player>> {
    let found = list(&state, &token, &body, PlayerState::Pending).await?;
    Ok(ApiResponse::success("All unapproved players retrieved successfully", found))
}

/// POST /api/club/viewOneUnapprovedPlayer
pub async fn view_one_unapproved_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let found = one(&state, &token, &body, PlayerState::Pending).await?;
    Ok(ApiResponse::success("Unapproved player details retrieved successfully", found))
}

/// POST /api/club/approveOnePlayer - pending to active; a second call is refused
pub async fn approve_one_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let approved = transition(&state, &token, &body, APPROVE_PLAYER, "Player approval failed").await?;
    Ok(ApiResponse::success("Player approved successfully", approved))
}

/// POST /api/club/viewAllPlayers - approved, active players
pub async fn view_all_players(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Vec<Player>> {
    let found = list(&state, &token, &body, PlayerState::Active).await?;
    Ok(ApiResponse::success("All players retrieved successfully", found))
}

/// POST /api/club/viewOnePlayer
pub async fn view_one_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let found = one(&state, &token, &body, PlayerState::Active).await?;
    Ok(ApiResponse::success("Player retrieved successfully", found))
}

/// POST /api/club/deleteOnePlayer - soft delete
pub async fn delete_one_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let deleted = transition(&state, &token, &body, DELETE_PLAYER, "Player deletion failed").await?;
    Ok(ApiResponse::success("Player deleted successfully", deleted))
}

/// POST /api/club/searchPlayers - substring match over the club's active players
pub async fn search_players(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<SearchRequest>,
) -> ApiResult<Vec<Player>> {
    let club = acting_club(&state, &token, body.club_id).await?;

    let query = body.search_query.as_deref().map(str::trim).unwrap_or_default();
    ValidationReport::new()
        .check(
            "searchQuery",
            validation::present(Some(query).filter(|q| !q.is_empty()), "Search query is required"),
        )
        .finish()?;

    let found = players::search(&state.db, club.club_id, query).await?;
    Ok(ApiResponse::success("Players found successfully", found))
}

/// POST /api/club/suspendOnePlayer
pub async fn suspend_one_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let suspended = transition(&state, &token, &body, SUSPEND_PLAYER, "Player suspension failed").await?;
    Ok(ApiResponse::success("Player suspended successfully", suspended))
}

/// POST /api/club/unSuspendOnePlayer
pub async fn un_suspend_one_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let restored = transition(&state, &token, &body, UNSUSPEND_PLAYER, "Player unsuspension failed").await?;
    Ok(ApiResponse::success("Player unsuspended successfully", restored))
}

/// POST /api/club/viewAllSuspendedPlayers
pub async fn view_all_suspended_players(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Vec<Player>> {
    let found = list(&state, &token, &body, PlayerState::Suspended).await?;
    Ok(ApiResponse::success("All Suspended Players retrieved successfully", found))
}

/// POST /api/club/viewOneSuspendedPlayer
pub async fn view_one_suspended_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let found = one(&state, &token, &body, PlayerState::Suspended).await?;
    Ok(ApiResponse::success("Suspended Player details", found))
}

/// POST /api/club/addOneInjuryUpdate - records the injury and flags the player
pub async fn add_one_injury_update(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<InjuryRequest>,
) -> ApiResult<Injury> {
    let club = acting_club(&state, &token, body.club_id).await?;
    let player_id = required_id(body.player_id, "Player")?;

    ValidationReport::new()
        .check("injuryType", validation::text(body.injury_type.as_deref()))
        .check("averageRecoveryTime", validation::text(body.average_recovery_time.as_deref()))
        .finish()?;

    let injury = injuries::record(
        &state.db,
        &club,
        player_id,
        body.injury_type.as_deref().unwrap_or_default().trim(),
        body.average_recovery_time.as_deref().unwrap_or_default().trim(),
    )
    .await
    .context("Injury update failed")?;
    Ok(ApiResponse::success("Injury details submitted successfully", injury))
}
