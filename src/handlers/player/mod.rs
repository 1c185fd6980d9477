// handlers/player - /api/player/* route table

pub mod account;
pub mod feed;
pub mod messages;

use axum::{routing::post, Router};

use crate::database::accounts;
use crate::database::models::Player;
use crate::error::ApiError;
use crate::handlers::Context;
use crate::middleware::AuthToken;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/viewAllClubs", post(account::view_all_clubs))
        .route("/registration", post(account::registration))
        .route("/login", post(account::login))
        .route("/changePassword", post(account::change_password))
        .route("/viewProfile", post(account::view_profile))
        .route("/updateProfile", post(account::update_profile))
        .route("/viewAllNotifications", post(messages::view_all_notifications))
        .route("/viewOneNotification", post(messages::view_one_notification))
        .route("/sendLeaveRequestToClub", post(messages::send_leave_request_to_club))
        .route("/viewAllApprovedLeaveRequests", post(messages::view_all_approved_leave_requests))
        .route("/viewAllMatches", post(feed::view_all_matches))
        .route("/viewOneMatch", post(feed::view_one_match))
        .route("/viewAllMatchPoints", post(feed::view_all_match_points))
        .route("/viewAllNews", post(feed::view_all_news))
        .route("/viewOneNews", post(feed::view_one_news))
}

/// Verifies the player token against `player_id` and loads the approved, active player.
pub(crate) async fn acting_player(
    state: &AppState,
    token: &AuthToken,
    player_id: Option<i64>,
) -> Result<Player, ApiError> {
    let claims = state.auth.player.verify(Some(token.as_str()), player_id)?;
    accounts::find_eligible::<Player>(&state.db, claims.subject_id)
        .await
        .context("Access denied")
}
