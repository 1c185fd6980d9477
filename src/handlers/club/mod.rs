// handlers/club - /api/club/* route table

pub mod account;
pub mod feed;
pub mod messages;
pub mod players;

use axum::{routing::post, Router};

use crate::database::accounts;
use crate::database::models::Club;
use crate::error::ApiError;
use crate::handlers::Context;
use crate::middleware::AuthToken;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/registration", post(account::registration))
        .route("/login", post(account::login))
        .route("/changePassword", post(account::change_password))
        .route("/viewProfile", post(account::view_profile))
        .route("/updateProfile", post(account::update_profile))
        .route("/viewAllClubs", post(account::view_all_clubs))
        .route("/viewAllUnapprovedPlayers", post(players::view_all_unapproved_players))
        .route("/viewOneUnapprovedPlayer", post(players::view_one_unapproved_player))
        .route("/approveOnePlayer", post(players::approve_one_player))
        .route("/viewAllPlayers", post(players::view_all_players))
        .route("/viewOnePlayer", post(players::view_one_player))
        .route("/deleteOnePlayer", post(players::delete_one_player))
        .route("/searchPlayers", post(players::search_players))
        .route("/suspendOnePlayer", post(players::suspend_one_player))
        .route("/unSuspendOnePlayer", post(players::un_suspend_one_player))
        .route("/viewAllSuspendedPlayers", post(players::view_all_suspended_players))
        .route("/viewOneSuspendedPlayer", post(players::view_one_suspended_player))
        .route("/addOneInjuryUpdate", post(players::add_one_injury_update))
        .route("/sendNotificationToPlayer", post(messages::send_notification_to_player))
        .route("/viewAllLeaveRequests", post(messages::view_all_leave_requests))
        .route("/viewOneLeaveRequest", post(messages::view_one_leave_request))
        .route("/approveOneLeaveRequest", post(messages::approve_one_leave_request))
        .route("/viewAllMatches", post(feed::view_all_matches))
        .route("/viewOneMatch", post(feed::view_one_match))
        .route("/viewAllMatchPoints", post(feed::view_all_match_points))
        .route("/viewAllNews", post(feed::view_all_news))
        .route("/viewOneNews", post(feed::view_one_news))
}

/// Verifies the club token against `club_id` and loads the active club.
///
/// A suspended or deleted club is refused here, before any player it
/// targets is looked at.
pub(crate) async fn acting_club(state: &AppState, token: &AuthToken, club_id: Option<i64>) -> Result<Club, ApiError> {
    let claims = state.auth.club.verify(Some(token.as_str()), club_id)?;
    accounts::find_eligible::<Club>(&state.db, claims.subject_id)
        .await
        .context("Access denied")
}
