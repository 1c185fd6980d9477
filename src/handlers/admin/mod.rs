// handlers/admin - /api/admin/* route table

pub mod account;
pub mod matches;
pub mod news;

use axum::{routing::post, Router};

use crate::database::accounts;
use crate::database::models::Admin;
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
        .route("/addNews", post(news::add_news))
        .route("/viewAllNews", post(news::view_all_news))
        .route("/viewOneNews", post(news::view_one_news))
        .route("/deleteOneNews", post(news::delete_one_news))
        .route("/addMatch", post(matches::add_match))
        .route("/viewAllMatches", post(matches::view_all_matches))
        .route("/viewOneMatch", post(matches::view_one_match))
        .route("/endOneMatch", post(matches::end_one_match))
        .route("/viewAllEndedMatches", post(matches::view_all_ended_matches))
        .route("/viewOneEndedMatch", post(matches::view_one_ended_match))
        .route("/deleteOneMatch", post(matches::delete_one_match))
        .route("/addMatchPoint", post(matches::add_match_point))
        .route("/viewAllMatchPoints", post(matches::view_all_match_points))
}

/// Verifies the admin token against `admin_id` and loads the active admin.
pub(crate) async fn acting_admin(
    state: &AppState,
    token: &AuthToken,
    admin_id: Option<i64>,
) -> Result<Admin, ApiError> {
    let claims = state.auth.admin.verify(Some(token.as_str()), admin_id)?;
    accounts::find_eligible::<Admin>(&state.db, claims.subject_id)
        .await
        .context("Access denied")
}
