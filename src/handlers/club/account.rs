use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use super::acting_club;
use crate::auth::Role;
use crate::database::models::club::NewClub;
use crate::database::models::{Club, ClubSummary};
use crate::database::{accounts, clubs};
use crate::error::ApiError;
use crate::handlers::account::{self as shared, LoginFields};
use crate::handlers::Context;
use crate::middleware::{lenient, ApiResponse, ApiResult, AuthToken, FormData, JsonBody};
use crate::services::{MediaKind, UploadBatch};
use crate::state::AppState;
use crate::validation::{self, normalize_mobile, ValidationReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub club_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub club_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub old_password: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub club_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub club_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub manager_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub manager_mobile: Option<String>,
}

/// POST /api/club/registration - multipart with club crest and manager photo
pub async fn registration(State(state): State<AppState>, form: FormData) -> ApiResult<Club> {
    ValidationReport::new()
        .check("clubName", validation::name(form.text("clubName")))
        .check("clubEmail", validation::email(form.text("clubEmail")))
        .check("clubPassword", validation::password(form.text("clubPassword")))
        .check("clubAddress", validation::address(form.text("clubAddress")))
        .check("managerName", validation::name(form.text("managerName")))
        .check("managerEmail", validation::email(form.text("managerEmail")))
        .check("managerMobile", validation::mobile(form.text("managerMobile")))
        .check("clubImage", validation::image(form.file("clubImage")))
        .check("managerImage", validation::image(form.file("managerImage")))
        .finish()?;

    let email = form.owned("clubEmail").unwrap_or_default();
    accounts::ensure_email_free::<Club>(&state.db, &email).await?;

    let mut uploads = state.media.batch();
    let outcome = store_club(&state, &form, &mut uploads).await;
    let club = uploads
        .commit_or_rollback(outcome)
        .await
        .context("Registration failed")?;

    state.notifier.welcome(Role::Club, &club.club_name, &club.club_email);

    Ok(ApiResponse::success("Club registered successfully", club))
}

async fn store_club(state: &AppState, form: &FormData, uploads: &mut UploadBatch) -> Result<Club, ApiError> {
    let (Some(club_image), Some(manager_image)) = (form.file("clubImage"), form.file("managerImage")) else {
        return Err(ApiError::bad_request("Image is required"));
    };

    let password_hash = state
        .hasher
        .hash(form.text("clubPassword").unwrap_or_default())
        .await?;
    let image = uploads.put(MediaKind::Club, club_image).await?;
    let manager_image = uploads.put(MediaKind::Manager, manager_image).await?;

    let club = clubs::insert(
        &state.db,
        NewClub {
            name: form.owned("clubName").unwrap_or_default(),
            email: form.owned("clubEmail").unwrap_or_default(),
            password_hash,
            image,
            address: form.owned("clubAddress").unwrap_or_default(),
            manager_name: form.owned("managerName").unwrap_or_default(),
            manager_email: form.owned("managerEmail").unwrap_or_default(),
            manager_mobile: normalize_mobile(form.text("managerMobile").unwrap_or_default()),
            manager_image,
        },
    )
    .await?;
    Ok(club)
}

/// POST /api/club/login
pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody<LoginRequest>) -> ApiResult<Value> {
    shared::login::<Club>(
        &state,
        &state.auth.club,
        LoginFields {
            email: "clubEmail",
            password: "clubPassword",
        },
        body.club_email.as_deref(),
        body.club_password.as_deref(),
    )
    .await
}

/// POST /api/club/changePassword
pub async fn change_password(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> ApiResult<()> {
    let club = acting_club(&state, &token, body.club_id).await?;
    shared::change_password::<Club>(
        &state,
        club.club_id,
        body.old_password.as_deref(),
        body.new_password.as_deref(),
    )
    .await
}

/// POST /api/club/viewProfile
pub async fn view_profile(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<ClubRequest>,
) -> ApiResult<Club> {
    let club = acting_club(&state, &token, body.club_id).await?;
    shared::view_profile::<Club>(&state, club.club_id).await
}

/// POST /api/club/updateProfile
///
/// Players registered earlier keep the club and manager names they saw at
/// registration.
pub async fn update_profile(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<UpdateProfileRequest>,
) -> ApiResult<Club> {
    let club = acting_club(&state, &token, body.club_id).await?;

    ValidationReport::new()
        .check("clubName", validation::name(body.club_name.as_deref()))
        .check("clubAddress", validation::address(body.club_address.as_deref()))
        .check("managerName", validation::name(body.manager_name.as_deref()))
        .check("managerMobile", validation::mobile(body.manager_mobile.as_deref()))
        .finish()?;

    let updated = clubs::update_profile(
        &state.db,
        club.club_id,
        body.club_name.as_deref().unwrap_or_default().trim(),
        body.club_address.as_deref().unwrap_or_default().trim(),
        body.manager_name.as_deref().unwrap_or_default().trim(),
        &normalize_mobile(body.manager_mobile.as_deref().unwrap_or_default()),
    )
    .await
    .context("Profile update failed")?;

    tracing::info!(club_id = updated.club_id, "club profile updated");
    Ok(ApiResponse::success("Club updated successfully", updated))
}

/// POST /api/club/viewAllClubs
pub async fn view_all_clubs(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<ClubRequest>,
) -> ApiResult<Vec<ClubSummary>> {
    acting_club(&state, &token, body.club_id).await?;
    let clubs = clubs::list_active(&state.db).await?;
    Ok(ApiResponse::success("All clubs are retrieved successfully", clubs))
}
