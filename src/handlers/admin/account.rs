use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use super::acting_admin;
use crate::auth::Role;
use crate::database::models::admin::NewAdmin;
use crate::database::models::{Admin, ClubSummary};
use crate::database::{accounts, admins, clubs};
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
    pub admin_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub admin_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub admin_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub admin_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub old_password: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub admin_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub admin_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub admin_mobile: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub admin_address: Option<String>,
}

/// POST /api/admin/registration - multipart self-registration with a profile image
pub async fn registration(State(state): State<AppState>, form: FormData) -> ApiResult<Admin> {
    ValidationReport::new()
        .check("adminName", validation::name(form.text("adminName")))
        .check("adminEmail", validation::email(form.text("adminEmail")))
        .check("adminPassword", validation::password(form.text("adminPassword")))
        .check("adminMobile", validation::mobile(form.text("adminMobile")))
        .check("adminAddress", validation::address(form.text("adminAddress")))
        .check("adminImage", validation::image(form.file("adminImage")))
        .finish()?;

    let email = form.owned("adminEmail").unwrap_or_default();
    accounts::ensure_email_free::<Admin>(&state.db, &email).await?;

    let mut uploads = state.media.batch();
    let outcome = store_admin(&state, &form, &mut uploads).await;
    let admin = uploads
        .commit_or_rollback(outcome)
        .await
        .context("Registration failed")?;

    state.notifier.welcome(Role::Admin, &admin.admin_name, &admin.admin_email);

    Ok(ApiResponse::success("Admin registered successfully", admin))
}

async fn store_admin(state: &AppState, form: &FormData, uploads: &mut UploadBatch) -> Result<Admin, ApiError> {
    let image = form
        .file("adminImage")
        .ok_or_else(|| ApiError::bad_request("Image is required"))?;

    let password_hash = state
        .hasher
        .hash(form.text("adminPassword").unwrap_or_default())
        .await?;
    let image = uploads.put(MediaKind::Admin, image).await?;

    let admin = admins::insert(
        &state.db,
        NewAdmin {
            name: form.owned("adminName").unwrap_or_default(),
            email: form.owned("adminEmail").unwrap_or_default(),
            password_hash,
            image,
            mobile: normalize_mobile(form.text("adminMobile").unwrap_or_default()),
            address: form.owned("adminAddress").unwrap_or_default(),
        },
    )
    .await?;
    Ok(admin)
}

/// POST /api/admin/login
pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody<LoginRequest>) -> ApiResult<Value> {
    shared::login::<Admin>(
        &state,
        &state.auth.admin,
        LoginFields {
            email: "adminEmail",
            password: "adminPassword",
        },
        body.admin_email.as_deref(),
        body.admin_password.as_deref(),
    )
    .await
}

/// POST /api/admin/changePassword
pub async fn change_password(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> ApiResult<()> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    shared::change_password::<Admin>(
        &state,
        admin.admin_id,
        body.old_password.as_deref(),
        body.new_password.as_deref(),
    )
    .await
}

/// POST /api/admin/viewProfile
pub async fn view_profile(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<AdminRequest>,
) -> ApiResult<Admin> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    shared::view_profile::<Admin>(&state, admin.admin_id).await
}

/// POST /api/admin/updateProfile - name, mobile (separators stripped) and address
pub async fn update_profile(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<UpdateProfileRequest>,
) -> ApiResult<Admin> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;

    ValidationReport::new()
        .check("adminName", validation::name(body.admin_name.as_deref()))
        .check("adminMobile", validation::mobile(body.admin_mobile.as_deref()))
        .check("adminAddress", validation::address(body.admin_address.as_deref()))
        .finish()?;

    let updated = admins::update_profile(
        &state.db,
        admin.admin_id,
        body.admin_name.as_deref().unwrap_or_default().trim(),
        &normalize_mobile(body.admin_mobile.as_deref().unwrap_or_default()),
        body.admin_address.as_deref().unwrap_or_default().trim(),
    )
    .await
    .context("Profile update failed")?;

    tracing::info!(admin_id = updated.admin_id, "admin profile updated");
    Ok(ApiResponse::success("Admin updated successfully", updated))
}

/// POST /api/admin/viewAllClubs
pub async fn view_all_clubs(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<AdminRequest>,
) -> ApiResult<Vec<ClubSummary>> {
    acting_admin(&state, &token, body.admin_id).await?;
    let clubs = clubs::list_active(&state.db).await?;
    Ok(ApiResponse::success("All clubs are retrieved successfully", clubs))
}
