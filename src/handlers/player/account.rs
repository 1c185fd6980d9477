use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;

use super::acting_player;
use crate::auth::Role;
use crate::database::models::player::{NewPlayer, PlayerProfileUpdate};
use crate::database::models::{ClubSummary, Player};
use crate::database::{accounts, clubs, players};
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
    pub player_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub old_password: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_mobile: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_age: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_position: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub player_country: Option<String>,
}

/// POST /api/player/viewAllClubs - public, lists clubs a player can register with
pub async fn view_all_clubs(State(state): State<AppState>) -> ApiResult<Vec<ClubSummary>> {
    let clubs = clubs::list_active(&state.db).await?;
    Ok(ApiResponse::success("All clubs are retrieved successfully", clubs))
}

/// POST /api/player/registration - multipart; the player waits for club approval
pub async fn registration(State(state): State<AppState>, form: FormData) -> ApiResult<Player> {
    let club_id = form.id("clubId")?;

    ValidationReport::new()
        .check("clubId", validation::present(club_id, "Select a club to continue"))
        .check("playerName", validation::name(form.text("playerName")))
        .check("playerEmail", validation::email(form.text("playerEmail")))
        .check("playerPassword", validation::password(form.text("playerPassword")))
        .check("playerMobile", validation::mobile(form.text("playerMobile")))
        .check("playerAge", validation::age(form.text("playerAge").map(str::trim)))
        .check("playerPosition", validation::text(form.text("playerPosition")))
        .check("playerCountry", validation::text(form.text("playerCountry")))
        .check("playerAddress", validation::address(form.text("playerAddress")))
        .check("playerImage", validation::image(form.file("playerImage")))
        .finish()?;

    let email = form.owned("playerEmail").unwrap_or_default();
    accounts::ensure_email_free::<Player>(&state.db, &email).await?;

    let mut uploads = state.media.batch();
    let outcome = store_player(&state, club_id, &form, &mut uploads).await;
    let player = uploads
        .commit_or_rollback(outcome)
        .await
        .context("Registration failed")?;

    state.notifier.welcome(Role::Player, &player.player_name, &player.player_email);

    Ok(ApiResponse::success("Player registered successfully", player))
}

async fn store_player(
    state: &AppState,
    club_id: Option<i64>,
    form: &FormData,
    uploads: &mut UploadBatch,
) -> Result<Player, ApiError> {
    let (Some(club_id), Some(image)) = (club_id, form.file("playerImage")) else {
        return Err(ApiError::bad_request("Select a club to continue"));
    };
    let age = parse_age(form.text("playerAge"))?;

    let password_hash = state
        .hasher
        .hash(form.text("playerPassword").unwrap_or_default())
        .await?;
    let image = uploads.put(MediaKind::Player, image).await?;

    let player = players::insert(
        &state.db,
        NewPlayer {
            club_id,
            name: form.owned("playerName").unwrap_or_default(),
            email: form.owned("playerEmail").unwrap_or_default(),
            password_hash,
            image,
            mobile: normalize_mobile(form.text("playerMobile").unwrap_or_default()),
            age,
            position: form.owned("playerPosition").unwrap_or_default(),
            country: form.owned("playerCountry").unwrap_or_default(),
            address: form.owned("playerAddress").unwrap_or_default(),
        },
    )
    .await?;
    Ok(player)
}

fn parse_age(value: Option<&str>) -> Result<i32, ApiError> {
    value
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| ApiError::bad_request("Age must be a number"))
}

/// POST /api/player/login - only approved, active players get a token
pub async fn login(State(state): State<AppState>, JsonBody(body): JsonBody<LoginRequest>) -> ApiResult<Value> {
    shared::login::<Player>(
        &state,
        &state.auth.player,
        LoginFields {
            email: "playerEmail",
            password: "playerPassword",
        },
        body.player_email.as_deref(),
        body.player_password.as_deref(),
    )
    .await
}

/// POST /api/player/changePassword
pub async fn change_password(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<ChangePasswordRequest>,
) -> ApiResult<()> {
    let player = acting_player(&state, &token, body.player_id).await?;
    shared::change_password::<Player>(
        &state,
        player.player_id,
        body.old_password.as_deref(),
        body.new_password.as_deref(),
    )
    .await
}

/// POST /api/player/viewProfile
pub async fn view_profile(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<PlayerRequest>,
) -> ApiResult<Player> {
    let player = acting_player(&state, &token, body.player_id).await?;
    shared::view_profile::<Player>(&state, player.player_id).await
}

/// POST /api/player/updateProfile
pub async fn update_profile(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<UpdateProfileRequest>,
) -> ApiResult<Player> {
    let player = acting_player(&state, &token, body.player_id).await?;

    let age = body.player_age.as_deref().map(str::trim);
    ValidationReport::new()
        .check("playerName", validation::name(body.player_name.as_deref()))
        .check("playerMobile", validation::mobile(body.player_mobile.as_deref()))
        .check("playerAddress", validation::address(body.player_address.as_deref()))
        .check("playerAge", validation::age(age))
        .check("playerPosition", validation::text(body.player_position.as_deref()))
        .check("playerCountry", validation::text(body.player_country.as_deref()))
        .finish()?;

    let update = PlayerProfileUpdate {
        name: trimmed(&body.player_name),
        mobile: normalize_mobile(body.player_mobile.as_deref().unwrap_or_default()),
        address: trimmed(&body.player_address),
        age: parse_age(age)?,
        position: trimmed(&body.player_position),
        country: trimmed(&body.player_country),
    };

    let updated = players::update_profile(&state.db, player.player_id, update)
        .await
        .context("Profile update failed")?;

    tracing::info!(player_id = updated.player_id, "player profile updated");
    Ok(ApiResponse::success("Player updated successfully", updated))
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}
