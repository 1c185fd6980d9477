use axum::extract::State;
use serde::Deserialize;

use super::acting_admin;
use crate::database::feed::{self, Owner};
use crate::database::models::FootballNews;
use crate::database::status::DELETE_NEWS;
use crate::error::ApiError;
use crate::handlers::{required_id, Context};
use crate::middleware::{lenient, ApiResponse, ApiResult, AuthToken, FormData, JsonBody};
use crate::services::{MediaKind, UploadBatch};
use crate::state::AppState;
use crate::validation::{self, ValidationReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub admin_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub football_news_id: Option<i64>,
}

/// POST /api/admin/addNews - multipart: title, content and an image
pub async fn add_news(State(state): State<AppState>, token: AuthToken, form: FormData) -> ApiResult<FootballNews> {
    let admin = acting_admin(&state, &token, form.id("adminId")?).await?;

    ValidationReport::new()
        .check("footballNewsTitle", validation::title(form.text("footballNewsTitle")))
        .check("footballNewsContent", validation::text(form.text("footballNewsContent")))
        .check("footballNewsImage", validation::image(form.file("footballNewsImage")))
        .finish()?;

    let mut uploads = state.media.batch();
    let outcome = store_news(&state, admin.admin_id, &form, &mut uploads).await;
    let news = uploads
        .commit_or_rollback(outcome)
        .await
        .context("Football news could not be added")?;

    Ok(ApiResponse::success("Football news added successfully", news))
}

async fn store_news(
    state: &AppState,
    admin_id: i64,
    form: &FormData,
    uploads: &mut UploadBatch,
) -> Result<FootballNews, ApiError> {
    let image = form
        .file("footballNewsImage")
        .ok_or_else(|| ApiError::bad_request("Image is required"))?;
    let image = uploads.put(MediaKind::FootballNews, image).await?;

    let news = feed::insert_news(
        &state.db,
        admin_id,
        &form.owned("footballNewsTitle").unwrap_or_default(),
        &form.owned("footballNewsContent").unwrap_or_default(),
        &image,
    )
    .await?;
    Ok(news)
}

/// POST /api/admin/viewAllNews - the admin's own live news
pub async fn view_all_news(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<NewsRequest>,
) -> ApiResult<Vec<FootballNews>> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let news = feed::list_news(&state.db, Owner::Admin(admin.admin_id)).await?;
    Ok(ApiResponse::success("All admin news retrieved successfully", news))
}

/// POST /api/admin/viewOneNews
pub async fn view_one_news(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<NewsRequest>,
) -> ApiResult<FootballNews> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let news_id = required_id(body.football_news_id, "Football News")?;

    let news = feed::find_news(&state.db, Owner::Admin(admin.admin_id), news_id)
        .await
        .context("Football news not available")?;
    Ok(ApiResponse::success("Football news retrieved successfully", news))
}

/// POST /api/admin/deleteOneNews - soft delete
pub async fn delete_one_news(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<NewsRequest>,
) -> ApiResult<FootballNews> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let news_id = required_id(body.football_news_id, "Football News")?;

    let news = feed::transition_news(&state.db, admin.admin_id, news_id, DELETE_NEWS)
        .await
        .context("Football news could not be deleted")?;
    Ok(ApiResponse::success("Football news deleted successfully", news))
}
