use axum::extract::State;
use serde::Deserialize;

use super::acting_admin;
use crate::database::feed::{self, Owner};
use crate::database::models::matches::NewMatch;
use crate::database::models::{Match, MatchPoint};
use crate::database::status::{MatchState, DELETE_MATCH, END_MATCH};
use crate::error::ApiError;
use crate::handlers::{required_id, Context};
use crate::middleware::{lenient, ApiResponse, ApiResult, AuthToken, FormData, JsonBody};
use crate::services::{MediaKind, UploadBatch};
use crate::state::AppState;
use crate::validation::{self, ValidationReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub admin_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub match_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPointRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub admin_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub match_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub team_one_total_goals_in_match: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub team_two_total_goals_in_match: Option<String>,
}

/// POST /api/admin/addMatch - multipart: fixture details and both team crests
pub async fn add_match(State(state): State<AppState>, token: AuthToken, form: FormData) -> ApiResult<Match> {
    let admin = acting_admin(&state, &token, form.id("adminId")?).await?;

    ValidationReport::new()
        .check("matchName", validation::text(form.text("matchName")))
        .check("homeTeamName", validation::text(form.text("homeTeamName")))
        .check("awayTeamName", validation::text(form.text("awayTeamName")))
        .check("matchLocation", validation::text(form.text("matchLocation")))
        .check("matchPrize", validation::text(form.text("matchPrize")))
        .check("matchDate", validation::text(form.text("matchDate")))
        .check("homeTeamImage", validation::image(form.file("homeTeamImage")))
        .check("awayTeamImage", validation::image(form.file("awayTeamImage")))
        .finish()?;

    let mut uploads = state.media.batch();
    let outcome = store_match(&state, admin.admin_id, &form, &mut uploads).await;
    let created = uploads
        .commit_or_rollback(outcome)
        .await
        .context("Match could not be added")?;

    Ok(ApiResponse::success("Match added successfully", created))
}

async fn store_match(
    state: &AppState,
    admin_id: i64,
    form: &FormData,
    uploads: &mut UploadBatch,
) -> Result<Match, ApiError> {
    let (Some(home), Some(away)) = (form.file("homeTeamImage"), form.file("awayTeamImage")) else {
        return Err(ApiError::bad_request("Image is required"));
    };
    let home_team_image = uploads.put(MediaKind::Match, home).await?;
    let away_team_image = uploads.put(MediaKind::Match, away).await?;

    let fixture = NewMatch {
        name: form.owned("matchName").unwrap_or_default(),
        home_team_name: form.owned("homeTeamName").unwrap_or_default(),
        away_team_name: form.owned("awayTeamName").unwrap_or_default(),
        home_team_image,
        away_team_image,
        location: form.owned("matchLocation").unwrap_or_default(),
        prize: form.owned("matchPrize").unwrap_or_default(),
        date: form.owned("matchDate").unwrap_or_default(),
    };
    Ok(feed::insert_match(&state.db, admin_id, fixture).await?)
}

/// POST /api/admin/viewAllMatches - live matches the admin created
pub async fn view_all_matches(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchRequest>,
) -> ApiResult<Vec<Match>> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let matches = feed::list_matches(&state.db, Owner::Admin(admin.admin_id), MatchState::Live).await?;
    Ok(ApiResponse::success("All Admin Matches retrieved successfully", matches))
}

/// POST /api/admin/viewOneMatch
pub async fn view_one_match(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchRequest>,
) -> ApiResult<Match> {
    one_match(state, token, body, MatchState::Live).await
}

/// POST /api/admin/viewAllEndedMatches
pub async fn view_all_ended_matches(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchRequest>,
) -> ApiResult<Vec<Match>> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let matches = feed::list_matches(&state.db, Owner::Admin(admin.admin_id), MatchState::Ended).await?;
    Ok(ApiResponse::success("All Ended Matches retrieved successfully", matches))
}

/// POST /api/admin/viewOneEndedMatch
pub async fn view_one_ended_match(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchRequest>,
) -> ApiResult<Match> {
    one_match(state, token, body, MatchState::Ended).await
}

async fn one_match(state: AppState, token: AuthToken, body: MatchRequest, match_state: MatchState) -> ApiResult<Match> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let match_id = required_id(body.match_id, "Match")?;

    let found = feed::find_match(&state.db, Owner::Admin(admin.admin_id), match_id, match_state)
        .await
        .context("Match not available")?;
    Ok(ApiResponse::success("Admin Match details", found))
}

/// POST /api/admin/endOneMatch - live to ended, irreversible
pub async fn end_one_match(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchRequest>,
) -> ApiResult<Match> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let match_id = required_id(body.match_id, "Match")?;

    let ended = feed::transition_match(&state.db, admin.admin_id, match_id, END_MATCH)
        .await
        .context("Match could not be ended")?;
    Ok(ApiResponse::success("Match ended successfully", ended))
}

/// POST /api/admin/deleteOneMatch - soft delete
pub async fn delete_one_match(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchRequest>,
) -> ApiResult<Match> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let match_id = required_id(body.match_id, "Match")?;

    let deleted = feed::transition_match(&state.db, admin.admin_id, match_id, DELETE_MATCH)
        .await
        .context("Match could not be deleted")?;
    Ok(ApiResponse::success("Match deleted successfully", deleted))
}

/// POST /api/admin/addMatchPoint - final score for one of the admin's matches
pub async fn add_match_point(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchPointRequest>,
) -> ApiResult<MatchPoint> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let match_id = required_id(body.match_id, "Match")?;

    let team_one = body.team_one_total_goals_in_match.as_deref().map(str::trim);
    let team_two = body.team_two_total_goals_in_match.as_deref().map(str::trim);
    ValidationReport::new()
        .check("teamOneTotalGoalsInMatch", validation::goals(team_one))
        .check("teamTwoTotalGoalsInMatch", validation::goals(team_two))
        .finish()?;

    let (team_one, team_two) = match (parse_goals(team_one), parse_goals(team_two)) {
        (Some(one), Some(two)) => (one, two),
        _ => return Err(ApiError::bad_request("Goals must be a whole number between 0 and 99")),
    };

    let point = feed::insert_point(&state.db, admin.admin_id, match_id, team_one, team_two)
        .await
        .context("Match point could not be added")?;
    Ok(ApiResponse::success("Match point added successfully", point))
}

fn parse_goals(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| v.parse().ok())
}

/// POST /api/admin/viewAllMatchPoints
pub async fn view_all_match_points(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<MatchRequest>,
) -> ApiResult<Vec<MatchPoint>> {
    let admin = acting_admin(&state, &token, body.admin_id).await?;
    let points = feed::list_points(&state.db, Owner::Admin(admin.admin_id)).await?;
    Ok(ApiResponse::success("All Admin Match Points retrieved successfully", points))
}
