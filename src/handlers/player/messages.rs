use axum::extract::State;
use serde::Deserialize;

use super::acting_player;
use crate::database::models::{Club, LeaveRequest, PlayerNotification};
use crate::database::{accounts, messages};
use crate::handlers::{required_id, Context};
use crate::middleware::{lenient, ApiResponse, ApiResult, AuthToken, JsonBody};
use crate::state::AppState;
use crate::validation::{self, ValidationReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub notification_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestBody {
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

/// POST /api/player/viewAllNotifications
pub async fn view_all_notifications(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<NotificationQuery>,
) -> ApiResult<Vec<PlayerNotification>> {
    let player = acting_player(&state, &token, body.player_id).await?;
    let notifications = messages::notifications_for_player(&state.db, player.player_id).await?;
    Ok(ApiResponse::success("All notifications retrieved successfully", notifications))
}

/// POST /api/player/viewOneNotification
pub async fn view_one_notification(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<NotificationQuery>,
) -> ApiResult<PlayerNotification> {
    let player = acting_player(&state, &token, body.player_id).await?;
    let notification_id = required_id(body.notification_id, "Notification")?;

    let notification = messages::notification_for_player(&state.db, player.player_id, notification_id)
        .await
        .context("Notification not available")?;
    Ok(ApiResponse::success("Notification retrieved successfully", notification))
}

/// POST /api/player/sendLeaveRequestToClub - addressed to the player's own club
pub async fn send_leave_request_to_club(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<LeaveRequestBody>,
) -> ApiResult<LeaveRequest> {
    let player = acting_player(&state, &token, body.player_id).await?;

    ValidationReport::new()
        .check("message", validation::message(body.message.as_deref()))
        .finish()?;

    accounts::find_eligible::<Club>(&state.db, player.club_id)
        .await
        .context("Leave request could not be sent")?;

    let request = messages::request_leave(&state.db, &player, body.message.as_deref().unwrap_or_default().trim())
        .await
        .context("Leave request could not be sent")?;
    Ok(ApiResponse::success("Leave request sent successfully", request))
}

/// POST /api/player/viewAllApprovedLeaveRequests
pub async fn view_all_approved_leave_requests(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<NotificationQuery>,
) -> ApiResult<Vec<LeaveRequest>> {
    let player = acting_player(&state, &token, body.player_id).await?;
    let approved = messages::approved_leave_for_player(&state.db, player.player_id).await?;
    Ok(ApiResponse::success("All approved leave requests retrieved successfully", approved))
}
