use axum::extract::State;
use serde::Deserialize;

use super::acting_club;
use crate::database::messages;
use crate::database::models::{LeaveRequest, PlayerNotification};
use crate::database::status::APPROVE_LEAVE;
use crate::handlers::{required_id, Context};
use crate::middleware::{lenient, ApiResponse, ApiResult, AuthToken, JsonBody};
use crate::state::AppState;
use crate::validation::{self, ValidationReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestQuery {
    #[serde(default, deserialize_with = "lenient::id")]
    pub club_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub leave_request_id: Option<i64>,
}

/// POST /api/club/sendNotificationToPlayer
pub async fn send_notification_to_player(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<NotificationRequest>,
) -> ApiResult<PlayerNotification> {
    let club = acting_club(&state, &token, body.club_id).await?;
    let player_id = required_id(body.player_id, "Player")?;

    ValidationReport::new()
        .check("message", validation::message(body.message.as_deref()))
        .finish()?;

    let notification = messages::notify_player(
        &state.db,
        club.club_id,
        player_id,
        body.message.as_deref().unwrap_or_default().trim(),
    )
    .await
    .context("Notification could not be sent")?;
    Ok(ApiResponse::success("Notification sent successfully", notification))
}

/// POST /api/club/viewAllLeaveRequests - requests still awaiting approval
pub async fn view_all_leave_requests(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<LeaveRequestQuery>,
) -> ApiResult<Vec<LeaveRequest>> {
    let club = acting_club(&state, &token, body.club_id).await?;
    let pending = messages::pending_leave_for_club(&state.db, club.club_id).await?;
    Ok(ApiResponse::success("All leave requests retrieved successfully", pending))
}

/// POST /api/club/viewOneLeaveRequest
pub async fn view_one_leave_request(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<LeaveRequestQuery>,
) -> ApiResult<LeaveRequest> {
    let club = acting_club(&state, &token, body.club_id).await?;
    let leave_request_id = required_id(body.leave_request_id, "Leave Request")?;

    let request = messages::leave_for_club(&state.db, club.club_id, leave_request_id)
        .await
        .context("Leave request not available")?;
    Ok(ApiResponse::success("Leave Request details retrieved successfully", request))
}

/// POST /api/club/approveOneLeaveRequest
pub async fn approve_one_leave_request(
    State(state): State<AppState>,
    token: AuthToken,
    JsonBody(body): JsonBody<LeaveRequestQuery>,
) -> ApiResult<LeaveRequest> {
    let club = acting_club(&state, &token, body.club_id).await?;
    let leave_request_id = required_id(body.leave_request_id, "Leave Request")?;

    let approved = messages::transition_leave(&state.db, club.club_id, leave_request_id, APPROVE_LEAVE)
        .await
        .context("Leave request approval failed")?;
    Ok(ApiResponse::success("Leave Request approved successfully", approved))
}
