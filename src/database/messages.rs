//! Club to player notifications and player to club leave requests.

use sqlx::PgPool;

use crate::database::models::{LeaveRequest, Player, PlayerNotification};
use crate::database::status::{PlayerState, Transition, LEAVE_APPROVED, LEAVE_PENDING};
use crate::database::{found, reason, StoreError};

/// Writes a notification to one of the club's players.
pub async fn notify_player(
    pool: &PgPool,
    club_id: i64,
    player_id: i64,
    message: &str,
) -> Result<PlayerNotification, StoreError> {
    let sql = format!(
        "INSERT INTO player_notifications (club_id, player_id, message)
         SELECT club_id, player_id, $3 FROM players
         WHERE club_id = $1 AND player_id = $2 AND {}
         RETURNING *",
        PlayerState::Present.predicate()
    );
    let row = sqlx::query_as::<_, PlayerNotification>(&sql)
        .bind(club_id)
        .bind(player_id)
        .bind(message)
        .fetch_optional(pool)
        .await?;

    let notification = found(row, reason::PLAYER_NOT_FOUND)?;
    tracing::info!(notification_id = notification.notification_id, club_id, player_id, "notification sent");
    Ok(notification)
}

pub async fn notifications_for_player(pool: &PgPool, player_id: i64) -> Result<Vec<PlayerNotification>, StoreError> {
    Ok(sqlx::query_as::<_, PlayerNotification>(
        "SELECT * FROM player_notifications WHERE player_id = $1 ORDER BY added_date DESC",
    )
    .bind(player_id)
    .fetch_all(pool)
    .await?)
}

pub async fn notification_for_player(
    pool: &PgPool,
    player_id: i64,
    notification_id: i64,
) -> Result<PlayerNotification, StoreError> {
    let row = sqlx::query_as::<_, PlayerNotification>(
        "SELECT * FROM player_notifications WHERE notification_id = $1 AND player_id = $2",
    )
    .bind(notification_id)
    .bind(player_id)
    .fetch_optional(pool)
    .await?;
    found(row, reason::NOTIFICATION_NOT_FOUND)
}

/// Files a leave request with the player's own club. The caller has
/// already checked that the club is active.
pub async fn request_leave(pool: &PgPool, player: &Player, message: &str) -> Result<LeaveRequest, StoreError> {
    let created = sqlx::query_as::<_, LeaveRequest>(
        "INSERT INTO leave_requests (club_id, player_id, player_name, message)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(player.club_id)
    .bind(player.player_id)
    .bind(&player.player_name)
    .bind(message)
    .fetch_one(pool)
    .await?;

    tracing::info!(leave_request_id = created.leave_request_id, player_id = player.player_id, "leave requested");
    Ok(created)
}

pub async fn pending_leave_for_club(pool: &PgPool, club_id: i64) -> Result<Vec<LeaveRequest>, StoreError> {
    let sql = format!(
        "SELECT * FROM leave_requests WHERE club_id = $1 AND {} ORDER BY added_date DESC",
        LEAVE_PENDING
    );
    Ok(sqlx::query_as::<_, LeaveRequest>(&sql).bind(club_id).fetch_all(pool).await?)
}

pub async fn leave_for_club(pool: &PgPool, club_id: i64, leave_request_id: i64) -> Result<LeaveRequest, StoreError> {
    let row = sqlx::query_as::<_, LeaveRequest>(
        "SELECT * FROM leave_requests WHERE leave_request_id = $1 AND club_id = $2",
    )
    .bind(leave_request_id)
    .bind(club_id)
    .fetch_optional(pool)
    .await?;
    found(row, reason::LEAVE_NOT_FOUND)
}

pub async fn transition_leave(
    pool: &PgPool,
    club_id: i64,
    leave_request_id: i64,
    transition: Transition,
) -> Result<LeaveRequest, StoreError> {
    let sql = transition.update_sql("leave_requests", "leave_request_id = $1 AND club_id = $2");
    let row = sqlx::query_as::<_, LeaveRequest>(&sql)
        .bind(leave_request_id)
        .bind(club_id)
        .fetch_optional(pool)
        .await?;

    let updated = found(row, transition.rejection)?;
    tracing::info!(leave_request_id, club_id, "leave request approved");
    Ok(updated)
}

pub async fn approved_leave_for_player(pool: &PgPool, player_id: i64) -> Result<Vec<LeaveRequest>, StoreError> {
    let sql = format!(
        "SELECT * FROM leave_requests WHERE player_id = $1 AND {} ORDER BY added_date DESC",
        LEAVE_APPROVED
    );
    Ok(sqlx::query_as::<_, LeaveRequest>(&sql).bind(player_id).fetch_all(pool).await?)
}
