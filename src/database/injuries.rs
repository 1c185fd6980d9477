use sqlx::PgPool;

use crate::database::models::{Club, Injury, Player};
use crate::database::status::PlayerState;
use crate::database::{found, reason, StoreError};

/// Records an injury for one of the club's active players and flags the player as injured.
pub async fn record(
    pool: &PgPool,
    club: &Club,
    player_id: i64,
    injury_type: &str,
    average_recovery_time: &str,
) -> Result<Injury, StoreError> {
    let mut tx = pool.begin().await?;

    let sql = format!(
        "UPDATE players SET is_injured = TRUE, updated_date = now()
         WHERE player_id = $1 AND club_id = $2 AND {}
         RETURNING *",
        PlayerState::Active.predicate()
    );
    let player = sqlx::query_as::<_, Player>(&sql)
        .bind(player_id)
        .bind(club.club_id)
        .fetch_optional(&mut *tx)
        .await?;
    let player = found(player, reason::PLAYER_NOT_FOUND)?;

    let injury = sqlx::query_as::<_, Injury>(
        "INSERT INTO injuries (player_id, club_id, player_name, player_image, club_name, injury_type,
                               average_recovery_time)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(player.player_id)
    .bind(club.club_id)
    .bind(&player.player_name)
    .bind(&player.player_image)
    .bind(&club.club_name)
    .bind(injury_type)
    .bind(average_recovery_time)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(injury_id = injury.injury_id, player_id, club_id = club.club_id, "injury recorded");
    Ok(injury)
}
