use sqlx::PgPool;

use crate::database::accounts::{ensure_email_free, Account};
use crate::database::models::player::{NewPlayer, PlayerProfileUpdate};
use crate::database::models::{Club, Player};
use crate::database::status::{PlayerState, Transition, CLUB_ACTIVE};
use crate::database::{found, reason, StoreError};

/// Registers a player with the chosen club, snapshotting the club's names.
pub async fn insert(pool: &PgPool, player: NewPlayer) -> Result<Player, StoreError> {
    let club_sql = format!("SELECT * FROM clubs WHERE club_id = $1 AND {}", CLUB_ACTIVE);
    let club = sqlx::query_as::<_, Club>(&club_sql)
        .bind(player.club_id)
        .fetch_optional(pool)
        .await?;
    let club = found(club, reason::CLUB_NOT_FOUND)?;

    ensure_email_free::<Player>(pool, &player.email).await?;

    let created = sqlx::query_as::<_, Player>(
        "INSERT INTO players (club_id, club_name, manager_name, player_name, player_email, player_password,
                              player_image, player_mobile, player_age, player_position, player_country,
                              player_address)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
         RETURNING *",
    )
    .bind(club.club_id)
    .bind(&club.club_name)
    .bind(&club.manager_name)
    .bind(&player.name)
    .bind(&player.email)
    .bind(&player.password_hash)
    .bind(&player.image)
    .bind(&player.mobile)
    .bind(player.age)
    .bind(&player.position)
    .bind(&player.country)
    .bind(&player.address)
    .fetch_one(pool)
    .await
    .map_err(StoreError::from_write)?;

    tracing::info!(player_id = created.player_id, club_id = club.club_id, "player registered, awaiting approval");
    Ok(created)
}

pub async fn update_profile(pool: &PgPool, player_id: i64, update: PlayerProfileUpdate) -> Result<Player, StoreError> {
    let sql = format!(
        "UPDATE players SET player_name = $2, player_mobile = $3, player_address = $4, player_age = $5,
                            player_position = $6, player_country = $7, updated_date = now()
         WHERE player_id = $1 AND {}
         RETURNING *",
        Player::ELIGIBLE
    );
    let row = sqlx::query_as::<_, Player>(&sql)
        .bind(player_id)
        .bind(&update.name)
        .bind(&update.mobile)
        .bind(&update.address)
        .bind(update.age)
        .bind(&update.position)
        .bind(&update.country)
        .fetch_optional(pool)
        .await?;
    found(row, Player::NOT_FOUND)
}

/// The club's players in `state`, newest registration first.
pub async fn list_for_club(pool: &PgPool, club_id: i64, state: PlayerState) -> Result<Vec<Player>, StoreError> {
    let sql = format!(
        "SELECT * FROM players WHERE club_id = $1 AND {} ORDER BY registered_date DESC",
        state.predicate()
    );
    Ok(sqlx::query_as::<_, Player>(&sql).bind(club_id).fetch_all(pool).await?)
}

pub async fn find_for_club(
    pool: &PgPool,
    club_id: i64,
    player_id: i64,
    state: PlayerState,
) -> Result<Player, StoreError> {
    let sql = format!(
        "SELECT * FROM players WHERE player_id = $1 AND club_id = $2 AND {}",
        state.predicate()
    );
    let row = sqlx::query_as::<_, Player>(&sql)
        .bind(player_id)
        .bind(club_id)
        .fetch_optional(pool)
        .await?;
    found(row, reason::PLAYER_NOT_FOUND)
}

/// Applies a status transition to one of the club's players.
pub async fn transition(
    pool: &PgPool,
    club_id: i64,
    player_id: i64,
    transition: Transition,
) -> Result<Player, StoreError> {
    let sql = transition.update_sql("players", "player_id = $1 AND club_id = $2");
    let row = sqlx::query_as::<_, Player>(&sql)
        .bind(player_id)
        .bind(club_id)
        .fetch_optional(pool)
        .await?;

    let player = found(row, transition.rejection)?;
    tracing::info!(player_id, club_id, change = transition.assigns, "player status changed");
    Ok(player)
}

/// Case-insensitive substring match over name, email, position and country
/// among the club's active players.
pub async fn search(pool: &PgPool, club_id: i64, query: &str) -> Result<Vec<Player>, StoreError> {
    let pattern = format!("%{}%", escape_like(query.trim()));
    let sql = format!(
        "SELECT * FROM players
         WHERE club_id = $1 AND {}
           AND (player_name ILIKE $2 OR player_email ILIKE $2 OR player_position ILIKE $2 OR player_country ILIKE $2)
         ORDER BY player_name",
        PlayerState::Active.predicate()
    );
    Ok(sqlx::query_as::<_, Player>(&sql)
        .bind(club_id)
        .bind(pattern)
        .fetch_all(pool)
        .await?)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("Messi"), "Messi");
    }
}
