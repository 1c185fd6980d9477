use sqlx::PgPool;

use crate::database::accounts::{ensure_email_free, Account};
use crate::database::models::club::NewClub;
use crate::database::models::{Club, ClubSummary};
use crate::database::status::CLUB_ACTIVE;
use crate::database::{found, StoreError};

pub async fn insert(pool: &PgPool, club: NewClub) -> Result<Club, StoreError> {
    ensure_email_free::<Club>(pool, &club.email).await?;

    let created = sqlx::query_as::<_, Club>(
        "INSERT INTO clubs (club_name, club_email, club_password, club_image, club_address,
                            manager_name, manager_email, manager_mobile, manager_image)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
         RETURNING *",
    )
    .bind(&club.name)
    .bind(&club.email)
    .bind(&club.password_hash)
    .bind(&club.image)
    .bind(&club.address)
    .bind(&club.manager_name)
    .bind(&club.manager_email)
    .bind(&club.manager_mobile)
    .bind(&club.manager_image)
    .fetch_one(pool)
    .await
    .map_err(StoreError::from_write)?;

    tracing::info!(club_id = created.club_id, "club registered");
    Ok(created)
}

pub async fn update_profile(
    pool: &PgPool,
    club_id: i64,
    club_name: &str,
    club_address: &str,
    manager_name: &str,
    manager_mobile: &str,
) -> Result<Club, StoreError> {
    let sql = format!(
        "UPDATE clubs SET club_name = $2, club_address = $3, manager_name = $4, manager_mobile = $5,
                          updated_date = now()
         WHERE club_id = $1 AND {}
         RETURNING *",
        Club::ELIGIBLE
    );
    let row = sqlx::query_as::<_, Club>(&sql)
        .bind(club_id)
        .bind(club_name)
        .bind(club_address)
        .bind(manager_name)
        .bind(manager_mobile)
        .fetch_optional(pool)
        .await?;
    found(row, Club::NOT_FOUND)
}

/// Clubs open for business, newest first.
pub async fn list_active(pool: &PgPool) -> Result<Vec<ClubSummary>, StoreError> {
    let sql = format!(
        "SELECT club_id, club_name, club_image, club_address, manager_name, manager_image, registered_date
         FROM clubs WHERE {}
         ORDER BY registered_date DESC",
        CLUB_ACTIVE
    );
    Ok(sqlx::query_as::<_, ClubSummary>(&sql).fetch_all(pool).await?)
}
