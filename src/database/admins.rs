use sqlx::PgPool;

use crate::database::accounts::{ensure_email_free, Account};
use crate::database::models::admin::NewAdmin;
use crate::database::models::Admin;
use crate::database::{found, StoreError};

pub async fn insert(pool: &PgPool, admin: NewAdmin) -> Result<Admin, StoreError> {
    ensure_email_free::<Admin>(pool, &admin.email).await?;

    let created = sqlx::query_as::<_, Admin>(
        "INSERT INTO admins (admin_name, admin_email, admin_password, admin_image, admin_mobile, admin_address)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(&admin.name)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(&admin.image)
    .bind(&admin.mobile)
    .bind(&admin.address)
    .fetch_one(pool)
    .await
    .map_err(StoreError::from_write)?;

    tracing::info!(admin_id = created.admin_id, "admin registered");
    Ok(created)
}

pub async fn update_profile(
    pool: &PgPool,
    admin_id: i64,
    name: &str,
    mobile: &str,
    address: &str,
) -> Result<Admin, StoreError> {
    let sql = format!(
        "UPDATE admins SET admin_name = $2, admin_mobile = $3, admin_address = $4, updated_date = now()
         WHERE admin_id = $1 AND {}
         RETURNING *",
        Admin::ELIGIBLE
    );
    let row = sqlx::query_as::<_, Admin>(&sql)
        .bind(admin_id)
        .bind(name)
        .bind(mobile)
        .bind(address)
        .fetch_optional(pool)
        .await?;
    found(row, Admin::NOT_FOUND)
}
