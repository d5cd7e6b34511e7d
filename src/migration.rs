//! Idempotent DDL for the products table.

use crate::error::AppError;
use sqlx::PgPool;

/// Create the products table and its default-ordering index if missing.
/// created_at is assigned by the database and never written by the app.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            price NUMERIC(10, 2) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_products_created_at ON products (created_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
