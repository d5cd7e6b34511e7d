//! CRUD execution against PostgreSQL.

use crate::error::AppError;
use crate::model::{Product, ProductInput, ProductPatch};
use crate::pagination::Page;
use crate::query::{self, Filters, Ordering, QueryBuf};
use sqlx::PgPool;

pub struct ProductService;

impl ProductService {
    /// Count matching rows, then fetch the requested page.
    pub async fn list(
        pool: &PgPool,
        filters: &Filters,
        ordering: Ordering,
        page: &Page,
    ) -> Result<(u64, Vec<Product>), AppError> {
        let count_q = query::count(filters);
        tracing::debug!(sql = %count_q.sql, params = ?count_q.params, "query");
        let mut count = sqlx::query_scalar::<_, i64>(&count_q.sql);
        for p in &count_q.params {
            count = count.bind(p);
        }
        let count = count.fetch_one(pool).await? as u64;

        let list_q = query::select_list(filters, ordering, page.size, page.offset());
        let rows = Self::fetch_many(pool, &list_q).await?;
        Ok((count, rows))
    }

    /// Fetch one row by primary key.
    pub async fn retrieve(pool: &PgPool, id: i64) -> Result<Option<Product>, AppError> {
        let sql = query::select_by_id();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Insert one row; id and created_at are assigned by the database.
    pub async fn create(pool: &PgPool, input: &ProductInput) -> Result<Product, AppError> {
        let sql = query::insert();
        tracing::debug!(sql = %sql, name = %input.name, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price.as_str())
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Full update by id. None when the row does not exist.
    pub async fn update(pool: &PgPool, id: i64, input: &ProductInput) -> Result<Option<Product>, AppError> {
        let sql = query::update();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(&input.name)
            .bind(input.price.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// Partial update by id; an empty patch just re-reads the row.
    pub async fn patch(pool: &PgPool, id: i64, patch: &ProductPatch) -> Result<Option<Product>, AppError> {
        let Some(q) = query::update_partial(
            patch.name.as_deref(),
            patch.price.as_ref().map(|p| p.as_str()),
        ) else {
            return Self::retrieve(pool, id).await;
        };
        tracing::debug!(sql = %q.sql, params = ?q.params, id, "query");
        let mut stmt = sqlx::query_as::<_, Product>(&q.sql);
        for p in &q.params {
            stmt = stmt.bind(p);
        }
        let row = stmt.bind(id).fetch_optional(pool).await?;
        Ok(row)
    }

    /// Delete by id. False when the row does not exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, AppError> {
        let sql = query::delete();
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    async fn fetch_many(pool: &PgPool, q: &QueryBuf) -> Result<Vec<Product>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut stmt = sqlx::query_as::<_, Product>(&q.sql);
        for p in &q.params {
            stmt = stmt.bind(p);
        }
        let rows = stmt.fetch_all(pool).await?;
        Ok(rows)
    }
}
