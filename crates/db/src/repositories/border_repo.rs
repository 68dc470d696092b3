//! Repository for the `borders` table.

use sqlx::PgPool;

use showyo_core::types::DbId;

use crate::models::border::{Border, BorderUpdate, NewBorder};

/// Column list for `borders` queries.
const COLUMNS: &str = "id, name, asset_path, is_active, sort_order, created_at, updated_at";

/// CRUD for the border theme catalog.
pub struct BorderRepo;

impl BorderRepo {
    /// Create a border theme.
    pub async fn create(pool: &PgPool, input: &NewBorder) -> Result<Border, sqlx::Error> {
        let query = format!(
            "INSERT INTO borders (name, asset_path, sort_order) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Border>(&query)
            .bind(&input.name)
            .bind(&input.asset_path)
            .bind(input.sort_order.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Find a border by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Border>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM borders WHERE id = $1");
        sqlx::query_as::<_, Border>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List borders in catalog order. Inactive ones are hidden from the
    /// kiosk unless explicitly requested.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Border>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM borders \
             WHERE is_active OR $1 \
             ORDER BY sort_order ASC, name ASC"
        );
        sqlx::query_as::<_, Border>(&query)
            .bind(include_inactive)
            .fetch_all(pool)
            .await
    }

    /// Partial field update. Unset DTO fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BorderUpdate,
    ) -> Result<Option<Border>, sqlx::Error> {
        let query = format!(
            "UPDATE borders SET \
                 name = COALESCE($2, name), \
                 asset_path = COALESCE($3, asset_path), \
                 is_active = COALESCE($4, is_active), \
                 sort_order = COALESCE($5, sort_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Border>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.asset_path)
            .bind(input.is_active)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a border. Content referencing it falls back to no border via
    /// ON DELETE SET NULL.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM borders WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
