//! Repository for the `displays` table.

use sqlx::PgPool;

use showyo_core::types::DbId;

use crate::models::display::{Display, DisplayUpdate, NewDisplay};

/// Column list for `displays` queries.
const COLUMNS: &str =
    "id, name, location, default_photo_duration_secs, is_active, created_at, updated_at";

/// CRUD for the kiosk/display registry.
pub struct DisplayRepo;

impl DisplayRepo {
    /// Register a display.
    pub async fn create(pool: &PgPool, input: &NewDisplay) -> Result<Display, sqlx::Error> {
        let query = format!(
            "INSERT INTO displays (name, location, default_photo_duration_secs) \
             VALUES ($1, $2, COALESCE($3, 15)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Display>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(input.default_photo_duration_secs)
            .fetch_one(pool)
            .await
    }

    /// Find a display by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Display>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM displays WHERE id = $1");
        sqlx::query_as::<_, Display>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every registered display.
    pub async fn list(pool: &PgPool) -> Result<Vec<Display>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM displays ORDER BY name ASC");
        sqlx::query_as::<_, Display>(&query).fetch_all(pool).await
    }

    /// Partial settings update. Unset DTO fields keep their current value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &DisplayUpdate,
    ) -> Result<Option<Display>, sqlx::Error> {
        let query = format!(
            "UPDATE displays SET \
                 name = COALESCE($2, name), \
                 location = COALESCE($3, location), \
                 default_photo_duration_secs = COALESCE($4, default_photo_duration_secs), \
                 is_active = COALESCE($5, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Display>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(input.default_photo_duration_secs)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
