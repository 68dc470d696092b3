//! Display registry entity models and DTOs.

use serde::{Deserialize, Serialize};
use showyo_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// The display seeded by the initial migration. Content and queue queries
/// fall back to it when no display is named.
pub const DEFAULT_DISPLAY_ID: DbId = 1;

/// A row from the `displays` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Display {
    pub id: DbId,
    pub name: String,
    pub location: Option<String>,
    pub default_photo_duration_secs: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a display via `POST /api/v1/displays`.
#[derive(Debug, Deserialize)]
pub struct NewDisplay {
    pub name: String,
    pub location: Option<String>,
    pub default_photo_duration_secs: Option<i32>,
}

/// DTO for patching display settings via `PATCH /api/v1/displays/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct DisplayUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub default_photo_duration_secs: Option<i32>,
    pub is_active: Option<bool>,
}
