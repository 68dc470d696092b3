//! Border theme entity models and DTOs.

use serde::{Deserialize, Serialize};
use showyo_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `borders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Border {
    pub id: DbId,
    pub name: String,
    pub asset_path: String,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a border via `POST /api/v1/borders`.
#[derive(Debug, Deserialize)]
pub struct NewBorder {
    pub name: String,
    pub asset_path: String,
    pub sort_order: Option<i32>,
}

/// DTO for patching a border via `PATCH /api/v1/borders/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct BorderUpdate {
    pub name: Option<String>,
    pub asset_path: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}
