//! Static-key operator authentication extractor.
//!
//! The admin dashboard and maintenance tooling authenticate with a single
//! operator API key sent as a Bearer token. Only the key's SHA-256 digest
//! lives in the server configuration; the presented key is hashed and the
//! digests compared.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use showyo_core::error::CoreError;
use showyo_core::hashing::sha256_hex;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the operator API key.
///
/// Use this as an extractor parameter in any handler reserved for the
/// admin dashboard:
///
/// ```ignore
/// async fn operator_only(_op: Operator) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Operator;

impl FromRequestParts<AppState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let key = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <key>".into(),
            ))
        })?;

        if sha256_hex(key.as_bytes()) != state.config.admin_api_key_sha256 {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid operator API key".into(),
            )));
        }

        Ok(Operator)
    }
}
