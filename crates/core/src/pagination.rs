//! List pagination clamps shared by every listing endpoint.

/// Default page size for listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Hard ceiling for a single page.
pub const MAX_LIST_LIMIT: i64 = 200;

/// Clamp a requested limit into `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
