//! Domain logic for the ShowYo billboard engine.
//!
//! This crate has zero internal dependencies so the API, repositories, and
//! the sweep worker can all share the same rules without pulling in sqlx or
//! axum. Everything here is pure: callers supply the clock.

pub mod error;
pub mod hashing;
pub mod lifecycle;
pub mod media;
pub mod pagination;
pub mod playback;
pub mod schedule;
pub mod status;
pub mod types;
pub mod visibility;
