//! Expiry sweep worker for the ShowYo billboard engine.
//!
//! Exposes [`sweeper::sweep_once`] so the API's manual trigger endpoint and
//! the standalone worker binary run exactly the same pass.

pub mod sweeper;

pub use sweeper::{sweep_once, Sweeper};
