//! Route definitions for the operator surface.
//!
//! Every handler behind these routes takes the `Operator` extractor.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::{content, maintenance, queue};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /content        -> create_admin_content
/// PUT  /queue/reorder  -> reorder_queue
/// POST /sweep          -> run_sweep
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", post(content::create_admin_content))
        .route("/queue/reorder", put(queue::reorder_queue))
        .route("/sweep", post(maintenance::run_sweep))
}
