//! Route definitions for the display registry.

use axum::routing::get;
use axum::Router;

use crate::handlers::{displays, queue};
use crate::state::AppState;

/// Routes mounted at `/displays`.
///
/// ```text
/// GET   /            -> list_displays
/// POST  /            -> create_display (operator)
/// GET   /{id}        -> get_display
/// PATCH /{id}        -> update_display (operator)
/// GET   /{id}/queue  -> get_display_queue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(displays::list_displays).post(displays::create_display),
        )
        .route(
            "/{id}",
            get(displays::get_display).patch(displays::update_display),
        )
        .route("/{id}/queue", get(queue::get_display_queue))
}
