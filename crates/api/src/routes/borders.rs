//! Route definitions for the border theme catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::borders;
use crate::state::AppState;

/// Routes mounted at `/borders`.
///
/// ```text
/// GET    /      -> list_borders
/// POST   /      -> create_border (operator)
/// GET    /{id}  -> get_border
/// PATCH  /{id}  -> update_border (operator)
/// DELETE /{id}  -> delete_border (operator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(borders::list_borders).post(borders::create_border),
        )
        .route(
            "/{id}",
            get(borders::get_border)
                .patch(borders::update_border)
                .delete(borders::delete_border),
        )
}
