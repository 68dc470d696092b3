//! Route definitions for content items.
//!
//! Registration, collaborator callbacks, and play reports are public;
//! listing, patches, schedule, deletion, and the audit trail require the
//! operator key (enforced by the `Operator` extractor in the handlers).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{content, moderation, playback};
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// POST   /                 -> create_content
/// GET    /                 -> list_content (operator)
/// GET    /{id}             -> get_content
/// PATCH  /{id}             -> update_content (operator)
/// DELETE /{id}             -> delete_content (operator)
/// PUT    /{id}/schedule    -> apply_schedule (operator)
/// POST   /{id}/moderation  -> apply_moderation_verdict
/// POST   /{id}/payment     -> apply_payment_update
/// POST   /{id}/play        -> report_play
/// GET    /{id}/plays       -> list_plays (operator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(content::create_content).get(content::list_content),
        )
        .route(
            "/{id}",
            get(content::get_content)
                .patch(content::update_content)
                .delete(content::delete_content),
        )
        .route("/{id}/schedule", put(content::apply_schedule))
        .route("/{id}/moderation", post(moderation::apply_moderation_verdict))
        .route("/{id}/payment", post(moderation::apply_payment_update))
        .route("/{id}/play", post(playback::report_play))
        .route("/{id}/plays", get(playback::list_plays))
}
