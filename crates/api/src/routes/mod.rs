pub mod admin;
pub mod borders;
pub mod content;
pub mod displays;
pub mod health;
pub mod queue;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /content                       register upload (public), list (operator)
/// /content/{id}                  get (public), patch/delete (operator)
/// /content/{id}/schedule         apply validated schedule (operator)
/// /content/{id}/moderation       moderation collaborator callback
/// /content/{id}/payment          payment collaborator callback
/// /content/{id}/play             play report from a display client
/// /content/{id}/plays            play audit listing (operator)
///
/// /queue                         live playlist, default display
///
/// /displays                      list (public), register (operator)
/// /displays/{id}                 get (public), settings patch (operator)
/// /displays/{id}/queue           live playlist for one display
///
/// /borders                       list (public), create (operator)
/// /borders/{id}                  get (public), patch/delete (operator)
///
/// /admin/content                 admin upload: skips payment/moderation
/// /admin/queue/reorder           bulk reorder (PUT)
/// /admin/sweep                   manual expiry sweep (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/content", content::router())
        .nest("/queue", queue::router())
        .nest("/displays", displays::router())
        .nest("/borders", borders::router())
        .nest("/admin", admin::router())
}
