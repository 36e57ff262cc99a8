pub mod calendar;
pub mod health;
pub mod myeongsik;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /myeongsik                      list (GET, optional auth), create (POST)
/// /myeongsik/delete               soft-delete by body id (POST)
/// /myeongsik/{id}                 update (PUT), hard-delete (DELETE)
/// /myeongsik/{id}/restore         restore soft-deleted record (POST)
///
/// /calendar/pillars               four pillars for an instant (POST)
/// /calendar/luck                  luck timeline for a birth (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/myeongsik", myeongsik::router())
        .nest("/calendar", calendar::router())
}
