//! Route definitions for computed calendar annotations, mounted at
//! `/calendar`.
//!
//! ```text
//! POST /pillars  -> four stem/branch pillars for an instant
//! POST /luck     -> luck-cycle timeline for a birth instant
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pillars", post(calendar::pillars))
        .route("/luck", post(calendar::luck))
}
