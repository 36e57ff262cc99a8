//! Route definitions for myeongsik records, mounted at `/myeongsik`.
//!
//! ```text
//! GET    /                -> list
//! POST   /                -> create
//! POST   /delete          -> delete (soft, body-addressed)
//! PUT    /{id}            -> update
//! DELETE /{id}            -> hard_delete
//! POST   /{id}/restore    -> restore
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::myeongsik;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(myeongsik::list).post(myeongsik::create))
        .route("/delete", post(myeongsik::delete))
        .route(
            "/{id}",
            put(myeongsik::update).delete(myeongsik::hard_delete),
        )
        .route("/{id}/restore", post(myeongsik::restore))
}
