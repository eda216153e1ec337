//! Route definitions for the `/repairs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::repairs;
use crate::state::AppState;

/// Routes mounted at `/repairs`.
///
/// ```text
/// GET, POST         /        -> list_repairs, create_repair
/// GET               /latest  -> latest_repairs
/// GET, PUT, DELETE  /{id}    -> get_repair, update_repair, delete_repair
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(repairs::list_repairs).post(repairs::create_repair))
        .route("/latest", get(repairs::latest_repairs))
        .route(
            "/{id}",
            get(repairs::get_repair)
                .put(repairs::update_repair)
                .delete(repairs::delete_repair),
        )
}
