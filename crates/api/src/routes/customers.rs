//! Route definitions for the `/customers` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// Routes mounted at `/customers`.
///
/// ```text
/// GET, POST         /              -> list_customers, create_customer
/// GET               /latest        -> latest_customers
/// GET, PUT, DELETE  /{id}          -> get_customer, update_customer, delete_customer
/// GET               /{id}/repairs  -> list_customer_repairs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route("/latest", get(customers::latest_customers))
        .route(
            "/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/{id}/repairs", get(customers::list_customer_repairs))
}
