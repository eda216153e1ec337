pub mod auth;
pub mod customers;
pub mod health;
pub mod repairs;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/logout                   logout (public, clears cookie)
/// /auth/me                       profile
/// /auth/password                 change password
///
/// /customers                     list, create
/// /customers/latest              newest customers
/// /customers/{id}                get, update, delete
/// /customers/{id}/repairs        repairs of one customer
///
/// /repairs                       list, create
/// /repairs/latest                newest repairs
/// /repairs/{id}                  get, update, delete
///
/// /stats                         per-user statistics
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/customers", customers::router())
        .nest("/repairs", repairs::router())
        .nest("/stats", stats::router())
}
