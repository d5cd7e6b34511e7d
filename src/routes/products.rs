//! Product CRUD routes. Paths carry a trailing slash, matching the original
//! API surface.

use crate::handlers::products::{create, destroy, list, partial_update, retrieve, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products/", get(list).post(create))
        .route(
            "/products/:id/",
            get(retrieve).put(update).patch(partial_update).delete(destroy),
        )
        .with_state(state)
}
