//! Serves the generated OpenAPI document.

use crate::openapi::ApiDoc;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /api/schema/ returns the OpenAPI document as JSON.
pub fn schema_routes() -> Router {
    Router::new().route("/api/schema/", get(openapi_json))
}
