//! Operational routes: liveness, readiness, version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct StatusBody {
    status: &'static str,
}

#[derive(Serialize)]
struct VersionBody {
    name: &'static str,
    version: &'static str,
}

async fn health() -> Json<StatusBody> {
    Json(StatusBody { status: "ok" })
}

/// Degraded (503) when the database does not answer a trivial query.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<StatusBody>) {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.pool).await {
        Ok(_) => (StatusCode::OK, Json(StatusBody { status: "ok" })),
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StatusBody { status: "degraded" }),
            )
        }
    }
}

async fn version() -> Json<VersionBody> {
    Json(VersionBody {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health, GET /ready (with DB ping), GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_ok() {
        let body = health().await;
        assert_eq!(serde_json::to_value(body.0).unwrap(), serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn version_reports_the_package() {
        let body = version().await;
        assert_eq!(body.0.name, env!("CARGO_PKG_NAME"));
        assert_eq!(body.0.version, env!("CARGO_PKG_VERSION"));
    }
}
