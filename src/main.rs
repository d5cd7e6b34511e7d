//! Server entrypoint: settings from env, database bootstrap, router, serve.

use axum::Router;
use product_api::{
    apply_migrations, common_routes, connect, ensure_database_exists, product_routes,
    schema_routes, AppState, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

const BODY_LIMIT_BYTES: usize = 256 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("product_api=info".parse()?))
        .init();

    let settings = Settings::from_env()?;
    if settings.api_token.is_none() {
        tracing::warn!("API_TOKEN not set; mutating requests will be rejected");
    }

    ensure_database_exists(&settings.database_url).await?;
    let pool = connect(&settings.database_url).await?;
    apply_migrations(&pool).await?;

    let bind_addr = settings.bind_addr;
    let state = AppState {
        pool,
        settings: Arc::new(settings),
    };

    let app = Router::new()
        .merge(common_routes(state.clone()))
        .merge(schema_routes())
        .merge(product_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
