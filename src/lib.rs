//! Product API: REST CRUD for a product catalog with JSON/XML negotiation,
//! pagination, filtering, ordering, token-gated writes and OpenAPI docs.

pub mod db;
pub mod error;
pub mod extractors;
pub mod format;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod openapi;
pub mod pagination;
pub mod query;
pub mod routes;
pub mod service;
pub mod settings;
pub mod state;

pub use db::{connect, ensure_database_exists};
pub use error::AppError;
pub use migration::apply_migrations;
pub use model::{Product, ProductInput, ProductPatch};
pub use openapi::ApiDoc;
pub use routes::{common_routes, product_routes, schema_routes};
pub use service::ProductService;
pub use settings::Settings;
pub use state::AppState;
