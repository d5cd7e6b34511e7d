pub mod common;
pub mod products;
pub mod schema;

pub use common::common_routes;
pub use products::product_routes;
pub use schema::schema_routes;
