pub mod products;
pub mod validation;

pub use products::ProductService;
