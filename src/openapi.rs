//! OpenAPI document generated from the handler annotations.

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::error::ErrorBody;
use crate::handlers::products;
use crate::model::{Product, ProductInput, ProductPatch};
use crate::pagination::Paginated;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product API",
        version = "0.1.0",
        description = "Product catalog CRUD with pagination, filtering, ordering and JSON/XML negotiation. Reads are open; writes require a bearer token."
    ),
    paths(
        products::list,
        products::retrieve,
        products::create,
        products::update,
        products::partial_update,
        products::destroy,
    ),
    components(schemas(
        Product,
        ProductInput,
        ProductPatch,
        Paginated<Product>,
        ErrorBody,
    )),
    tags(
        (name = "products", description = "Product catalog"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the bearer scheme referenced by the mutating operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
