//! Product CRUD handlers: list, retrieve, create, update, partial update, delete.

use crate::error::{AppError, ErrorBody};
use crate::extractors::RequireAuth;
use crate::format::{Payload, Rendered, ResponseFormat};
use crate::model::{Product, ProductInput, ProductPatch};
use crate::pagination::{paginate, Page, Paginated};
use crate::query::{Filters, Ordering};
use crate::service::{validation, ProductService};
use crate::state::AppState;
use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
};
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

/// List products, newest first unless `ordering` says otherwise.
#[utoipa::path(
    get,
    path = "/products/",
    tag = "products",
    params(
        ("ordering" = Option<String>, Query, description = "Sort field: `created_at`, `price` or `name`, with `-` prefix for descending. Default `-created_at`."),
        ("name" = Option<String>, Query, description = "Exact-match name filter"),
        ("price" = Option<String>, Query, description = "Exact-match price filter"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("page_size" = Option<u32>, Query, description = "Rows per page (capped at 100)"),
    ),
    responses(
        (status = 200, description = "One page of products, JSON or XML per Accept", body = Paginated<Product>),
        (status = 404, description = "Page out of range", body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    format: ResponseFormat,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Rendered<Paginated<Product>>, AppError> {
    let filters = Filters {
        name: params.get("name").cloned(),
        price: params.get("price").cloned(),
    };
    if let Some(price) = &filters.price {
        validation::validate_price_filter(price)?;
    }
    // unknown ordering values fall back to the default
    let ordering = params
        .get("ordering")
        .and_then(|s| Ordering::parse(s))
        .unwrap_or_default();
    let page = Page::from_params(
        params.get("page").map(String::as_str),
        params.get("page_size").map(String::as_str),
        state.settings.page_size,
    )?;

    let (count, rows) = ProductService::list(&state.pool, &filters, ordering, &page).await?;
    page.ensure_in_range(count)?;

    let body = paginate(&page, count, uri.path(), uri.query().unwrap_or(""), rows);
    Ok(Rendered::ok(format, body))
}

/// Retrieve one product by id.
#[utoipa::path(
    get,
    path = "/products/{id}/",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "Unknown id", body = ErrorBody),
    )
)]
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    format: ResponseFormat,
) -> Result<Rendered<Product>, AppError> {
    let id = parse_id(&id_str)?;
    let product = ProductService::retrieve(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(Rendered::ok(format, product))
}

/// Create a product. Body may be JSON or XML.
#[utoipa::path(
    post,
    path = "/products/",
    tag = "products",
    request_body(content = ProductInput, description = "Product body, JSON or XML per Content-Type"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Created product with server-assigned id and created_at", body = Product),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 422, description = "Field validation failed", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    format: ResponseFormat,
    _auth: RequireAuth,
    Payload(input): Payload<ProductInput>,
) -> Result<Rendered<Product>, AppError> {
    validation::validate_input(&input)?;
    let product = ProductService::create(&state.pool, &input).await?;
    Ok(Rendered::created(format, product))
}

/// Full update: both name and price are required.
#[utoipa::path(
    put,
    path = "/products/{id}/",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body(content = ProductInput, description = "Product body, JSON or XML per Content-Type"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 422, description = "Field validation failed", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    format: ResponseFormat,
    _auth: RequireAuth,
    Payload(input): Payload<ProductInput>,
) -> Result<Rendered<Product>, AppError> {
    let id = parse_id(&id_str)?;
    validation::validate_input(&input)?;
    let product = ProductService::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(Rendered::ok(format, product))
}

/// Partial update: only supplied fields change.
#[utoipa::path(
    patch,
    path = "/products/{id}/",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    request_body(content = ProductPatch, description = "Subset of product fields, JSON or XML per Content-Type"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 422, description = "Field validation failed", body = ErrorBody),
    )
)]
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    format: ResponseFormat,
    _auth: RequireAuth,
    Payload(patch): Payload<ProductPatch>,
) -> Result<Rendered<Product>, AppError> {
    let id = parse_id(&id_str)?;
    validation::validate_patch(&patch)?;
    let product = ProductService::patch(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(Rendered::ok(format, product))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/products/{id}/",
    tag = "products",
    params(("id" = i64, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Deleted, no body"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
    )
)]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    _auth: RequireAuth,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    if !ProductService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(id_str));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_parsing() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(parse_id("pencil").is_err());
        assert!(parse_id("").is_err());
    }
}
