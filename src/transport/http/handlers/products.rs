//! Product handlers. Each one runs behind the validation gate, so inputs are
//! already known to satisfy the route's rules.

use crate::domain::{toggle_availability, NewProduct, Product, ProductChanges};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{
    AppState, CreateProductRequest, DeletedResponse, ErrorResponse, ProductListResponse,
    ProductResponse, UpdateProductRequest, ValidatedBody, ValidationErrorResponse,
};
use crate::transport::http::validation::{coerce_bool, coerce_number, text_of};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use tracing::{info, instrument, warn};

pub const MSG_DELETED: &str = "Producto eliminado";

/// Path ids that pass the integer rule but exceed the column range cannot
/// match a row, so they resolve to not-found without a store call.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>().map_err(|_| {
        warn!(id = raw, "Product id out of range");
        ApiError::NotFound
    })
}

async fn find_product(state: &AppState, id: i32) -> Result<Product, ApiError> {
    match state.store.find_by_pk(id).await? {
        Some(product) => Ok(product),
        None => {
            warn!(id, "Product not found");
            Err(ApiError::NotFound)
        }
    }
}

fn required_price(body: &ValidatedBody) -> Result<f64, ApiError> {
    coerce_number(body.field("price"))
        .ok_or_else(|| ApiError::MalformedBody("price is not a number".to_string()))
}

fn new_product_from(body: &ValidatedBody) -> Result<NewProduct, ApiError> {
    Ok(NewProduct {
        name: text_of(body.field("name")),
        price: required_price(body)?,
    })
}

fn changes_from(body: &ValidatedBody) -> Result<ProductChanges, ApiError> {
    let availability = coerce_bool(body.field("availability"))
        .ok_or_else(|| ApiError::MalformedBody("availability is not a boolean".to_string()))?;
    Ok(ProductChanges {
        name: text_of(body.field("name")),
        price: required_price(body)?,
        availability,
    })
}

/// Get a list of products, newest first.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Successful response", body = ProductListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(name = "handler::get_products", skip(state))]
pub async fn get_products_handler(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let products = state.store.find_all().await?;
    info!(count = products.len(), "Fetched products");
    Ok(Json(ProductListResponse { data: products }))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "The ID of the product to retrieve")
    ),
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 400, description = "Bad request - Invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
#[instrument(name = "handler::get_product_by_id", skip(state))]
pub async fn get_product_by_id_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = find_product(&state, parse_id(&id)?).await?;
    Ok(Json(ProductResponse { data: product }))
}

/// Creates a new product
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Successful response", body = ProductResponse),
        (status = 400, description = "Bad request - invalid input data", body = ValidationErrorResponse)
    )
)]
#[instrument(name = "handler::create_product", skip(state, body))]
pub async fn create_product_handler(
    State(state): State<AppState>,
    Extension(body): Extension<ValidatedBody>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state.store.create(new_product_from(&body)?).await?;
    info!(id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(ProductResponse { data: product })))
}

/// Update a product with user input
///
/// Replaces name, price and availability.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "The ID of the product to update")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 400, description = "Bad Request - Invalid ID or Invalid input data", body = ValidationErrorResponse),
        (status = 404, description = "Product Not Found", body = ErrorResponse)
    )
)]
#[instrument(name = "handler::update_product", skip(state, body))]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(body): Extension<ValidatedBody>,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut product = find_product(&state, parse_id(&id)?).await?;
    product.apply(changes_from(&body)?);

    let saved = state.store.save(&product).await?.ok_or(ApiError::NotFound)?;
    info!(id = saved.id, "Product updated");
    Ok(Json(ProductResponse { data: saved }))
}

/// Update product availability
///
/// Flips the availability flag of an existing product.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "The ID of the product to toggle")
    ),
    responses(
        (status = 200, description = "Successful response", body = ProductResponse),
        (status = 400, description = "Bad Request - Invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Product Not Found", body = ErrorResponse)
    )
)]
#[instrument(name = "handler::update_availability", skip(state))]
pub async fn update_availability_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = toggle_availability(find_product(&state, parse_id(&id)?).await?);

    let saved = state.store.save(&product).await?.ok_or(ApiError::NotFound)?;
    info!(id = saved.id, availability = saved.availability, "Product availability toggled");
    Ok(Json(ProductResponse { data: saved }))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(
        ("id" = i32, Path, description = "The ID of the product to delete")
    ),
    responses(
        (status = 200, description = "Successful response", body = DeletedResponse),
        (status = 400, description = "Bad Request - Invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Product Not Found", body = ErrorResponse)
    )
)]
#[instrument(name = "handler::delete_product", skip(state))]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let product = find_product(&state, parse_id(&id)?).await?;

    if !state.store.destroy(product.id).await? {
        return Err(ApiError::NotFound);
    }
    info!(id = product.id, "Product deleted");
    Ok(Json(DeletedResponse {
        data: MSG_DELETED.to_string(),
    }))
}
