use crate::domain::Product;
use crate::transport::http::gate::validation_gate;
use crate::transport::http::handlers::{health, products};
use crate::transport::http::types::{
    AppState, CreateProductRequest, DeletedResponse, ErrorResponse, HealthResponse,
    ProductListResponse, ProductResponse, UpdateProductRequest, ValidationErrorResponse,
};
use crate::transport::http::validation::{
    FieldError, Location, CREATE_PRODUCT_RULES, PRODUCT_ID_RULES, UPDATE_PRODUCT_RULES,
};
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{from_fn_with_state, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const MSG_CORS: &str = "Error de CORS";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Rust / Axum",
        version = "1.0.0",
        description = "API Docs for products"
    ),
    tags(
        (name = "Products", description = "API operations related to products")
    ),
    paths(
        health::healthcheck_handler,
        products::get_products_handler,
        products::get_product_by_id_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::update_availability_handler,
        products::delete_product_handler
    ),
    components(schemas(
        Product,
        ProductResponse,
        ProductListResponse,
        DeletedResponse,
        ErrorResponse,
        ValidationErrorResponse,
        FieldError,
        Location,
        CreateProductRequest,
        UpdateProductRequest,
        HealthResponse
    ))
)]
pub struct ApiDoc;

/// Routing table: verb + path + rule set (through the validation gate) + handler.
pub fn create_router(app_state: AppState) -> Router {
    let collection = get(products::get_products_handler).merge(
        post(products::create_product_handler)
            .layer(from_fn_with_state(CREATE_PRODUCT_RULES, validation_gate)),
    );

    let item = get(products::get_product_by_id_handler)
        .layer(from_fn_with_state(PRODUCT_ID_RULES, validation_gate))
        .merge(
            put(products::update_product_handler)
                .layer(from_fn_with_state(UPDATE_PRODUCT_RULES, validation_gate)),
        )
        .merge(
            patch(products::update_availability_handler)
                .layer(from_fn_with_state(PRODUCT_ID_RULES, validation_gate)),
        )
        .merge(
            delete(products::delete_product_handler)
                .layer(from_fn_with_state(PRODUCT_ID_RULES, validation_gate)),
        );

    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/products", collection)
        .route("/api/products/:id", item)
        .with_state(app_state)
}

/// Rejects requests whose `Origin` is not the configured frontend.
///
/// Requests without an `Origin` header are not cross-origin and pass through.
pub async fn reject_foreign_origin(
    State(allowed): State<Option<HeaderValue>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if allowed.as_ref() != Some(origin) {
            tracing::warn!(origin = ?origin, "Rejected cross-origin request");
            return (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: MSG_CORS.to_string(),
                }),
            )
                .into_response();
        }
    }
    next.run(request).await
}

fn cors_layer(allowed: Option<HeaderValue>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);
    match allowed {
        Some(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        None => cors,
    }
}

/// The full application: routes, API docs, CORS policy and request tracing.
pub fn build_app(app_state: AppState, frontend_url: Option<&str>) -> Router {
    let allowed = frontend_url.and_then(|url| match HeaderValue::from_str(url) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::error!(error = %e, url, "FRONTEND_URL is not a valid origin; all origins will be rejected");
            None
        }
    });

    create_router(app_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(from_fn_with_state(allowed.clone(), reject_foreign_origin))
        .layer(cors_layer(allowed))
        .layer(TraceLayer::new_for_http())
}
