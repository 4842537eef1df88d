use crate::domain::Product;
use crate::storage::SharedStore;
use crate::transport::http::validation::FieldError;
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

/// Request body, parsed once by the validation gate and handed to the handler.
#[derive(Debug, Clone)]
pub struct ValidatedBody(pub JsonValue);

impl ValidatedBody {
    pub fn field(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProductResponse {
    pub data: Product,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "Producto eliminado")]
    pub data: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Producto no encontrado")]
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Documentation-only shape of the create body. Validation runs on the raw JSON.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Kayn Snow Moon")]
    pub name: String,
    #[schema(example = 15)]
    pub price: f64,
}

/// Documentation-only shape of the full-update body.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Kayn Snow Moon")]
    pub name: String,
    #[schema(example = 15)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
