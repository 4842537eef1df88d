pub mod error;
pub mod gate;
pub mod router;
pub mod types;
pub mod validation;
pub mod handlers {
    pub mod health;
    pub mod products;
}

pub use error::ApiError;
pub use router::{build_app, create_router, ApiDoc};
pub use types::AppState;
