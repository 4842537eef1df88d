// src/bin/api_server.rs

use products_api::infra::config;
use products_api::storage::{PostgresProductStore, SharedStore};
use products_api::transport;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    config::init_tracing();

    let port = config::port()?;
    let frontend_url = config::frontend_url();
    let database_url = config::database_url()?;

    // --- Store Initialization ---
    // The pool is lazy: an unreachable database is logged and the server still starts.
    let store: SharedStore = Arc::new(PostgresProductStore::connect_lazy(&database_url)?);
    products_api::connect_db(store.as_ref()).await;

    if frontend_url.is_none() {
        info!("FRONTEND_URL is not set; cross-origin browser requests will be rejected");
    }

    // --- API Server Initialization ---
    let app_state = transport::http::AppState::new(store);
    let app = transport::http::build_app(app_state, frontend_url.as_deref());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);
    info!("Swagger UI available at http://localhost:{}/docs", port);

    axum::serve(listener, app).await?;
    Ok(())
}
