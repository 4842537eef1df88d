//! End-to-end tests for the product routes, served in-process on an ephemeral
//! port and backed by the in-memory store.

use products_api::transport;
use products_api::{InMemoryProductStore, SharedStore};
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with(Arc::new(InMemoryProductStore::new()), None).await
    }

    async fn start_with(store: SharedStore, frontend_url: Option<&str>) -> Self {
        let app = transport::http::build_app(transport::http::AppState::new(store), frontend_url);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, name: &str, price: f64) -> JsonValue {
        let res = self
            .client
            .post(self.url("/api/products"))
            .json(&json!({ "name": name, "price": price }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
        res.json::<JsonValue>().await.unwrap()["data"].clone()
    }
}

async fn body(res: reqwest::Response) -> JsonValue {
    res.json::<JsonValue>().await.unwrap()
}

// --- POST /api/products ---

#[tokio::test]
async fn create_with_empty_body_reports_four_errors() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = body(res).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn create_without_any_body_is_validated_like_an_empty_object() {
    let server = TestServer::start().await;
    let res = server.client.post(server.url("/api/products")).send().await.unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(body(res).await["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn create_rejects_zero_price_with_one_error() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .json(&json!({ "name": "Lapto MSI", "price": 0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = body(res).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["msg"], "El precio no es valido");
    assert_eq!(errors[0]["path"], "price");
    assert_eq!(errors[0]["location"], "body");
}

#[tokio::test]
async fn create_rejects_non_numeric_price_with_two_errors() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .json(&json!({ "name": "Lapto MSI", "price": "hola" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = body(res).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["msg"], "el valor no es valido");
    assert_eq!(errors[1]["msg"], "El precio no es valido");
}

#[tokio::test]
async fn create_returns_the_new_product() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .json(&json!({ "name": "Kayn Snow Moon - testing", "price": 15 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    let body = body(res).await;
    assert!(body.get("error").is_none());
    let data = &body["data"];
    assert_eq!(data["name"], "Kayn Snow Moon - testing");
    assert_eq!(data["price"].as_f64(), Some(15.0));
    assert_eq!(data["availability"], true);
    assert!(data["id"].as_i64().is_some());
}

#[tokio::test]
async fn create_accepts_numeric_strings_for_price() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .json(&json!({ "name": "Silla", "price": "49.90" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    assert_eq!(body(res).await["data"]["price"].as_f64(), Some(49.9));
}

#[tokio::test]
async fn malformed_json_body_is_a_bad_request() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(body(res).await["error"], "JSON no valido");
}

#[tokio::test]
async fn form_encoded_create_is_validated_like_an_empty_object() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("name=Silla&price=5")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(body(res).await["errors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn create_accepts_large_integral_price() {
    let server = TestServer::start().await;
    let res = server
        .client
        .post(server.url("/api/products"))
        .header("content-type", "application/json")
        .body(r#"{"name":"Servidor","price":1e16}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    assert_eq!(body(res).await["data"]["price"].as_f64(), Some(1e16));
}

#[tokio::test]
async fn invalid_id_with_non_json_body_reports_only_the_id() {
    let server = TestServer::start().await;
    let url = server.url("/api/products/abc");

    for builder in [
        server.client.get(&url),
        server.client.patch(&url),
        server.client.delete(&url),
    ] {
        let res = builder
            .header("content-type", "text/plain")
            .body("x")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 400);
        let body = body(res).await;
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["msg"], "El id no es valido");
    }
}

#[tokio::test]
async fn id_routes_ignore_unparseable_json_bodies() {
    let server = TestServer::start().await;
    let id = server.create("Lampara", 20.0).await["id"].as_i64().unwrap();

    let res = server
        .client
        .patch(server.url(&format!("/api/products/{}", id)))
        .header("content-type", "application/json")
        .body("{\"broken")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(body(res).await["data"]["availability"], false);
}

// --- GET /api/products ---

#[tokio::test]
async fn list_returns_json_newest_first() {
    let server = TestServer::start().await;
    server.create("Primero", 10.0).await;
    server.create("Segundo", 20.0).await;

    let res = server.client.get(server.url("/api/products")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let content_type = res.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.contains("json"));

    let body = body(res).await;
    assert!(body.get("errors").is_none());
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Segundo");
    assert_eq!(data[1]["name"], "Primero");
}

// --- GET /api/products/:id ---

#[tokio::test]
async fn get_unknown_product_is_not_found() {
    let server = TestServer::start().await;
    let res = server.client.get(server.url("/api/products/2000")).send().await.unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(body(res).await["error"], "Producto no encontrado");
}

#[tokio::test]
async fn get_with_invalid_id_reports_one_error() {
    let server = TestServer::start().await;
    let res = server
        .client
        .get(server.url("/api/products/not-valid-url"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = body(res).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["msg"], "El id no es valido");
    assert_eq!(errors[0]["location"], "params");
    assert_eq!(errors[0]["value"], "not-valid-url");
}

#[tokio::test]
async fn get_existing_product() {
    let server = TestServer::start().await;
    let created = server.create("Monitor", 300.0).await;

    let res = server
        .client
        .get(server.url(&format!("/api/products/{}", created["id"])))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(body(res).await["data"], created);
}

#[tokio::test]
async fn integer_id_beyond_column_range_is_not_found() {
    let server = TestServer::start().await;
    let res = server
        .client
        .get(server.url("/api/products/99999999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

// --- PUT /api/products/:id ---

#[tokio::test]
async fn update_with_invalid_id_reports_only_the_id() {
    let server = TestServer::start().await;
    let res = server
        .client
        .put(server.url("/api/products/not-valid-url"))
        .json(&json!({ "name": "Viseryon", "availability": true, "price": 7 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = body(res).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["msg"], "El id no es valido");
}

#[tokio::test]
async fn update_with_empty_body_reports_five_errors() {
    let server = TestServer::start().await;
    server.create("Monitor", 300.0).await;

    let res = server
        .client
        .put(server.url("/api/products/1"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = body(res).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 5);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn update_rejects_negative_price() {
    let server = TestServer::start().await;
    server.create("Monitor", 300.0).await;

    let res = server
        .client
        .put(server.url("/api/products/1"))
        .json(&json!({ "name": "Viseryon", "availability": true, "price": -7 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body = body(res).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["msg"], "El precio no es valido");
}

#[tokio::test]
async fn update_unknown_product_is_not_found() {
    let server = TestServer::start().await;
    let res = server
        .client
        .put(server.url("/api/products/2000"))
        .json(&json!({ "name": "Viseryon", "availability": true, "price": 7 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let body = body(res).await;
    assert_eq!(body["error"], "Producto no encontrado");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let server = TestServer::start().await;
    let created = server.create("Monitor", 300.0).await;

    let res = server
        .client
        .put(server.url("/api/products/1"))
        .json(&json!({ "name": "Viseryon", "availability": false, "price": 7 }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body = body(res).await;
    assert!(body.get("errors").is_none());
    let data = &body["data"];
    assert_eq!(data["id"], created["id"]);
    assert_eq!(data["name"], "Viseryon");
    assert_eq!(data["price"].as_f64(), Some(7.0));
    assert_eq!(data["availability"], false);
    assert_eq!(data["createdAt"], created["createdAt"]);
}

// --- PATCH /api/products/:id ---

#[tokio::test]
async fn patch_unknown_product_is_not_found() {
    let server = TestServer::start().await;
    let res = server.client.patch(server.url("/api/products/2000")).send().await.unwrap();

    assert_eq!(res.status(), 404);
    let body = body(res).await;
    assert_eq!(body["error"], "Producto no encontrado");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn patch_toggles_availability_back_and_forth() {
    let server = TestServer::start().await;
    server.create("Monitor", 300.0).await;

    let first = server.client.patch(server.url("/api/products/1")).send().await.unwrap();
    assert_eq!(first.status(), 200);
    assert_eq!(body(first).await["data"]["availability"], false);

    let second = server.client.patch(server.url("/api/products/1")).send().await.unwrap();
    assert_eq!(second.status(), 200);
    assert_eq!(body(second).await["data"]["availability"], true);
}

#[tokio::test]
async fn patch_with_invalid_id_is_a_validation_error() {
    let server = TestServer::start().await;
    let res = server.client.patch(server.url("/api/products/abc")).send().await.unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(body(res).await["errors"][0]["msg"], "El id no es valido");
}

// --- DELETE /api/products/:id ---

#[tokio::test]
async fn delete_with_invalid_id_is_a_validation_error() {
    let server = TestServer::start().await;
    let res = server
        .client
        .delete(server.url("/api/products/not-valid"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    assert_eq!(body(res).await["errors"][0]["msg"], "El id no es valido");
}

#[tokio::test]
async fn delete_unknown_product_is_not_found() {
    let server = TestServer::start().await;
    let res = server.client.delete(server.url("/api/products/2000")).send().await.unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(body(res).await["error"], "Producto no encontrado");
}

#[tokio::test]
async fn delete_removes_the_product() {
    let server = TestServer::start().await;
    server.create("Monitor", 300.0).await;

    let res = server.client.delete(server.url("/api/products/1")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(body(res).await["data"], "Producto eliminado");

    let res = server.client.get(server.url("/api/products/1")).send().await.unwrap();
    assert_eq!(res.status(), 404);
}

// --- ambient surface ---

#[tokio::test]
async fn health_reports_ok_for_reachable_store() {
    let server = TestServer::start().await;
    let res = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(body(res).await["status"], "ok");
}

#[tokio::test]
async fn openapi_document_lists_product_paths() {
    let server = TestServer::start().await;
    let res = server
        .client
        .get(server.url("/api-docs/openapi.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let doc = body(res).await;
    assert!(doc["paths"].get("/api/products").is_some());
    assert!(doc["paths"].get("/api/products/{id}").is_some());
}

#[tokio::test]
async fn foreign_origin_is_rejected() {
    let server = TestServer::start_with(
        Arc::new(InMemoryProductStore::new()),
        Some("http://localhost:5173"),
    )
    .await;

    let res = server
        .client
        .get(server.url("/api/products"))
        .header("origin", "http://evil.example")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 403);
    assert_eq!(body(res).await["error"], "Error de CORS");
}

#[tokio::test]
async fn configured_origin_is_allowed() {
    let server = TestServer::start_with(
        Arc::new(InMemoryProductStore::new()),
        Some("http://localhost:5173"),
    )
    .await;

    let res = server
        .client
        .get(server.url("/api/products"))
        .header("origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["access-control-allow-origin"].to_str().unwrap(),
        "http://localhost:5173"
    );
}
