//! The error-shaping gate.
//!
//! Layered onto every method route that declares rules. When a rule reads the
//! body and the request is `application/json`, the body is buffered and parsed
//! once. The route's rules then run and the gate either answers
//! `400 { errors }` itself or forwards the request with the parsed body
//! attached as [`ValidatedBody`].

use crate::transport::http::error::ApiError;
use crate::transport::http::types::{ValidatedBody, ValidationErrorResponse};
use crate::transport::http::validation::{validate, FieldError, Location, RequestFields, Rule};
use axum::body::{to_bytes, Body};
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

const MAX_BODY_BYTES: usize = 100 * 1024;

/// Accumulated validation failures for one request.
#[derive(Debug)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse { errors: self.0 }),
        )
            .into_response()
    }
}

/// Parses a request body. An empty body is treated as `{}`.
pub fn parse_body(bytes: &[u8]) -> Result<JsonValue, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(empty_object());
    }
    let value: JsonValue =
        serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
    if !value.is_object() {
        return Err(ApiError::MalformedBody("expected a JSON object".to_string()));
    }
    Ok(value)
}

/// Whether any rule reads from the request body.
fn reads_body(rules: &[Rule]) -> bool {
    rules.iter().any(|rule| rule.location == Location::Body)
}

/// Only `application/json` bodies are parsed; anything else counts as `{}`.
fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

fn empty_object() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

pub async fn validation_gate(
    State(rules): State<&'static [Rule]>,
    params: Option<Path<HashMap<String, String>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let params = params.map(|Path(p)| p).unwrap_or_default();

    let body = if reads_body(rules) && is_json_content(request.headers()) {
        let (parts, body) = request.into_parts();
        let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
            Ok(b) => b,
            Err(e) => return ApiError::MalformedBody(e.to_string()).into_response(),
        };
        let parsed = match parse_body(&bytes) {
            Ok(v) => v,
            Err(e) => return e.into_response(),
        };
        request = Request::from_parts(parts, Body::from(bytes));
        parsed
    } else {
        empty_object()
    };

    let errors = validate(
        rules,
        &RequestFields {
            params: &params,
            body: &body,
        },
    );
    if !errors.is_empty() {
        tracing::debug!(
            method = %request.method(),
            uri = %request.uri(),
            count = errors.len(),
            "Request failed validation"
        );
        return ValidationErrors(errors).into_response();
    }

    request.extensions_mut().insert(ValidatedBody(body));
    next.run(request).await
}
