//! Fixture HTTP server for exercising the request builder over real HTTP.
//!
//! Each route returns one response shape the builder has to handle: JSON,
//! `application/text`, an unsupported content type, malformed JSON, a 404,
//! and an echo route that reflects what the client sent.

use axum::{
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::{any, delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub authorization: Option<String>,
    pub connection: Option<String>,
    pub content_type: Option<String>,
    pub trace: Option<String>,
    pub body: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/json", get(json_body))
        .route("/text", get(text_body))
        .route("/html", get(html_body))
        .route("/broken-json", get(broken_json))
        .route("/users/{id}", get(get_user))
        .route("/search/{q}", get(search))
        .route("/items/{id}", delete(delete_item))
        .route("/echo", any(echo))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn json_body() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "a": 1 }))
}

async fn text_body() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/text")], "hello there")
}

async fn html_body() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html")], "<p>hello</p>")
}

async fn broken_json() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "{\"a\":")
}

async fn get_user(Path(id): Path<u64>) -> Result<Json<User>, StatusCode> {
    if id == 0 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(User {
        id,
        name: format!("user-{id}"),
    }))
}

async fn search(Path(q): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "q": q }))
}

async fn delete_item(Path(id): Path<u64>) -> StatusCode {
    tracing::debug!(id, "deleting item");
    if id == 0 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Echo> {
    let value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let body = if body.is_empty() {
        None
    } else {
        Some(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    };
    Json(Echo {
        method: method.to_string(),
        authorization: value("authorization"),
        connection: value("connection"),
        content_type: value("content-type"),
        trace: value("x-trace"),
        body,
    })
}
