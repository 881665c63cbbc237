#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use guild_board::config::Resource;
use guild_board::service::Row;
use guild_board::{app, AppState, DeploymentMode, MemoryStore, ResourceStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, `Value::Null` for an empty body, or the raw text otherwise.
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error")?.get("message")?.as_str()
    }
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), DeploymentMode::Development);
    TestApp {
        router: app(state),
        store,
    }
}

pub fn row(value: Value) -> Row {
    value.as_object().cloned().expect("fixture must be an object")
}

impl TestApp {
    pub async fn seed(&self, resource: &'static Resource, fixtures: &[Value]) -> Vec<Value> {
        let mut out = Vec::new();
        for f in fixtures {
            let inserted = self.store.insert(resource, &row(f.clone())).await.unwrap();
            out.push(Value::Object(inserted));
        }
        out
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> TestResponse {
        self.request("PATCH", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request("DELETE", uri, None).await
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        send(&self.router, req).await
    }
}

pub async fn send(router: &Router, req: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn make_users() -> Vec<Value> {
    vec![
        serde_json::json!({"username": "First user", "password": "pass1", "email_address": "one@test.com", "role": "player"}),
        serde_json::json!({"username": "Second user", "password": "pass2", "email_address": "two@test.com", "role": "dm"}),
        serde_json::json!({"username": "Third user", "password": "pass3", "email_address": "three@test.com", "role": "player"}),
    ]
}

pub fn make_notices() -> Vec<Value> {
    vec![
        serde_json::json!({"message": "First notice", "status": "Open"}),
        serde_json::json!({"message": "Second notice", "status": "Picked Up"}),
        serde_json::json!({"message": "Third notice", "status": "Completed"}),
    ]
}

/// A script-laden record and the escaped form it must be served as.
pub fn malicious_name() -> (&'static str, &'static str) {
    (
        r#"Naughty naughty very naughty <script>alert("xss");</script>"#,
        r#"Naughty naughty very naughty &lt;script&gt;alert("xss");&lt;/script&gt;"#,
    )
}
