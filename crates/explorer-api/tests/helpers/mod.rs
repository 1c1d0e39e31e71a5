//! Shared test helpers for API integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use explorer_api::build_app;
use explorer_core::config::AppConfig;
use explorer_database::MemoryNodeStore;

/// Test application backed by a fresh in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        Self {
            router: build_app(AppConfig::default(), Arc::new(MemoryNodeStore::new())),
        }
    }

    /// Make an HTTP request with an optional JSON body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str).await
    }

    /// Make an HTTP request with a raw body
    pub async fn raw_request(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a node through the API and return its id
    pub async fn create(&self, kind: &str, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/{kind}"),
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No id in create response")
            .to_string()
    }

    /// Names returned by `GET /api/tree`, in order
    pub async fn tree_names(&self) -> Vec<String> {
        let response = self.request("GET", "/api/tree", None).await;
        assert_eq!(response.status, StatusCode::OK);
        response.body["data"]
            .as_array()
            .expect("tree data is an array")
            .iter()
            .filter_map(|n| n["name"].as_str().map(str::to_string))
            .collect()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
