//! Common test utilities for HTTP API tests
//!
//! Provides a seeded router and request helpers returning status, headers
//! and a parsed JSON body.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
};
use jsondb::{create_router, MemoryStore, ServerConfig};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub fn seed() -> Value {
    json!({
        "users": [
            {"id": 1, "name": "Phil", "age": 40, "location": "NY"},
            {"id": 2, "name": "Larry", "age": 25, "location": "SF"},
            {"id": 3, "name": "Thomas", "age": 52, "location": "SF"},
            {"id": 4, "name": "Philippe", "age": 23, "location": "London"}
        ],
        "families": [
            {
                "id": 1,
                "familyName": "Smith",
                "address": {"city": "NY"},
                "children": [
                    {"id": 1, "name": "Ann", "age": 4},
                    {"id": 2, "name": "Bob", "age": 9}
                ]
            },
            {
                "id": 2,
                "familyName": "Jones",
                "address": {"city": "SF"},
                "children": [{"id": 1, "name": "Cid", "age": 4}]
            }
        ]
    })
}

/// Helper to create a test app over the seed data
pub fn create_test_app() -> axum::Router {
    let store = MemoryStore::new("id");
    if let Value::Object(collections) = seed() {
        for (name, docs) in collections {
            let docs = docs.as_array().cloned().unwrap_or_default();
            store.put_collection(name, docs);
        }
    }
    create_router(store, &ServerConfig::default())
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!(null));
    (status, headers, json)
}

/// Helper to make a GET request
pub async fn get(app: &axum::Router, path: &str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .header(header::HOST, "localhost:57602")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Helper to make a POST request with a body and content type
pub async fn post(app: &axum::Router, path: &str, content_type: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    let (status, _, json) = send(app, request).await;
    (status, json)
}

pub fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .expect("expected an array")
        .iter()
        .map(|d| d["id"].as_i64().unwrap())
        .collect()
}
