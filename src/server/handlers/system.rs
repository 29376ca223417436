use crate::storage::DocumentStore;
use axum::{extract::State, response::Json};
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

pub async fn health_check() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_collections(State(state): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({ "collections": state.store.collection_names() }))
}
