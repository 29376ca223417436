use axum::http::Method;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::*;
use crate::config::ServerConfig;
use crate::storage::DocumentStore;

pub fn create_router<S>(store: S, config: &ServerConfig) -> Router
where
    S: DocumentStore + 'static,
{
    let state = AppState {
        store: Arc::new(store),
    };

    let router = Router::new()
        .route("/health", get(health_check))
        // REST routes
        .route("/api", get(list_collections))
        .route("/api/{collection}", get(query_collection))
        .route("/api/{collection}/{*path}", get(get_nested))
        // GraphQL routes
        .route("/graphql", get(graphql_get).post(graphql_post))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}
