use super::system::AppState;
use crate::{error::DbError, graphql};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

// ==================== Structs ====================

#[derive(Debug, Deserialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default, rename = "operationName", alias = "operation_name")]
    pub operation_name: Option<String>,
}

// ==================== Helper Functions ====================

fn run(state: &AppState, request: &GraphQLRequest) -> Response {
    let response = graphql::execute(
        state.store.as_ref(),
        &request.query,
        request.operation_name.as_deref(),
    );

    let status = if response.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response)).into_response()
}

// ==================== Handlers ====================

/// `POST /graphql` with a JSON body or raw `application/graphql` text
pub async fn graphql_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Response, DbError> {
    let is_raw = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .map(|ct| ct.starts_with("application/graphql"))
        .unwrap_or(false);

    let request = if is_raw {
        GraphQLRequest {
            query: body,
            operation_name: None,
        }
    } else {
        serde_json::from_str(&body)
            .map_err(|e| DbError::BadRequest(format!("Invalid GraphQL request body: {}", e)))?
    };

    Ok(run(&state, &request))
}

/// `GET /graphql?query=...`
pub async fn graphql_get(
    State(state): State<AppState>,
    Query(request): Query<GraphQLRequest>,
) -> Response {
    run(&state, &request)
}
