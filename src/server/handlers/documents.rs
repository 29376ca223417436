use super::system::AppState;
use crate::{
    error::DbError,
    query::{self, pagination::paginate, QuerySpec},
};
use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, HeaderValue, Uri},
    response::{IntoResponse, Json, Response},
};
use serde_json::{Map, Value};
use url::Url;

// ==================== Helper Functions ====================

/// Absolute URL of the request without its query, plus the given pairs
fn base_url(headers: &HeaderMap, uri: &Uri, pairs: &[(String, String)]) -> Result<Url, DbError> {
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");

    let mut url = Url::parse(&format!("http://{}{}", host, uri.path()))
        .map_err(|e| DbError::BadRequest(format!("Invalid request URL: {}", e)))?;

    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

// ==================== Handlers ====================

/// `GET /api/{collection}` with filters, sorting, paging and projection
pub async fn query_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    RawQuery(raw_query): RawQuery,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, DbError> {
    let spec = QuerySpec::from_query_string(raw_query.as_deref().unwrap_or("")).map_err(|e| {
        tracing::warn!("Rejected query on '{}': {}", collection, e);
        e
    })?;

    let result = query::execute(state.store.as_ref(), &collection, &spec)?;

    let mut response_headers = HeaderMap::new();
    response_headers.insert("x-total-count", HeaderValue::from(result.total_count));

    let Some(page) = spec.page else {
        return Ok((response_headers, Json(result.results)).into_response());
    };

    let base = base_url(&headers, &uri, &spec.passthrough)?;
    let links = paginate(&base, result.total_count, page.skip, page.take, page.style);

    if !links.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&links.link_header()) {
            response_headers.insert(header::LINK, value);
        }
    }

    let (skip_name, take_name) = page.style.names();
    let (skip_value, take_value) = page.style.values(page.skip, page.take);

    let mut body = Map::new();
    body.insert("results".to_string(), Value::Array(result.results));
    body.insert("link".to_string(), serde_json::to_value(&links)?);
    body.insert(skip_name.to_string(), Value::from(skip_value));
    body.insert(take_name.to_string(), Value::from(take_value));
    body.insert("count".to_string(), Value::from(result.total_count));

    Ok((response_headers, Json(Value::Object(body))).into_response())
}

/// `GET /api/{collection}/{*path}`: a document by id, or a value inside it
pub async fn get_nested(
    State(state): State<AppState>,
    Path((collection, path)): Path<(String, String)>,
) -> Result<Json<Value>, DbError> {
    let value = query::fetch_nested(state.store.as_ref(), &collection, &path)?;
    Ok(Json(value))
}
