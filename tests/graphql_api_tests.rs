//! GraphQL endpoint tests driven through the router with `oneshot`

mod common;

use axum::http::StatusCode;
use common::{create_test_app, get, post};
use serde_json::json;

fn query_body(query: &str) -> String {
    json!({ "query": query }).to_string()
}

#[tokio::test]
async fn test_graphql_post_json() {
    let app = create_test_app();
    let (status, body) = post(
        &app,
        "/graphql",
        "application/json",
        query_body("{ users(location: \"SF\") { name age } }"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"data": {"users": [
            {"name": "Larry", "age": 25},
            {"name": "Thomas", "age": 52}
        ]}})
    );
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_graphql_nested_argument_filter() {
    let app = create_test_app();
    let (status, body) = post(
        &app,
        "/graphql",
        "application/json",
        query_body("{ families { familyName children(age: 4) { name } } }"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"families": [
            {"familyName": "Smith", "children": [{"name": "Ann"}]},
            {"familyName": "Jones", "children": [{"name": "Cid"}]}
        ]})
    );
}

#[tokio::test]
async fn test_graphql_raw_body() {
    let app = create_test_app();
    let (status, body) = post(
        &app,
        "/graphql",
        "application/graphql",
        "{ families(id: 2) { address { city } } }".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"families": [{"address": {"city": "SF"}}]}));
}

#[tokio::test]
async fn test_graphql_get() {
    let app = create_test_app();
    let (status, _, body) = get(&app, "/graphql?query=%7B%20users(id%3A%203)%20%7B%20name%20%7D%20%7D").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"users": [{"name": "Thomas"}]}));
}

#[tokio::test]
async fn test_graphql_operation_name_selects_operation() {
    let app = create_test_app();
    let body = json!({
        "query": "query A { users(id: 1) { name } } query B { users(id: 2) { name } }",
        "operationName": "B"
    });
    let (status, body) = post(&app, "/graphql", "application/json", body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"users": [{"name": "Larry"}]}));
}

#[tokio::test]
async fn test_graphql_alias_and_unknown_collection() {
    let app = create_test_app();
    let (status, body) = post(
        &app,
        "/graphql",
        "application/json",
        query_body("{ people: users(id: 4) { name } ghosts { name } }"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"people": [{"name": "Philippe"}], "ghosts": []})
    );
}

#[tokio::test]
async fn test_graphql_mutation_rejected() {
    let app = create_test_app();
    let (status, body) = post(
        &app,
        "/graphql",
        "application/json",
        query_body("mutation { users { id } }"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("data").is_none());
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["message"].as_str().unwrap().contains("mutation"));
}

#[tokio::test]
async fn test_graphql_syntax_error() {
    let app = create_test_app();
    let (status, body) = post(&app, "/graphql", "application/json", query_body("{ users { name")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("data").is_none());
    assert!(!body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_graphql_invalid_json_body() {
    let app = create_test_app();
    let (status, body) = post(&app, "/graphql", "application/json", "not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
