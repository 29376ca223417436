//! GraphQL-style selective queries over the document store.
//!
//! Text is parsed into a selection tree, then resolved against collections.
//! Parse failures and non-query operations come back as an error list with no
//! data; a missing field in the data is never an error.

pub mod parser;
pub mod resolver;
pub mod selection;

pub use parser::parse_operation;
pub use resolver::resolve_operation;
pub use selection::{collect_fields, Directive, Operation, OperationType, SelectionNode};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::DocumentStore;

/// A line and column in the query text, both starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLLocation {
    pub line: usize,
    pub column: usize,
}

impl GraphQLLocation {
    /// Location of a byte offset in `source`
    pub fn from_offset(source: &str, offset: usize) -> Option<Self> {
        if offset > source.len() || !source.is_char_boundary(offset) {
            return None;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map(|l| l.chars().count() + 1)
            .unwrap_or(1);
        Some(Self { line, column })
    }
}

/// One entry of a response's `errors` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<GraphQLLocation>,
}

impl GraphQLError {
    pub fn new(
        message: impl ToString,
        locations: impl IntoIterator<Item = GraphQLLocation>,
    ) -> Self {
        Self {
            message: message.to_string(),
            locations: locations.into_iter().collect(),
        }
    }

    pub fn message(message: impl ToString) -> Self {
        Self::new(message, None)
    }
}

/// Response body: `data` on success, `errors` otherwise
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}

impl GraphQLResponse {
    pub fn from_errors(errors: Vec<GraphQLError>) -> Self {
        Self { data: None, errors }
    }

    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }
}

/// Parse and resolve a query document
pub fn execute(store: &dyn DocumentStore, query: &str, operation_name: Option<&str>) -> GraphQLResponse {
    let operation = match parse_operation(query, operation_name) {
        Ok(op) => op,
        Err(errors) => return GraphQLResponse::from_errors(errors),
    };

    match resolve_operation(store, &operation) {
        Ok(data) => {
            tracing::debug!(
                operation = operation.name.as_deref().unwrap_or("<anonymous>"),
                roots = data.len(),
                "GraphQL query resolved"
            );
            GraphQLResponse {
                data: Some(data),
                errors: Vec::new(),
            }
        }
        Err(err) => {
            tracing::warn!("GraphQL operation rejected: {}", err.message);
            GraphQLResponse::from_errors(vec![err])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::from_value(json!({"users": [{"id": 1, "name": "Phil"}]}), "id").unwrap()
    }

    #[test]
    fn test_execute_ok() {
        let response = execute(&store(), "{ users { name } }", None);
        assert!(response.is_ok());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"data": {"users": [{"name": "Phil"}]}})
        );
    }

    #[test]
    fn test_execute_syntax_error_has_no_data() {
        let response = execute(&store(), "{ users { ", None);
        assert!(response.data.is_none());
        assert!(!response.errors.is_empty());
        let body = serde_json::to_value(&response).unwrap();
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_execute_mutation_single_error() {
        let response = execute(&store(), "mutation { users { id } }", None);
        assert!(response.data.is_none());
        assert_eq!(response.errors.len(), 1);
    }

    #[test]
    fn test_location_from_offset() {
        let src = "{\n  users {";
        assert_eq!(
            GraphQLLocation::from_offset(src, 4),
            Some(GraphQLLocation { line: 2, column: 3 })
        );
        assert_eq!(
            GraphQLLocation::from_offset(src, 0),
            Some(GraphQLLocation { line: 1, column: 1 })
        );
        assert_eq!(GraphQLLocation::from_offset(src, 99), None);
    }
}
