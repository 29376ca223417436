use serde_json::{Map, Value};

use crate::query::filter::values_equal;
use crate::storage::DocumentStore;

use super::selection::{collect_fields, Operation, OperationType, SelectionNode};
use super::GraphQLError;

/// Resolve a query operation against the store.
///
/// Each root field names a collection and yields a list bound to its response
/// key. Root and nested arguments are equality filters on the item's fields.
pub fn resolve_operation(
    store: &dyn DocumentStore,
    operation: &Operation,
) -> Result<Map<String, Value>, GraphQLError> {
    if operation.operation_type != OperationType::Query {
        return Err(GraphQLError::message(format!(
            "Operation type '{}' is not supported, only queries can be executed",
            operation.operation_type
        )));
    }

    let mut data = Map::new();
    for root in collect_fields(&operation.selection_set) {
        let docs = store.get_collection(&root.name).unwrap_or_default();
        let items: Vec<Value> = docs
            .iter()
            .filter(|doc| arguments_match(doc, &root.arguments))
            .map(|doc| resolve_object(doc, &root.children))
            .collect();
        data.insert(root.response_key().to_string(), Value::Array(items));
    }
    Ok(data)
}

/// Whether every argument equals the same-named field of `source`
fn arguments_match(source: &Value, arguments: &[(String, Value)]) -> bool {
    arguments.iter().all(|(name, expected)| {
        source
            .get(name)
            .is_some_and(|actual| values_equal(actual, expected))
    })
}

/// Build a fresh object holding the requested children of `source`
fn resolve_object(source: &Value, children: &[SelectionNode]) -> Value {
    if children.is_empty() {
        return source.clone();
    }

    let mut object = Map::new();
    for child in collect_fields(children) {
        if let Some(value) = resolve_field(source, &child) {
            object.insert(child.response_key().to_string(), value);
        }
    }
    Value::Object(object)
}

/// Value of one field, or `None` when it is missing or filtered out
fn resolve_field(source: &Value, node: &SelectionNode) -> Option<Value> {
    let value = source.get(&node.name)?;
    if node.children.is_empty() {
        return Some(value.clone());
    }

    match value {
        Value::Object(_) => {
            arguments_match(value, &node.arguments).then(|| resolve_object(value, &node.children))
        }
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .filter(|item| item.is_object() && arguments_match(item, &node.arguments))
                .map(|item| resolve_object(item, &node.children))
                .collect(),
        )),
        // sub-selection on a scalar
        _ => Some(value.clone()),
    }
}
