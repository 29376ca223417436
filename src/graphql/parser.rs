//! Selection-tree parsing on top of `apollo-parser`.
//!
//! Only executable operations are accepted. Fragments and variables are
//! rejected instead of being silently ignored.

use apollo_parser::cst::{self, CstNode};
use apollo_parser::Parser;
use serde_json::{Map, Number, Value};

use super::selection::{Directive, Operation, OperationType, SelectionNode};
use super::{GraphQLError, GraphQLLocation};

/// Parse `text` and pick the operation to run.
///
/// With several operations, `operation_name` chooses one; otherwise the first
/// operation is used.
pub fn parse_operation(
    text: &str,
    operation_name: Option<&str>,
) -> Result<Operation, Vec<GraphQLError>> {
    let tree = Parser::new(text).parse();

    let errors: Vec<GraphQLError> = tree
        .errors()
        .map(|err| {
            GraphQLError::new(
                format!("Syntax error: {}", err.message()),
                GraphQLLocation::from_offset(text, err.index()),
            )
        })
        .collect();
    if !errors.is_empty() {
        tracing::debug!("GraphQL parse failed with {} error(s)", errors.len());
        return Err(errors);
    }

    let document = tree.document();
    let mut operations = Vec::new();
    for definition in document.definitions() {
        match definition {
            cst::Definition::OperationDefinition(operation) => operations.push(operation),
            cst::Definition::FragmentDefinition(_) => {
                return Err(vec![GraphQLError::message("Fragments are not supported")]);
            }
            _ => {
                return Err(vec![GraphQLError::message(
                    "Only executable definitions are supported",
                )]);
            }
        }
    }

    let operation = match operation_name {
        Some(wanted) => operations
            .into_iter()
            .find(|op| op.name().map(|n| n.text().to_string()).as_deref() == Some(wanted))
            .ok_or_else(|| vec![GraphQLError::message(format!("Unknown operation named '{}'", wanted))])?,
        None => operations
            .into_iter()
            .next()
            .ok_or_else(|| vec![GraphQLError::message("Document does not contain an operation")])?,
    };

    convert_operation(operation).map_err(|err| vec![err])
}

fn convert_operation(operation: cst::OperationDefinition) -> Result<Operation, GraphQLError> {
    let operation_type = match operation.operation_type() {
        Some(ty) if ty.mutation_token().is_some() => OperationType::Mutation,
        Some(ty) if ty.subscription_token().is_some() => OperationType::Subscription,
        // shorthand `{ ... }` is a query
        _ => OperationType::Query,
    };

    let selection_set = match operation.selection_set() {
        Some(set) => convert_selection_set(set)?,
        None => Vec::new(),
    };

    Ok(Operation {
        operation_type,
        name: operation.name().map(|n| n.text().to_string()),
        selection_set,
    })
}

fn convert_selection_set(set: cst::SelectionSet) -> Result<Vec<SelectionNode>, GraphQLError> {
    set.selections()
        .map(|selection| match selection {
            cst::Selection::Field(field) => convert_field(field),
            cst::Selection::FragmentSpread(_) | cst::Selection::InlineFragment(_) => {
                Err(GraphQLError::message("Fragments are not supported"))
            }
        })
        .collect()
}

fn convert_field(field: cst::Field) -> Result<SelectionNode, GraphQLError> {
    let name = field
        .name()
        .map(|n| n.text().to_string())
        .ok_or_else(|| GraphQLError::message("Field without a name"))?;
    let alias = field
        .alias()
        .and_then(|a| a.name())
        .map(|n| n.text().to_string());

    let arguments = match field.arguments() {
        Some(args) => convert_arguments(args)?,
        None => Vec::new(),
    };

    let directives = match field.directives() {
        Some(directives) => directives
            .directives()
            .map(|directive| {
                Ok(Directive {
                    name: directive
                        .name()
                        .map(|n| n.text().to_string())
                        .unwrap_or_default(),
                    arguments: match directive.arguments() {
                        Some(args) => convert_arguments(args)?,
                        None => Vec::new(),
                    },
                })
            })
            .collect::<Result<Vec<_>, GraphQLError>>()?,
        None => Vec::new(),
    };

    let children = match field.selection_set() {
        Some(set) => convert_selection_set(set)?,
        None => Vec::new(),
    };

    Ok(SelectionNode {
        name,
        alias,
        arguments,
        directives,
        children,
    })
}

fn convert_arguments(args: cst::Arguments) -> Result<Vec<(String, Value)>, GraphQLError> {
    args.arguments()
        .filter_map(|arg| {
            let name = arg.name()?.text().to_string();
            let value = arg.value()?;
            Some(convert_value(value).map(|v| (name, v)))
        })
        .collect()
}

fn convert_value(value: cst::Value) -> Result<Value, GraphQLError> {
    match value {
        cst::Value::Variable(var) => Err(GraphQLError::message(format!(
            "Variables are not supported: {}",
            var.syntax().text()
        ))),
        cst::Value::StringValue(s) => Ok(Value::String(unquote(&s.syntax().text().to_string()))),
        cst::Value::IntValue(i) => {
            let raw = i.syntax().text().to_string();
            match raw.parse::<i64>() {
                Ok(int) => Ok(Value::Number(Number::from(int))),
                Err(_) => float_value(&raw),
            }
        }
        cst::Value::FloatValue(f) => float_value(&f.syntax().text().to_string()),
        cst::Value::BooleanValue(b) => Ok(Value::Bool(b.true_token().is_some())),
        cst::Value::NullValue(_) => Ok(Value::Null),
        cst::Value::EnumValue(e) => Ok(e
            .name()
            .map(|n| Value::String(n.text().to_string()))
            .unwrap_or(Value::Null)),
        cst::Value::ListValue(list) => list
            .values()
            .map(convert_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        cst::Value::ObjectValue(object) => {
            let mut map = Map::new();
            for field in object.object_fields() {
                if let (Some(name), Some(value)) = (field.name(), field.value()) {
                    map.insert(name.text().to_string(), convert_value(value)?);
                }
            }
            Ok(Value::Object(map))
        }
    }
}

fn float_value(raw: &str) -> Result<Value, GraphQLError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| GraphQLError::message(format!("Invalid number literal: {}", raw)))
}

/// Resolve a string literal's delimiters and escapes
fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    if let Some(block) = raw
        .strip_prefix("\"\"\"")
        .and_then(|r| r.strip_suffix("\"\"\""))
    {
        return block.replace("\\\"\"\"", "\"\"\"").trim().to_string();
    }

    // GraphQL string escapes are a subset of JSON's
    serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.trim_matches('"').to_string())
}
