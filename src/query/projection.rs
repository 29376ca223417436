use serde_json::{Map, Value};

/// Keep only the listed top-level fields, in the listed order.
///
/// An empty field list returns the document unchanged. Fields the document
/// does not have are left out.
pub fn project(doc: Value, fields: &[String]) -> Value {
    if fields.is_empty() {
        return doc;
    }

    let Value::Object(mut source) = doc else {
        return doc;
    };

    let mut projected = Map::new();
    for field in fields {
        if let Some(value) = source.remove(field) {
            projected.insert(field.clone(), value);
        }
    }
    Value::Object(projected)
}

/// Parse a comma-separated `fields` parameter
pub fn parse_fields(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}
