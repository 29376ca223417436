//! Path resolution over schema-less documents.
//!
//! A path is split on a separator (`.` for filters and sorting, `/` for nested
//! fetches). Integer segments address array elements by their id field rather
//! than by position. Non-integer segments applied to an array fan out over
//! every element.

use serde_json::Value;

/// Separator used by filter and sort expressions
pub const FILTER_SEPARATOR: char = '.';

/// Separator used by nested fetch URLs
pub const FETCH_SEPARATOR: char = '/';

/// Outcome of resolving a path against a value
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// The path does not exist in the document
    Absent,
    /// The path led to exactly one value
    One(&'a Value),
    /// The path crossed an array and fanned out
    Many(Vec<&'a Value>),
}

impl<'a> Resolved<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    /// First resolved value, if any
    pub fn first(&self) -> Option<&'a Value> {
        match self {
            Resolved::Absent => None,
            Resolved::One(v) => Some(*v),
            Resolved::Many(values) => values.first().copied(),
        }
    }

    /// Owned copy: `One` as itself, `Many` as an array
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Resolved::Absent => None,
            Resolved::One(v) => Some((*v).clone()),
            Resolved::Many(values) => Some(Value::Array(
                values.iter().map(|v| (*v).clone()).collect(),
            )),
        }
    }
}

/// Resolve `path` against `root`, splitting on `separator`.
///
/// An empty path resolves to `root` itself.
pub fn resolve<'a>(root: &'a Value, path: &str, separator: char, id_field: &str) -> Resolved<'a> {
    let segments: Vec<&str> = path.split(separator).filter(|s| !s.is_empty()).collect();
    resolve_segments(root, &segments, id_field)
}

fn resolve_segments<'a>(current: &'a Value, segments: &[&str], id_field: &str) -> Resolved<'a> {
    let Some((head, tail)) = segments.split_first() else {
        return Resolved::One(current);
    };

    let id = head.parse::<i64>().ok();

    match current {
        Value::Array(items) => match id {
            Some(id) => match items.iter().find(|item| has_id(item, id_field, id)) {
                Some(item) => resolve_segments(item, tail, id_field),
                None => Resolved::Absent,
            },
            None => {
                let mut found = Vec::new();
                for item in items {
                    match resolve_segments(item, segments, id_field) {
                        Resolved::Absent => {}
                        Resolved::One(v) => found.push(v),
                        Resolved::Many(values) => found.extend(values),
                    }
                }
                Resolved::Many(found)
            }
        },
        Value::Object(map) => match id {
            Some(id) if has_id(current, id_field, id) => resolve_segments(current, tail, id_field),
            Some(_) => Resolved::Absent,
            None => match map.get(*head) {
                Some(value) => resolve_segments(value, tail, id_field),
                None => Resolved::Absent,
            },
        },
        _ => Resolved::Absent,
    }
}

/// Whether `value` is an object whose id field equals `id`
pub fn has_id(value: &Value, id_field: &str, id: i64) -> bool {
    match value.get(id_field) {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => v == id,
            None => n.as_f64() == Some(id as f64),
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn family() -> Value {
        json!({
            "id": 1,
            "familyName": "Smith",
            "address": {"id": 9, "city": "NY", "geo": {"lat": 40}},
            "children": [
                {"id": 1, "name": "Ann", "age": 4, "pets": [{"id": 3, "kind": "cat"}]},
                {"id": 2, "name": "Bob", "age": 7, "pets": []}
            ]
        })
    }

    #[test]
    fn test_simple_and_nested_field() {
        let doc = family();
        assert_eq!(resolve(&doc, "familyName", '.', "id"), Resolved::One(&json!("Smith")));
        assert_eq!(resolve(&doc, "address.geo.lat", '.', "id").first(), Some(&json!(40)));
        assert!(resolve(&doc, "address.zip", '.', "id").is_absent());
        assert!(resolve(&doc, "familyName.first", '.', "id").is_absent());
    }

    #[test]
    fn test_integer_segment_is_id_lookup() {
        let doc = family();
        // id 2 is the second child, not index 2
        let child = resolve(&doc, "children/2/name", '/', "id");
        assert_eq!(child, Resolved::One(&json!("Bob")));
        assert!(resolve(&doc, "children/0", '/', "id").is_absent());
    }

    #[test]
    fn test_integer_segment_on_single_object() {
        let doc = family();
        assert_eq!(resolve(&doc, "address/9/city", '/', "id").first(), Some(&json!("NY")));
        assert!(resolve(&doc, "address/8/city", '/', "id").is_absent());
    }

    #[test]
    fn test_array_fan_out() {
        let doc = family();
        let ages = resolve(&doc, "children.age", '.', "id");
        assert_eq!(ages, Resolved::Many(vec![&json!(4), &json!(7)]));

        let kinds = resolve(&doc, "children.pets.kind", '.', "id");
        assert_eq!(kinds.to_value(), Some(json!(["cat"])));
    }

    #[test]
    fn test_collection_as_root() {
        let collection = json!([family(), {"id": 2, "familyName": "Jones"}]);
        let name = resolve(&collection, "2/familyName", '/', "id");
        assert_eq!(name.first(), Some(&json!("Jones")));
        assert!(resolve(&collection, "3", '/', "id").is_absent());
    }

    #[test]
    fn test_custom_id_field() {
        let doc = json!({"items": [{"_key": 5, "v": "x"}]});
        assert_eq!(resolve(&doc, "items/5/v", '/', "_key").first(), Some(&json!("x")));
        assert!(resolve(&doc, "items/5/v", '/', "id").is_absent());
    }

    #[test]
    fn test_empty_path_is_root() {
        let doc = json!({"a": 1});
        assert_eq!(resolve(&doc, "", '.', "id"), Resolved::One(&doc));
    }
}
