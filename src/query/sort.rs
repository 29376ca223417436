use serde_json::Value;
use std::cmp::Ordering;

use super::filter::typed_ordering;
use super::path::{resolve, FILTER_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One sort key: a path and its direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub path: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Parse a direction-prefixed token.
    ///
    /// `+` sorts ascending. `-`, a leading space, or no prefix sorts descending.
    /// Returns `None` for a token with no path.
    pub fn parse(token: &str) -> Option<Self> {
        let (direction, rest) = match token.chars().next()? {
            '+' => (SortDirection::Ascending, &token[1..]),
            '-' | ' ' => (SortDirection::Descending, &token[1..]),
            _ => (SortDirection::Descending, token),
        };

        let path = rest.trim();
        if path.is_empty() {
            return None;
        }

        Some(Self {
            path: path.to_string(),
            direction,
        })
    }
}

/// Parse a comma-separated sort parameter, skipping empty tokens
pub fn parse_sort(raw: &str) -> Vec<SortKey> {
    raw.split(',').filter_map(SortKey::parse).collect()
}

/// Stable multi-key sort. The first key is primary, the rest break ties.
pub fn sort(docs: &mut [Value], keys: &[SortKey], id_field: &str) {
    if keys.is_empty() {
        return;
    }

    docs.sort_by(|a, b| {
        for key in keys {
            let left = resolve(a, &key.path, FILTER_SEPARATOR, id_field).first();
            let right = resolve(b, &key.path, FILTER_SEPARATOR, id_field).first();
            let ordering = sort_ordering(left, right);
            let ordering = match key.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Total order over optional leaf values.
///
/// Missing sorts first, then null, bool, number, string, array and object.
fn sort_ordering(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            let by_rank = type_rank(a).cmp(&type_rank(b));
            if by_rank != Ordering::Equal {
                return by_rank;
            }
            typed_ordering(a, b).unwrap_or(Ordering::Equal)
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
