use serde_json::Value;
use std::cmp::Ordering;

use super::coerce::coerce;
use super::path::{resolve, Resolved, FILTER_SEPARATOR};

/// Comparison applied by one filter predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl FilterOperator {
    /// Operator for a key suffix (`ne`, `lt`, ...), `None` if unknown
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ne" => Some(FilterOperator::Ne),
            "lt" => Some(FilterOperator::Lt),
            "lte" => Some(FilterOperator::Lte),
            "gt" => Some(FilterOperator::Gt),
            "gte" => Some(FilterOperator::Gte),
            _ => None,
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            FilterOperator::Eq => ordering == Ordering::Equal,
            FilterOperator::Ne => ordering != Ordering::Equal,
            FilterOperator::Lt => ordering == Ordering::Less,
            FilterOperator::Lte => ordering != Ordering::Greater,
            FilterOperator::Gt => ordering == Ordering::Greater,
            FilterOperator::Gte => ordering != Ordering::Less,
        }
    }
}

/// One `(path, operator, value)` condition
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub path: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Predicate {
    /// Build a predicate from a raw query-string pair such as `age_lt=30`.
    ///
    /// The operator comes from the last `_` segment of the key. An unknown
    /// suffix keeps the whole key as the path and compares for equality.
    pub fn from_pair(key: &str, raw: &str) -> Self {
        let (path, operator) = match key.rsplit_once('_') {
            Some((path, suffix)) if !path.is_empty() => match FilterOperator::from_suffix(suffix) {
                Some(op) => (path, op),
                None => (key, FilterOperator::Eq),
            },
            _ => (key, FilterOperator::Eq),
        };

        Self {
            path: path.to_string(),
            operator,
            value: coerce(raw),
        }
    }

    /// Whether `doc` satisfies this predicate
    pub fn matches(&self, doc: &Value, id_field: &str) -> bool {
        match resolve(doc, &self.path, FILTER_SEPARATOR, id_field) {
            Resolved::Absent => false,
            Resolved::One(field) => compare(field, self.operator, &self.value),
            Resolved::Many(fields) => fields
                .into_iter()
                .any(|field| compare(field, self.operator, &self.value)),
        }
    }
}

/// Whether `doc` satisfies every predicate
pub fn matches(doc: &Value, predicates: &[Predicate], id_field: &str) -> bool {
    predicates.iter().all(|p| p.matches(doc, id_field))
}

/// Apply `operator` to a field value and a target value.
///
/// Arrays match when any element matches. Values of different types never
/// compare: every operator is `false` except `Ne`, which is `true`.
pub fn compare(field: &Value, operator: FilterOperator, target: &Value) -> bool {
    if let Value::Array(items) = field {
        return items.iter().any(|item| compare(item, operator, target));
    }

    match typed_ordering(field, target) {
        Some(ordering) => operator.accepts(ordering),
        None => operator == FilterOperator::Ne,
    }
}

/// Ordering of two values of the same kind, `None` across kinds
pub fn typed_ordering(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
        },
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Equality under the same typed rules as the filter operators
pub fn values_equal(a: &Value, b: &Value) -> bool {
    compare(a, FilterOperator::Eq, b)
}
