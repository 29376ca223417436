//! REST query pipeline: search, filter, sort, page and project.

pub mod coerce;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod path;
pub mod projection;
pub mod sort;

pub use coerce::coerce;
pub use filter::{matches, FilterOperator, Predicate};
pub use pagination::{paginate, PageLinks, PageWindows, ParamStyle};
pub use params::{PageRequest, QuerySpec};
pub use path::{resolve, Resolved};
pub use sort::{SortDirection, SortKey};

use serde_json::Value;

use crate::error::{DbError, DbResult};
use crate::storage::DocumentStore;

/// Documents of one page plus the size of the full filtered set
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub results: Vec<Value>,
    pub total_count: usize,
}

/// Run a REST query against one collection
pub fn execute(store: &dyn DocumentStore, collection: &str, spec: &QuerySpec) -> DbResult<QueryResult> {
    let source = match &spec.search {
        Some(text) => store.search(collection, text),
        None => store.get_collection(collection),
    };
    let mut docs = source.ok_or_else(|| DbError::CollectionNotFound(collection.to_string()))?;

    let id_field = store.id_field();
    let scanned = docs.len();
    docs.retain(|doc| matches(doc, &spec.filters, id_field));
    sort::sort(&mut docs, &spec.sort, id_field);

    let total_count = docs.len();
    let page: Vec<Value> = match spec.page {
        Some(page) => docs.into_iter().skip(page.skip).take(page.take).collect(),
        None => docs,
    };

    tracing::debug!(
        collection,
        scanned,
        matched = total_count,
        returned = page.len(),
        filters = spec.filters.len(),
        sort_keys = spec.sort.len(),
        "REST query executed"
    );

    let results = page
        .into_iter()
        .map(|doc| projection::project(doc, &spec.fields))
        .collect();

    Ok(QueryResult {
        results,
        total_count,
    })
}

/// Fetch the value at a `/`-delimited path inside a collection.
///
/// The first integer segment selects a document by id. A path that fans out
/// over an array yields an array of the matched values.
pub fn fetch_nested(store: &dyn DocumentStore, collection: &str, path: &str) -> DbResult<Value> {
    let docs = store
        .get_collection(collection)
        .ok_or_else(|| DbError::CollectionNotFound(collection.to_string()))?;
    let root = Value::Array(docs);

    resolve(&root, path, path::FETCH_SEPARATOR, store.id_field())
        .to_value()
        .ok_or_else(|| DbError::DocumentNotFound(format!("{}/{}", collection, path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::from_value(
            json!({
                "users": [
                    {"id": 1, "name": "Phil", "age": 40, "location": "NY"},
                    {"id": 2, "name": "Larry", "age": 25, "location": "SF"},
                    {"id": 3, "name": "Thomas", "age": 52, "location": "SF"},
                    {"id": 4, "name": "Philippe", "age": 23, "location": "London"}
                ],
                "families": [
                    {"id": 10, "familyName": "Smith", "children": [
                        {"id": 1, "name": "Ann", "age": 4},
                        {"id": 2, "name": "Bob", "age": 9}
                    ]}
                ]
            }),
            "id",
        )
        .unwrap()
    }

    fn ids(result: &QueryResult) -> Vec<i64> {
        result.results.iter().map(|d| d["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_filter_keeps_order_and_counts() {
        let spec = QuerySpec::from_query_string("age_lt=30").unwrap();
        let result = execute(&store(), "users", &spec).unwrap();
        assert_eq!(ids(&result), vec![2, 4]);
        assert_eq!(result.total_count, 2);
    }

    #[test]
    fn test_sort_then_page() {
        let spec = QuerySpec::from_query_string("sort=%2Bage&skip=1&take=2").unwrap();
        let result = execute(&store(), "users", &spec).unwrap();
        assert_eq!(ids(&result), vec![2, 1]);
        assert_eq!(result.total_count, 4);
    }

    #[test]
    fn test_search_then_filter_then_project() {
        let spec = QuerySpec::from_query_string("q=phil&age_gt=30&fields=name").unwrap();
        let result = execute(&store(), "users", &spec).unwrap();
        assert_eq!(result.results, vec![json!({"name": "Phil"})]);
    }

    #[test]
    fn test_unknown_collection() {
        let err = execute(&store(), "missing", &QuerySpec::default()).unwrap_err();
        assert_eq!(err.kind(), "CollectionNotFound");
    }

    #[test]
    fn test_fetch_nested() {
        let store = store();
        assert_eq!(fetch_nested(&store, "users", "2").unwrap()["name"], "Larry");
        assert_eq!(
            fetch_nested(&store, "families", "10/children/2").unwrap(),
            json!({"id": 2, "name": "Bob", "age": 9})
        );
        assert_eq!(
            fetch_nested(&store, "families", "10/children/name").unwrap(),
            json!(["Ann", "Bob"])
        );

        let err = fetch_nested(&store, "families", "10/children/3").unwrap_err();
        assert_eq!(err.kind(), "DocumentNotFound");
    }
}
