use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;

use crate::error::{DbError, DbResult};

/// Read access to named, insertion-ordered collections of documents.
///
/// Every call returns a snapshot the caller owns, so query evaluation never
/// observes a concurrent writer.
pub trait DocumentStore: Send + Sync {
    /// Names of all collections, in insertion order
    fn collection_names(&self) -> Vec<String>;

    /// Snapshot of a collection, `None` if it does not exist
    fn get_collection(&self, name: &str) -> Option<Vec<Value>>;

    /// Field compared when a path segment is an integer
    fn id_field(&self) -> &str;

    /// Free-text search over every string and number leaf of each document
    fn search(&self, name: &str, text: &str) -> Option<Vec<Value>> {
        let needle = text.to_lowercase();
        self.get_collection(name).map(|docs| {
            docs.into_iter()
                .filter(|doc| contains_text(doc, &needle))
                .collect()
        })
    }
}

fn contains_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => n.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|v| contains_text(v, needle)),
        Value::Object(map) => map.values().any(|v| contains_text(v, needle)),
        Value::Null | Value::Bool(_) => false,
    }
}

/// In-memory store loaded from a JSON object of `collection -> [documents]`
#[derive(Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<Map<String, Value>>>,
    id_field: String,
}

impl MemoryStore {
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            collections: Arc::new(RwLock::new(Map::new())),
            id_field: id_field.into(),
        }
    }

    /// Build a store from a JSON object. Top-level arrays become collections.
    pub fn from_value(data: Value, id_field: impl Into<String>) -> DbResult<Self> {
        let Value::Object(root) = data else {
            return Err(DbError::InvalidData(
                "top-level value must be an object of collections".to_string(),
            ));
        };

        let store = Self::new(id_field);
        {
            let mut collections = store.collections.write();
            for (name, value) in root {
                if value.is_array() {
                    collections.insert(name, value);
                } else {
                    tracing::warn!("Ignoring top-level key '{}': not an array", name);
                }
            }
        }
        Ok(store)
    }

    /// Load a JSON data file
    pub fn open(path: impl AsRef<Path>, id_field: impl Into<String>) -> DbResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let data: Value = serde_json::from_str(&content)?;
        let store = Self::from_value(data, id_field)?;
        tracing::info!(
            "Loaded {} collections from {}",
            store.collections.read().len(),
            path.display()
        );
        Ok(store)
    }

    /// Replace or create a collection
    pub fn put_collection(&self, name: impl Into<String>, docs: Vec<Value>) {
        self.collections.write().insert(name.into(), Value::Array(docs));
    }
}

impl DocumentStore for MemoryStore {
    fn collection_names(&self) -> Vec<String> {
        self.collections.read().keys().cloned().collect()
    }

    fn get_collection(&self, name: &str) -> Option<Vec<Value>> {
        match self.collections.read().get(name) {
            Some(Value::Array(docs)) => Some(docs.clone()),
            _ => None,
        }
    }

    fn id_field(&self) -> &str {
        &self.id_field
    }
}
