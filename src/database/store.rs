use async_trait::async_trait;
use serde_json::{Map, Value};

use super::manager::DatabaseError;

/// Equality filter on top-level document fields plus an offset/limit window.
#[derive(Debug, Clone, Default)]
pub struct DocumentQuery {
    pub filter: Map<String, Value>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl DocumentQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(field.into(), value.into());
        self
    }

    pub fn window(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }

    /// True when every filter field is present in `data` with an equal value
    pub fn matches(&self, data: &Value) -> bool {
        self.filter
            .iter()
            .all(|(field, expected)| data.get(field) == Some(expected))
    }
}

#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: String,
    pub data: Value,
}

/// One window of a query, with the number of documents matching the filter overall
#[derive(Debug, Clone, Default)]
pub struct DocumentPage {
    pub documents: Vec<StoredDocument>,
    pub total: usize,
}

/// Key/document store addressed by `(kind, id)`.
///
/// Queries return documents in insertion order. Writes are last-writer-wins.
#[async_trait]
pub trait Datastore: Send + Sync {
    async fn get(&self, kind: &str, id: &str) -> Result<Option<Value>, DatabaseError>;

    /// Insert or replace the document stored under `(kind, id)`
    async fn put(&self, kind: &str, id: &str, data: Value) -> Result<(), DatabaseError>;

    /// Returns false when nothing was stored under the key
    async fn delete(&self, kind: &str, id: &str) -> Result<bool, DatabaseError>;

    async fn query(&self, kind: &str, query: &DocumentQuery) -> Result<DocumentPage, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
