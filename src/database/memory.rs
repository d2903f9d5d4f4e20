use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::manager::DatabaseError;
use super::store::{Datastore, DocumentPage, DocumentQuery, StoredDocument};

/// In-process document store. Used by tests and by `DATABASE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryDatastore {
    inner: RwLock<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    next_seq: u64,
    // (kind, id) -> (insertion sequence, document)
    documents: HashMap<(String, String), (u64, Value)>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.documents.len()
    }
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn get(&self, kind: &str, id: &str) -> Result<Option<Value>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner
            .documents
            .get(&(kind.to_string(), id.to_string()))
            .map(|(_, data)| data.clone()))
    }

    async fn put(&self, kind: &str, id: &str, data: Value) -> Result<(), DatabaseError> {
        let mut inner = self.inner.write().await;
        let key = (kind.to_string(), id.to_string());
        let seq = match inner.documents.get(&key) {
            Some((seq, _)) => *seq,
            None => {
                inner.next_seq += 1;
                inner.next_seq
            }
        };
        inner.documents.insert(key, (seq, data));
        Ok(())
    }

    async fn delete(&self, kind: &str, id: &str) -> Result<bool, DatabaseError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .documents
            .remove(&(kind.to_string(), id.to_string()))
            .is_some())
    }

    async fn query(&self, kind: &str, query: &DocumentQuery) -> Result<DocumentPage, DatabaseError> {
        let inner = self.inner.read().await;

        let mut matching: Vec<(u64, StoredDocument)> = inner
            .documents
            .iter()
            .filter(|((k, _), (_, data))| k == kind && query.matches(data))
            .map(|((_, id), (seq, data))| {
                (
                    *seq,
                    StoredDocument {
                        id: id.clone(),
                        data: data.clone(),
                    },
                )
            })
            .collect();
        matching.sort_by_key(|(seq, _)| *seq);

        let total = matching.len();
        let documents = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|(_, doc)| doc)
            .collect();

        Ok(DocumentPage { documents, total })
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
