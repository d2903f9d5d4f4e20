use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use super::manager::DatabaseError;
use super::store::{Datastore, DocumentQuery};

/// A typed document kind stored in the [`Datastore`]
pub trait Entity: Serialize + DeserializeOwned + Send + Sync {
    /// Datastore namespace for this entity
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// A window of entities together with the total matching count
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn next_offset(&self) -> Option<usize> {
        let next = self.offset + self.items.len();
        (next < self.total && !self.items.is_empty()).then_some(next)
    }
}

pub struct Repository<T> {
    store: Arc<dyn Datastore>,
    _phantom: PhantomData<T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn Datastore>) -> Self {
        Self {
            store,
            _phantom: PhantomData,
        }
    }

    pub async fn select_one(&self, id: &str) -> Result<Option<T>, DatabaseError> {
        match self.store.get(T::KIND, id).await? {
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, entity: &T) -> Result<(), DatabaseError> {
        let data = serde_json::to_value(entity)?;
        self.store.put(T::KIND, entity.id(), data).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DatabaseError> {
        self.store.delete(T::KIND, id).await
    }

    pub async fn select_page(&self, query: DocumentQuery) -> Result<Page<T>, DatabaseError> {
        let offset = query.offset;
        let page = self.store.query(T::KIND, &query).await?;
        let items = page
            .documents
            .into_iter()
            .map(|doc| serde_json::from_value(doc.data))
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Page {
            items,
            total: page.total,
            offset,
        })
    }

    pub async fn select_any(&self, query: DocumentQuery) -> Result<Vec<T>, DatabaseError> {
        Ok(self.select_page(query).await?.items)
    }
}
