use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::ServiceError;
use crate::database::models::{Boat, Load};
use crate::database::{Datastore, DocumentQuery, Page, Repository};

/// Field updates for a load; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadChanges {
    pub volume: Option<u64>,
    pub content: Option<String>,
    pub creation_date: Option<String>,
}

impl LoadChanges {
    fn apply(self, load: &mut Load) {
        if let Some(volume) = self.volume {
            load.volume = volume;
        }
        if let Some(content) = self.content {
            load.content = content;
        }
        if let Some(creation_date) = self.creation_date {
            load.creation_date = creation_date;
        }
    }
}

#[derive(Clone)]
pub struct LoadService {
    loads: Repository<Load>,
    boats: Repository<Boat>,
    cargo_lock: Arc<Mutex<()>>,
}

impl LoadService {
    pub fn new(store: Arc<dyn Datastore>, cargo_lock: Arc<Mutex<()>>) -> Self {
        Self {
            loads: Repository::new(store.clone()),
            boats: Repository::new(store),
            cargo_lock,
        }
    }

    pub async fn create(
        &self,
        volume: u64,
        content: String,
        creation_date: String,
    ) -> Result<Load, ServiceError> {
        let load = Load::new(volume, content, creation_date);
        self.loads.save(&load).await?;
        info!(load_id = %load.id, "created load");
        Ok(load)
    }

    pub async fn list(&self, offset: usize, limit: usize) -> Result<Page<Load>, ServiceError> {
        Ok(self
            .loads
            .select_page(DocumentQuery::all().window(offset, limit))
            .await?)
    }

    pub async fn get(&self, load_id: &str) -> Result<Load, ServiceError> {
        self.loads
            .select_one(load_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("load", load_id))
    }

    /// Carrier is never touched here; it only changes through boat assignment
    pub async fn update(&self, load_id: &str, changes: LoadChanges) -> Result<Load, ServiceError> {
        let _guard = self.cargo_lock.lock().await;
        let mut load = self.get(load_id).await?;
        changes.apply(&mut load);
        self.loads.save(&load).await?;
        info!(load_id, "updated load");
        Ok(load)
    }

    /// Delete a load, first taking it off its carrier
    pub async fn delete(&self, load_id: &str) -> Result<(), ServiceError> {
        let _guard = self.cargo_lock.lock().await;
        let load = self.get(load_id).await?;

        if let Some(boat_id) = load.carrier_id() {
            match self.boats.select_one(boat_id).await? {
                Some(mut boat) => {
                    if boat.remove_load(&load.id) {
                        self.boats.save(&boat).await?;
                    }
                }
                None => warn!(load_id, boat_id, "load referenced a missing carrier"),
            }
        }

        self.loads.delete(&load.id).await?;
        info!(load_id, "deleted load");
        Ok(())
    }
}
