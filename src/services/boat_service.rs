use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::ServiceError;
use crate::database::models::{Boat, Carrier, Load};
use crate::database::{Datastore, DocumentQuery, Page, Repository};

/// Field updates for a boat; `None` leaves the field as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoatChanges {
    pub name: Option<String>,
    pub boat_type: Option<String>,
    pub length: Option<u64>,
}

impl BoatChanges {
    fn apply(self, boat: &mut Boat) {
        if let Some(name) = self.name {
            boat.name = name;
        }
        if let Some(boat_type) = self.boat_type {
            boat.boat_type = boat_type;
        }
        if let Some(length) = self.length {
            boat.length = length;
        }
    }
}

/// Boat operations, including the boat side of load assignment.
///
/// Every operation that writes both a boat and its loads holds `cargo_lock`,
/// so the `boat.loads` / `load.carrier` pair is never interleaved within a process.
#[derive(Clone)]
pub struct BoatService {
    boats: Repository<Boat>,
    loads: Repository<Load>,
    cargo_lock: Arc<Mutex<()>>,
}

impl BoatService {
    pub fn new(store: Arc<dyn Datastore>, cargo_lock: Arc<Mutex<()>>) -> Self {
        Self {
            boats: Repository::new(store.clone()),
            loads: Repository::new(store),
            cargo_lock,
        }
    }

    pub async fn create(
        &self,
        owner: &str,
        name: String,
        boat_type: String,
        length: u64,
    ) -> Result<Boat, ServiceError> {
        let boat = Boat::new(owner, name, boat_type, length);
        self.boats.save(&boat).await?;
        info!(boat_id = %boat.id, owner, "created boat");
        Ok(boat)
    }

    pub async fn list_for_owner(
        &self,
        owner: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Page<Boat>, ServiceError> {
        let query = DocumentQuery::all()
            .filter_eq("owner", owner)
            .window(offset, limit);
        Ok(self.boats.select_page(query).await?)
    }

    /// Load a boat, failing with `NotOwner` when `owner` did not create it
    pub async fn get_owned(&self, owner: &str, boat_id: &str) -> Result<Boat, ServiceError> {
        let boat = self
            .boats
            .select_one(boat_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("boat", boat_id))?;

        if !boat.is_owned_by(owner) {
            warn!(boat_id, owner, "boat access by non-owner");
            return Err(ServiceError::NotOwner {
                boat_id: boat_id.to_string(),
            });
        }
        Ok(boat)
    }

    pub async fn update(
        &self,
        owner: &str,
        boat_id: &str,
        changes: BoatChanges,
    ) -> Result<Boat, ServiceError> {
        let _guard = self.cargo_lock.lock().await;
        let mut boat = self.get_owned(owner, boat_id).await?;

        let renamed = changes.name.as_ref().is_some_and(|n| *n != boat.name);
        changes.apply(&mut boat);
        self.boats.save(&boat).await?;

        if renamed {
            // Carrier names are denormalized onto each load
            for load_ref in &boat.loads {
                if let Some(mut load) = self.loads.select_one(&load_ref.id).await? {
                    if load.is_carried_by(&boat.id) {
                        load.carrier = Some(Carrier {
                            id: boat.id.clone(),
                            name: boat.name.clone(),
                        });
                        self.loads.save(&load).await?;
                    }
                }
            }
        }

        info!(boat_id, renamed, "updated boat");
        Ok(boat)
    }

    /// Delete a boat after unloading everything it carries
    pub async fn delete(&self, owner: &str, boat_id: &str) -> Result<(), ServiceError> {
        let _guard = self.cargo_lock.lock().await;
        let boat = self.get_owned(owner, boat_id).await?;

        for load_ref in &boat.loads {
            match self.loads.select_one(&load_ref.id).await? {
                Some(mut load) if load.is_carried_by(&boat.id) => {
                    load.carrier = None;
                    self.loads.save(&load).await?;
                }
                Some(_) => {}
                None => warn!(boat_id, load_id = %load_ref.id, "boat referenced a missing load"),
            }
        }

        self.boats.delete(&boat.id).await?;
        info!(boat_id, unloaded = boat.loads.len(), "deleted boat");
        Ok(())
    }

    pub async fn loads_of(&self, owner: &str, boat_id: &str) -> Result<Vec<Load>, ServiceError> {
        let boat = self.get_owned(owner, boat_id).await?;

        let mut loads = Vec::with_capacity(boat.loads.len());
        for load_ref in &boat.loads {
            match self.loads.select_one(&load_ref.id).await? {
                Some(load) => loads.push(load),
                None => warn!(boat_id, load_id = %load_ref.id, "boat referenced a missing load"),
            }
        }
        Ok(loads)
    }

    /// Put a load on a boat. A load that already has a carrier is refused.
    pub async fn assign_load(
        &self,
        owner: &str,
        boat_id: &str,
        load_id: &str,
    ) -> Result<(), ServiceError> {
        let _guard = self.cargo_lock.lock().await;
        let mut boat = self.get_owned(owner, boat_id).await?;
        let mut load = self
            .loads
            .select_one(load_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("load", load_id))?;

        if let Some(current) = load.carrier_id() {
            return Err(ServiceError::LoadAlreadyAssigned {
                load_id: load_id.to_string(),
                boat_id: current.to_string(),
            });
        }

        load.carrier = Some(Carrier {
            id: boat.id.clone(),
            name: boat.name.clone(),
        });
        boat.add_load(&load.id);

        self.loads.save(&load).await?;
        self.boats.save(&boat).await?;
        info!(boat_id, load_id, "assigned load");
        Ok(())
    }

    /// Take a load off a boat. Fails with `LoadNotOnBoat` unless this boat carries it.
    pub async fn remove_load(
        &self,
        owner: &str,
        boat_id: &str,
        load_id: &str,
    ) -> Result<(), ServiceError> {
        let _guard = self.cargo_lock.lock().await;
        let mut boat = self.get_owned(owner, boat_id).await?;
        let mut load = self
            .loads
            .select_one(load_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("load", load_id))?;

        if !load.is_carried_by(&boat.id) || !boat.carries(&load.id) {
            return Err(ServiceError::LoadNotOnBoat {
                load_id: load_id.to_string(),
                boat_id: boat_id.to_string(),
            });
        }

        load.carrier = None;
        boat.remove_load(&load.id);

        self.loads.save(&load).await?;
        self.boats.save(&boat).await?;
        info!(boat_id, load_id, "removed load");
        Ok(())
    }
}
