use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::repository::Entity;

/// Reference from a boat to a load it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRef {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub boat_type: String,
    pub length: u64,
    /// Subject id of the user that created the boat
    pub owner: String,
    #[serde(default)]
    pub loads: Vec<LoadRef>,
}

impl Boat {
    pub fn new(owner: impl Into<String>, name: String, boat_type: String, length: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            boat_type,
            length,
            owner: owner.into(),
            loads: Vec::new(),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner == user_id
    }

    pub fn carries(&self, load_id: &str) -> bool {
        self.loads.iter().any(|l| l.id == load_id)
    }

    /// Adds the load reference unless already present
    pub fn add_load(&mut self, load_id: &str) {
        if !self.carries(load_id) {
            self.loads.push(LoadRef {
                id: load_id.to_string(),
            });
        }
    }

    /// Returns true if a reference was removed
    pub fn remove_load(&mut self, load_id: &str) -> bool {
        let before = self.loads.len();
        self.loads.retain(|l| l.id != load_id);
        self.loads.len() != before
    }
}

impl Entity for Boat {
    const KIND: &'static str = "Boat";

    fn id(&self) -> &str {
        &self.id
    }
}
