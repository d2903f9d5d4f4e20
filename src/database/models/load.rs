use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::repository::Entity;

/// Boat currently holding a load, denormalized onto the load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: String,
    pub volume: u64,
    pub content: String,
    pub creation_date: String,
    #[serde(default)]
    pub carrier: Option<Carrier>,
}

impl Load {
    pub fn new(volume: u64, content: String, creation_date: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            volume,
            content,
            creation_date,
            carrier: None,
        }
    }

    pub fn carrier_id(&self) -> Option<&str> {
        self.carrier.as_ref().map(|c| c.id.as_str())
    }

    pub fn is_carried_by(&self, boat_id: &str) -> bool {
        self.carrier_id() == Some(boat_id)
    }
}

impl Entity for Load {
    const KIND: &'static str = "Load";

    fn id(&self) -> &str {
        &self.id
    }
}
