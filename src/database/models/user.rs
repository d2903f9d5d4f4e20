use serde::{Deserialize, Serialize};

use crate::database::repository::Entity;

/// An account known to the API, keyed by the identity provider's subject id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
}

impl Entity for User {
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}
