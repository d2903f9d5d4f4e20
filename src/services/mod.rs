use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

pub mod auth_service;
pub mod boat_service;
pub mod load_service;
pub mod user_service;

pub use auth_service::{AuthService, LoginOutcome};
pub use boat_service::{BoatChanges, BoatService};
pub use load_service::{LoadChanges, LoadService};
pub use user_service::UserService;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("boat '{boat_id}' belongs to another user")]
    NotOwner { boat_id: String },

    #[error("load '{load_id}' is already on boat '{boat_id}'")]
    LoadAlreadyAssigned { load_id: String, boat_id: String },

    #[error("load '{load_id}' is not on boat '{boat_id}'")]
    LoadNotOnBoat { load_id: String, boat_id: String },

    #[error("unknown or expired OAuth state")]
    InvalidState,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        ServiceError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
