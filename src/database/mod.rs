pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryDatastore;
pub use postgres::PgDatastore;
pub use repository::{Entity, Page, Repository};
pub use store::{Datastore, DocumentPage, DocumentQuery, StoredDocument};
