pub mod format;
pub mod pagination;
pub mod payload;

pub use format::{boat_to_api_value, load_to_api_value, page_to_api_value, user_to_api_value};
pub use pagination::PageQuery;
pub use payload::Presence;
