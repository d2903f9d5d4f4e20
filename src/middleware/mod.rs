pub mod auth;
pub mod base_url;
pub mod extract;
pub mod negotiate;
pub mod response;

pub use auth::AuthUser;
pub use base_url::BaseUrl;
pub use extract::{ApiPath, ApiQuery};
pub use negotiate::{AcceptsJson, JsonBody};
pub use response::{ApiResponse, ApiResult};
