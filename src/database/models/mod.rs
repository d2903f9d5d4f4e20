pub mod boat;
pub mod load;
pub mod oauth_state;
pub mod user;

pub use boat::{Boat, LoadRef};
pub use load::{Carrier, Load};
pub use oauth_state::OAuthState;
pub use user::User;
