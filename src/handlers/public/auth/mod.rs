pub mod login;
pub mod oauth;

pub use login::get as login_get;
pub use oauth::get as oauth_get;
