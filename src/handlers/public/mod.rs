// Public handlers: no bearer token required.
pub mod login;
pub mod root;
pub mod signup;

pub use login::login;
pub use root::{health, welcome};
pub use signup::create_user;
