// handlers/auth - login and session endpoints under /api/auth

pub mod login;
pub mod session;

pub use login::login;
pub use session::{logout, me};
