//! User accounts: registration, lookup, and the current-user endpoint.

mod db;
mod domain;
mod endpoints;

pub use db::{create_user, get_user_by_email};
pub use domain::{User, UserID, UserProfile};
pub use endpoints::{get_current_user_endpoint, register_endpoint};
