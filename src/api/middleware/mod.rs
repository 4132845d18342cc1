pub mod auth;

pub use auth::{OwnerAuth, OwnerId};
