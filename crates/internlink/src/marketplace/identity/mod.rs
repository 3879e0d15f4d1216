//! User accounts and the current session.

pub mod domain;
pub mod router;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{NewUserInput, ProfilePatch, Role, User, UserId};
pub use router::identity_router;
pub use store::{IdentityError, IdentityStore};
