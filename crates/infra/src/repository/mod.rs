//! Repositories: record-level access over the [`crate::Database`] handle.
//!
//! Repositories hold no state of their own; every call takes the handle, so a
//! single repository instance can serve any database (tests use a fresh one).

pub mod address;
pub mod contact;
pub mod user;

pub use address::AddressRepository;
pub use contact::{ContactRepository, ContactSearch};
pub use user::UserRepository;
