//! Infrastructure layer: the storage handle and the repositories over it.

pub mod database;
pub mod repository;
pub mod store;

pub use database::Database;
pub use repository::{AddressRepository, ContactRepository, ContactSearch, UserRepository};
pub use store::{InMemoryScopedStore, ScopedStore};
