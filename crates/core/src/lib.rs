//! `contactbook-core`: domain building blocks shared by every layer.
//!
//! This crate contains **pure domain** types (no storage, no HTTP).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::{Address, Contact, User};
pub use error::{DomainError, DomainResult};
pub use id::{AddressId, ContactId};
