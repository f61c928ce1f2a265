use std::sync::Arc;

use contactbook_core::{Address, AddressId, Contact, ContactId, User};

use crate::store::InMemoryScopedStore;

pub type UserTable = InMemoryScopedStore<(), String, User>;
pub type ContactTable = InMemoryScopedStore<String, ContactId, Contact>;
pub type AddressTable = InMemoryScopedStore<ContactId, AddressId, Address>;

/// Storage handle shared by every repository.
///
/// Clones share the same tables. Users live in a single global scope; contacts
/// are scoped by owning username; addresses by owning contact.
#[derive(Debug, Clone, Default)]
pub struct Database {
    users: Arc<UserTable>,
    contacts: Arc<ContactTable>,
    addresses: Arc<AddressTable>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &UserTable {
        &self.users
    }

    pub fn contacts(&self) -> &ContactTable {
        &self.contacts
    }

    pub fn addresses(&self) -> &AddressTable {
        &self.addresses
    }
}
