use contactbook_core::{Address, AddressId, ContactId};

use crate::database::Database;
use crate::store::ScopedStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct AddressRepository;

impl AddressRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn find_by_id_and_contact(
        &self,
        db: &Database,
        id: &AddressId,
        contact_id: &ContactId,
    ) -> Option<Address> {
        db.addresses().get(contact_id, id)
    }

    pub fn find_all_by_contact(&self, db: &Database, contact_id: &ContactId) -> Vec<Address> {
        db.addresses().list(contact_id)
    }

    pub fn save(&self, db: &Database, address: Address) {
        tracing::debug!(address_id = %address.id, contact_id = %address.contact_id, "saving address");
        db.addresses().upsert(address.contact_id, address.id, address);
    }

    pub fn delete(&self, db: &Database, address: &Address) {
        db.addresses().remove(&address.contact_id, &address.id);
    }
}
