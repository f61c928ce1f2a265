use std::sync::Arc;

use contactbook_core::entity::now_millis;
use contactbook_core::{Address, AddressId, Contact, ContactId, DomainError, DomainResult};
use contactbook_events::{AddressEvent, AddressProducer, EventAction};
use contactbook_infra::{AddressRepository, ContactRepository, Database};

use crate::app::dto::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use crate::app::validator::Validator;

use super::publish;

/// Address operations. Every call first proves the contact belongs to the
/// caller; a foreign contact looks exactly like a missing one.
pub struct AddressUseCase {
    db: Database,
    validator: Arc<Validator>,
    contacts: ContactRepository,
    repository: AddressRepository,
    producer: Option<Arc<AddressProducer>>,
}

impl AddressUseCase {
    pub fn new(
        db: Database,
        validator: Arc<Validator>,
        contacts: ContactRepository,
        repository: AddressRepository,
        producer: Option<Arc<AddressProducer>>,
    ) -> Self {
        Self {
            db,
            validator,
            contacts,
            repository,
            producer,
        }
    }

    pub fn create(
        &self,
        user_id: &str,
        contact_id: &str,
        request: CreateAddressRequest,
    ) -> DomainResult<AddressResponse> {
        self.validator.check(&request)?;
        let contact = self.owned_contact(user_id, contact_id)?;

        let now = now_millis();
        let address = Address {
            id: AddressId::new(),
            contact_id: contact.id,
            street: request.street,
            city: request.city,
            province: request.province,
            postal_code: request.postal_code,
            country: request.country,
            created_at: now,
            updated_at: now,
        };
        self.repository.save(&self.db, address.clone());
        publish(self.producer.as_ref(), &AddressEvent::from(&address), EventAction::Created);

        Ok(AddressResponse::from(&address))
    }

    pub fn update(
        &self,
        user_id: &str,
        contact_id: &str,
        address_id: &str,
        request: UpdateAddressRequest,
    ) -> DomainResult<AddressResponse> {
        self.validator.check(&request)?;
        let mut address = self.find(user_id, contact_id, address_id)?;

        address.street = request.street;
        address.city = request.city;
        address.province = request.province;
        address.postal_code = request.postal_code;
        address.country = request.country;
        address.updated_at = now_millis();
        self.repository.save(&self.db, address.clone());
        publish(self.producer.as_ref(), &AddressEvent::from(&address), EventAction::Updated);

        Ok(AddressResponse::from(&address))
    }

    pub fn get(&self, user_id: &str, contact_id: &str, address_id: &str) -> DomainResult<AddressResponse> {
        self.find(user_id, contact_id, address_id)
            .map(|a| AddressResponse::from(&a))
    }

    pub fn delete(&self, user_id: &str, contact_id: &str, address_id: &str) -> DomainResult<bool> {
        let address = self.find(user_id, contact_id, address_id)?;
        self.repository.delete(&self.db, &address);
        Ok(true)
    }

    pub fn list(&self, user_id: &str, contact_id: &str) -> DomainResult<Vec<AddressResponse>> {
        let contact = self.owned_contact(user_id, contact_id)?;
        Ok(self
            .repository
            .find_all_by_contact(&self.db, &contact.id)
            .iter()
            .map(AddressResponse::from)
            .collect())
    }

    fn owned_contact(&self, user_id: &str, contact_id: &str) -> DomainResult<Contact> {
        let id: ContactId = contact_id.parse()?;
        self.contacts
            .find_by_id_and_user(&self.db, &id, user_id)
            .ok_or(DomainError::NotFound)
    }

    fn find(&self, user_id: &str, contact_id: &str, address_id: &str) -> DomainResult<Address> {
        let contact = self.owned_contact(user_id, contact_id)?;
        let id: AddressId = address_id.parse()?;
        self.repository
            .find_by_id_and_contact(&self.db, &id, &contact.id)
            .ok_or(DomainError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::dto::CreateContactRequest;
    use crate::app::usecase::ContactUseCase;

    struct Fixture {
        contacts: ContactUseCase,
        addresses: AddressUseCase,
    }

    fn fixture() -> Fixture {
        let db = Database::new();
        let validator = Arc::new(Validator::new());
        Fixture {
            contacts: ContactUseCase::new(db.clone(), validator.clone(), ContactRepository::new(), None),
            addresses: AddressUseCase::new(
                db,
                validator,
                ContactRepository::new(),
                AddressRepository::new(),
                None,
            ),
        }
    }

    fn contact(f: &Fixture, owner: &str) -> String {
        f.contacts
            .create(
                owner,
                CreateContactRequest {
                    first_name: "Bob".to_string(),
                    last_name: String::new(),
                    email: String::new(),
                    phone: String::new(),
                },
            )
            .unwrap()
            .id
    }

    fn address(country: &str) -> CreateAddressRequest {
        CreateAddressRequest {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            province: String::new(),
            postal_code: "12345".to_string(),
            country: country.to_string(),
        }
    }

    #[test]
    fn addresses_follow_their_contact() {
        let f = fixture();
        let contact_id = contact(&f, "alice");
        let created = f.addresses.create("alice", &contact_id, address("NL")).unwrap();

        assert_eq!(f.addresses.list("alice", &contact_id).unwrap().len(), 1);
        assert_eq!(
            f.addresses.get("alice", &contact_id, &created.id).unwrap().country,
            "NL"
        );
    }

    #[test]
    fn foreign_contacts_are_invisible() {
        let f = fixture();
        let contact_id = contact(&f, "alice");

        let err = f.addresses.create("mallory", &contact_id, address("NL")).unwrap_err();
        assert_eq!(err, DomainError::NotFound);
        assert_eq!(f.addresses.list("mallory", &contact_id).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn deleting_the_contact_cascades() {
        let f = fixture();
        let contact_id = contact(&f, "alice");
        let created = f.addresses.create("alice", &contact_id, address("NL")).unwrap();

        f.contacts.delete("alice", &contact_id).unwrap();
        assert_eq!(
            f.addresses.get("alice", &contact_id, &created.id).unwrap_err(),
            DomainError::NotFound
        );
    }

    #[test]
    fn country_is_required() {
        let f = fixture();
        let contact_id = contact(&f, "alice");
        let err = f.addresses.create("alice", &contact_id, address("")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn update_and_delete() {
        let f = fixture();
        let contact_id = contact(&f, "alice");
        let created = f.addresses.create("alice", &contact_id, address("NL")).unwrap();

        let updated = f
            .addresses
            .update(
                "alice",
                &contact_id,
                &created.id,
                UpdateAddressRequest {
                    street: String::new(),
                    city: "Utrecht".to_string(),
                    province: String::new(),
                    postal_code: String::new(),
                    country: "NL".to_string(),
                },
            )
            .unwrap();
        assert_eq!(updated.city, "Utrecht");

        assert!(f.addresses.delete("alice", &contact_id, &created.id).unwrap());
        assert!(f.addresses.list("alice", &contact_id).unwrap().is_empty());
    }
}
