use std::sync::Arc;

use contactbook_core::entity::now_millis;
use contactbook_core::{Contact, ContactId, DomainError, DomainResult};
use contactbook_events::{ContactEvent, ContactProducer, EventAction};
use contactbook_infra::{ContactRepository, ContactSearch, Database};

use crate::app::dto::{
    ContactResponse, CreateContactRequest, PageMetadata, SearchContactQuery, UpdateContactRequest,
};
use crate::app::validator::Validator;

use super::publish;

pub struct ContactUseCase {
    db: Database,
    validator: Arc<Validator>,
    repository: ContactRepository,
    producer: Option<Arc<ContactProducer>>,
}

impl ContactUseCase {
    pub fn new(
        db: Database,
        validator: Arc<Validator>,
        repository: ContactRepository,
        producer: Option<Arc<ContactProducer>>,
    ) -> Self {
        Self {
            db,
            validator,
            repository,
            producer,
        }
    }

    pub fn create(&self, user_id: &str, request: CreateContactRequest) -> DomainResult<ContactResponse> {
        self.validator.check(&request)?;

        let now = now_millis();
        let contact = Contact {
            id: ContactId::new(),
            user_id: user_id.to_string(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            created_at: now,
            updated_at: now,
        };
        self.repository.save(&self.db, contact.clone());
        publish(self.producer.as_ref(), &ContactEvent::from(&contact), EventAction::Created);

        Ok(ContactResponse::from(&contact))
    }

    pub fn update(
        &self,
        user_id: &str,
        contact_id: &str,
        request: UpdateContactRequest,
    ) -> DomainResult<ContactResponse> {
        self.validator.check(&request)?;

        let mut contact = self.find(user_id, contact_id)?;
        contact.first_name = request.first_name;
        contact.last_name = request.last_name;
        contact.email = request.email;
        contact.phone = request.phone;
        contact.updated_at = now_millis();
        self.repository.save(&self.db, contact.clone());
        publish(self.producer.as_ref(), &ContactEvent::from(&contact), EventAction::Updated);

        Ok(ContactResponse::from(&contact))
    }

    pub fn get(&self, user_id: &str, contact_id: &str) -> DomainResult<ContactResponse> {
        self.find(user_id, contact_id).map(|c| ContactResponse::from(&c))
    }

    /// Removes the contact together with its addresses.
    pub fn delete(&self, user_id: &str, contact_id: &str) -> DomainResult<bool> {
        let contact = self.find(user_id, contact_id)?;
        self.repository.delete(&self.db, &contact);
        Ok(true)
    }

    pub fn search(
        &self,
        user_id: &str,
        query: SearchContactQuery,
    ) -> DomainResult<(Vec<ContactResponse>, PageMetadata)> {
        if query.page == 0 || query.size == 0 {
            return Err(DomainError::validation("page and size must be positive"));
        }

        let filter = ContactSearch {
            user_id: user_id.to_string(),
            name: query.name,
            email: query.email,
            phone: query.phone,
            page: query.page,
            size: query.size,
        };
        let (contacts, total) = self.repository.search(&self.db, &filter);

        Ok((
            contacts.iter().map(ContactResponse::from).collect(),
            PageMetadata::new(filter.page, filter.size, total),
        ))
    }

    /// Loads a contact the caller owns; anything else is not found.
    pub(crate) fn find(&self, user_id: &str, contact_id: &str) -> DomainResult<Contact> {
        let id: ContactId = contact_id.parse()?;
        self.repository
            .find_by_id_and_user(&self.db, &id, user_id)
            .ok_or(DomainError::NotFound)
    }
}
