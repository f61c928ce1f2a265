use contactbook_core::{Contact, ContactId};

use crate::database::Database;
use crate::store::ScopedStore;

/// Search filter for a user's contacts.
///
/// Text filters are case-insensitive substring matches; `name` matches either
/// the first or the last name. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSearch {
    pub user_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: usize,
    pub size: usize,
}

impl ContactSearch {
    fn matches(&self, contact: &Contact) -> bool {
        fn contains(haystack: &str, needle: &Option<String>) -> bool {
            match needle.as_deref().map(str::trim) {
                None | Some("") => true,
                Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
            }
        }

        (contains(&contact.first_name, &self.name) || contains(&contact.last_name, &self.name))
            && contains(&contact.email, &self.email)
            && contains(&contact.phone, &self.phone)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactRepository;

impl ContactRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn find_by_id_and_user(&self, db: &Database, id: &ContactId, user_id: &str) -> Option<Contact> {
        db.contacts().get(&user_id.to_string(), id)
    }

    /// Returns one page of matches and the total match count.
    pub fn search(&self, db: &Database, filter: &ContactSearch) -> (Vec<Contact>, usize) {
        let matches: Vec<Contact> = db
            .contacts()
            .list(&filter.user_id)
            .into_iter()
            .filter(|c| filter.matches(c))
            .collect();
        let total = matches.len();

        let size = filter.size.max(1);
        let skip = filter.page.saturating_sub(1).saturating_mul(size);
        let page = matches.into_iter().skip(skip).take(size).collect();

        (page, total)
    }

    pub fn save(&self, db: &Database, contact: Contact) {
        tracing::debug!(contact_id = %contact.id, user_id = %contact.user_id, "saving contact");
        db.contacts().upsert(contact.user_id.clone(), contact.id, contact);
    }

    /// Deletes the contact and every address it owns.
    pub fn delete(&self, db: &Database, contact: &Contact) {
        db.contacts().remove(&contact.user_id, &contact.id);
        db.addresses().clear_scope(&contact.id);
    }
}
