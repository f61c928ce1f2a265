use serde::{Deserialize, Serialize};

use contactbook_core::{Address, Contact, User};

/// A publishable event body.
///
/// Implementors are snapshots of a record at the time of a change; they carry
/// no behavior and no secrets.
pub trait Event: Serialize + core::fmt::Debug + Send + Sync {
    /// Topic every event of this type is published to.
    const TOPIC: &'static str;

    /// Singular resource name, used as the event type prefix.
    const RESOURCE: &'static str;

    /// Partition key (the record identifier).
    fn key(&self) -> String;
}

/// What happened to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    Created,
    Updated,
}

impl EventAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EventAction::Created => "created",
            EventAction::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    pub id: String,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&User> for UserEvent {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl Event for UserEvent {
    const TOPIC: &'static str = "users";
    const RESOURCE: &'static str = "user";

    fn key(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub id: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Contact> for ContactEvent {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            user_id: contact.user_id.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

impl Event for ContactEvent {
    const TOPIC: &'static str = "contacts";
    const RESOURCE: &'static str = "contact";

    fn key(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEvent {
    pub id: String,
    pub contact_id: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Address> for AddressEvent {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id.to_string(),
            contact_id: address.contact_id.to_string(),
            street: address.street.clone(),
            city: address.city.clone(),
            province: address.province.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            created_at: address.created_at,
            updated_at: address.updated_at,
        }
    }
}

impl Event for AddressEvent {
    const TOPIC: &'static str = "addresses";
    const RESOURCE: &'static str = "address";

    fn key(&self) -> String {
        self.id.clone()
    }
}
