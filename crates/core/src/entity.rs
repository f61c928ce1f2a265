//! Stored records: users, their contacts, and contact addresses.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::id::{AddressId, ContactId};

/// Current time in epoch milliseconds, the unit every timestamp uses.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// An account holder. The username doubles as the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// SHA-256 hex digest; the plaintext never reaches storage.
    pub password_hash: String,
    /// Session token, present between login and logout.
    pub token: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A contact owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Contact {
    /// `first last`, trimmed when the last name is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// A postal address owned by exactly one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: AddressId,
    pub contact_id: ContactId,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: i64,
    pub updated_at: i64,
}
