use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use contactbook_core::{Address, Contact, User};

use crate::app::validator::{Rules, Validate};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    /// Username, unique across the service.
    pub id: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginUserRequest {
    pub id: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAddressRequest {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub postal_code: String,
    pub country: String,
}

/// Query string of `GET /api/contacts`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchContactQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
}

impl Default for SearchContactQuery {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            phone: None,
            page: default_page(),
            size: default_size(),
        }
    }
}

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_SIZE: usize = 10;

fn default_page() -> usize {
    DEFAULT_PAGE
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

impl Validate for RegisterUserRequest {
    fn rules(&self, rules: &mut Rules) {
        rules
            .required("id", &self.id, 100)
            .required("password", &self.password, 100)
            .required("name", &self.name, 100);
    }
}

impl Validate for LoginUserRequest {
    fn rules(&self, rules: &mut Rules) {
        rules
            .required("id", &self.id, 100)
            .required("password", &self.password, 100);
    }
}

impl Validate for UpdateUserRequest {
    fn rules(&self, rules: &mut Rules) {
        rules
            .optional("name", self.name.as_deref(), 100)
            .optional("password", self.password.as_deref(), 100);
    }
}

fn contact_rules(rules: &mut Rules, first: &str, last: &str, email: &str, phone: &str) {
    rules
        .required("first_name", first, 100)
        .optional("last_name", Some(last), 100)
        .optional("email", Some(email), 200)
        .email("email", email)
        .optional("phone", Some(phone), 20);
}

impl Validate for CreateContactRequest {
    fn rules(&self, rules: &mut Rules) {
        contact_rules(rules, &self.first_name, &self.last_name, &self.email, &self.phone);
    }
}

impl Validate for UpdateContactRequest {
    fn rules(&self, rules: &mut Rules) {
        contact_rules(rules, &self.first_name, &self.last_name, &self.email, &self.phone);
    }
}

fn address_rules(rules: &mut Rules, street: &str, city: &str, province: &str, postal: &str, country: &str) {
    rules
        .optional("street", Some(street), 255)
        .optional("city", Some(city), 255)
        .optional("province", Some(province), 255)
        .optional("postal_code", Some(postal), 10)
        .required("country", country, 100);
}

impl Validate for CreateAddressRequest {
    fn rules(&self, rules: &mut Rules) {
        address_rules(rules, &self.street, &self.city, &self.province, &self.postal_code, &self.country);
    }
}

impl Validate for UpdateAddressRequest {
    fn rules(&self, rules: &mut Rules) {
        address_rules(rules, &self.street, &self.city, &self.province, &self.postal_code, &self.country);
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    /// Only present on login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl UserResponse {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            token: None,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Contact> for ContactResponse {
    fn from(c: &Contact) -> Self {
        Self {
            id: c.id.to_string(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub id: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub country: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Address> for AddressResponse {
    fn from(a: &Address) -> Self {
        Self {
            id: a.id.to_string(),
            street: a.street.clone(),
            city: a.city.clone(),
            province: a.province.clone(),
            postal_code: a.postal_code.clone(),
            country: a.country.clone(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMetadata {
    pub page: usize,
    pub size: usize,
    pub total_item: usize,
    pub total_page: usize,
}

impl PageMetadata {
    pub fn new(page: usize, size: usize, total_item: usize) -> Self {
        let size = size.max(1);
        Self {
            page,
            size,
            total_item,
            total_page: total_item.div_ceil(size),
        }
    }
}

/// Success envelope shared by every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<PageMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
}

impl<T> WebResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            paging: None,
            errors: None,
        }
    }

    pub fn paged(data: T, paging: PageMetadata) -> Self {
        Self {
            data,
            paging: Some(paging),
            errors: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_defaults_page_and_size() {
        let q: SearchContactQuery = serde_json::from_str(r#"{"name":"bo"}"#).unwrap();
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 10);
        assert_eq!(q.name.as_deref(), Some("bo"));
    }

    #[test]
    fn page_metadata_rounds_total_pages_up() {
        let meta = PageMetadata::new(2, 10, 21);
        assert_eq!(meta.total_page, 3);
        assert_eq!(PageMetadata::new(1, 10, 0).total_page, 0);
    }

    #[test]
    fn token_is_omitted_unless_set() {
        let user = User {
            id: "alice".to_string(),
            name: "Alice".to_string(),
            password_hash: "hash".to_string(),
            token: Some("secret".to_string()),
            created_at: 1,
            updated_at: 1,
        };
        let json = serde_json::to_value(UserResponse::from_user(&user)).unwrap();
        assert!(json.get("token").is_none());

        let json = serde_json::to_value(UserResponse::from_user(&user).with_token("t")).unwrap();
        assert_eq!(json["token"], "t");
    }

    #[test]
    fn envelope_skips_empty_paging() {
        let json = serde_json::to_value(WebResponse::ok(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "data": true }));
    }
}
