//! HTTP controllers, one per resource family.
//!
//! A controller turns an [`Endpoint`] key into a handler. The HTTP method
//! always comes from the catalog, so controllers never pick their own verbs.

use std::sync::Arc;

use axum::routing::{MethodFilter, MethodRouter};

use crate::catalog::{Endpoint, Resource, ResourceSet};

mod addresses;
mod contacts;
mod users;

pub use addresses::AddressController;
pub use contacts::ContactController;
pub use users::UserController;

/// The controllers this deployment runs. `None` means the resource is off:
/// its operations are neither routed nor documented.
#[derive(Clone, Default)]
pub struct ControllerSet {
    pub users: Option<Arc<UserController>>,
    pub contacts: Option<Arc<ContactController>>,
    pub addresses: Option<Arc<AddressController>>,
}

impl ControllerSet {
    pub fn present(&self) -> ResourceSet {
        let mut present = ResourceSet::new();
        if self.users.is_some() {
            present.insert(Resource::Users);
        }
        if self.contacts.is_some() {
            present.insert(Resource::Contacts);
        }
        if self.addresses.is_some() {
            present.insert(Resource::Addresses);
        }
        present
    }

    /// Handler for `endpoint`, or `None` when its controller is absent.
    pub fn handler(&self, endpoint: Endpoint, filter: MethodFilter) -> Option<MethodRouter> {
        match endpoint.resource() {
            Resource::Users => self.users.as_ref()?.handler(endpoint, filter),
            Resource::Contacts => self.contacts.as_ref()?.handler(endpoint, filter),
            Resource::Addresses => self.addresses.as_ref()?.handler(endpoint, filter),
        }
    }
}
