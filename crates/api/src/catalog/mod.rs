//! The operation catalog.
//!
//! Each HTTP operation is declared once, here: identifier, method, path
//! template, documentation strings, tags, security, input and output shape.
//! The router and the contract generator both read this table, so a route and
//! its documentation cannot drift apart.
//!
//! Entries carry an [`Endpoint`] key instead of a handler; the controller set
//! resolves the key to a handler at bind time.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use utoipa::openapi::{RefOr, Schema};
use utoipa::ToSchema;

use crate::path_template::{self, TemplateError};

mod operations;

pub use operations::{register_authenticated_operations, register_guest_operations};

/// Name of the security scheme every authenticated operation requires.
pub const BEARER: &str = "bearer";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate operation id '{0}'")]
    DuplicateOperationId(&'static str),

    #[error("duplicate route {method} {path}")]
    DuplicateRoute { method: HttpMethod, path: &'static str },

    #[error("operation '{id}' declares path parameters {declared:?} but its template has {template:?}")]
    PathParameterMismatch {
        id: &'static str,
        template: Vec<String>,
        declared: Vec<String>,
    },

    #[error("operation '{id}': {source}")]
    Template {
        id: &'static str,
        #[source]
        source: TemplateError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource families; one controller each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resource {
    Users,
    Contacts,
    Addresses,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Users, Resource::Contacts, Resource::Addresses];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Contacts => "contacts",
            Resource::Addresses => "addresses",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown resource '{0}' (expected users, contacts or addresses)")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(Resource::Users),
            "contacts" | "contact" => Ok(Resource::Contacts),
            "addresses" | "address" => Ok(Resource::Addresses),
            _ => Err(UnknownResource(s.to_string())),
        }
    }
}

pub type ResourceSet = BTreeSet<Resource>;

/// Handler key. The catalog never holds behavior, only this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    RegisterUser,
    LoginUser,
    LogoutUser,
    UpdateCurrentUser,
    CurrentUser,
    ListContacts,
    CreateContact,
    UpdateContact,
    GetContact,
    DeleteContact,
    ListAddresses,
    CreateAddress,
    UpdateAddress,
    GetAddress,
    DeleteAddress,
}

impl Endpoint {
    pub fn resource(self) -> Resource {
        use Endpoint::*;
        match self {
            RegisterUser | LoginUser | LogoutUser | UpdateCurrentUser | CurrentUser => Resource::Users,
            ListContacts | CreateContact | UpdateContact | GetContact | DeleteContact => Resource::Contacts,
            ListAddresses | CreateAddress | UpdateAddress | GetAddress | DeleteAddress => {
                Resource::Addresses
            }
        }
    }
}

/// A named schema, resolved lazily from a `ToSchema` type.
#[derive(Clone, Copy)]
pub struct SchemaRef {
    name: fn() -> Cow<'static, str>,
    schema: fn() -> RefOr<Schema>,
}

impl SchemaRef {
    pub fn of<T: ToSchema>() -> Self {
        Self {
            name: T::name,
            schema: T::schema,
        }
    }

    pub fn name(&self) -> Cow<'static, str> {
        (self.name)()
    }

    pub fn schema(&self) -> RefOr<Schema> {
        (self.schema)()
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaRef").field(&self.name()).finish()
    }
}

impl PartialEq for SchemaRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParam {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer { default: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
}

impl QueryParam {
    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::String,
        }
    }

    pub fn integer(name: &'static str, description: &'static str, default: i64) -> Self {
        Self {
            name,
            description,
            kind: ParamKind::Integer { default },
        }
    }
}

/// What goes under `data` in the success envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload {
    Object(SchemaRef),
    List(SchemaRef),
    /// A list plus `paging` metadata.
    Paged(SchemaRef),
    /// A bare `true`.
    Flag,
}

impl Payload {
    pub fn object<T: ToSchema>() -> Self {
        Payload::Object(SchemaRef::of::<T>())
    }

    pub fn list<T: ToSchema>() -> Self {
        Payload::List(SchemaRef::of::<T>())
    }

    pub fn paged<T: ToSchema>() -> Self {
        Payload::Paged(SchemaRef::of::<T>())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub id: &'static str,
    pub method: HttpMethod,
    /// OpenAPI-style template (`{name}` parameters).
    pub path: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub tags: Vec<&'static str>,
    /// Security scheme names; empty means public.
    pub security: Vec<&'static str>,
    pub path_params: Vec<PathParam>,
    pub query_params: Vec<QueryParam>,
    pub body: Option<SchemaRef>,
    pub output: Payload,
    pub endpoint: Endpoint,
}

impl Operation {
    pub fn new(id: &'static str, method: HttpMethod, path: &'static str, endpoint: Endpoint) -> Self {
        Self {
            id,
            method,
            path,
            summary: "",
            description: "",
            tags: Vec::new(),
            security: Vec::new(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            body: None,
            output: Payload::Flag,
            endpoint,
        }
    }

    pub fn summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn secured(mut self, scheme: &'static str) -> Self {
        self.security.push(scheme);
        self
    }

    pub fn path_param(mut self, name: &'static str, description: &'static str) -> Self {
        self.path_params.push(PathParam { name, description });
        self
    }

    pub fn query(mut self, param: QueryParam) -> Self {
        self.query_params.push(param);
        self
    }

    pub fn body<T: ToSchema>(mut self) -> Self {
        self.body = Some(SchemaRef::of::<T>());
        self
    }

    pub fn returns(mut self, output: Payload) -> Self {
        self.output = output;
        self
    }

    pub fn requires_auth(&self) -> bool {
        !self.security.is_empty()
    }

    pub fn resource(&self) -> Resource {
        self.endpoint.resource()
    }
}

/// Ordered, validated collection of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    operations: Vec<Operation>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guest operations followed by authenticated ones.
    pub fn standard() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        register_guest_operations(&mut catalog)?;
        register_authenticated_operations(&mut catalog)?;
        Ok(catalog)
    }

    pub fn register(&mut self, operation: Operation) -> Result<(), CatalogError> {
        if self.get(operation.id).is_some() {
            return Err(CatalogError::DuplicateOperationId(operation.id));
        }

        let clash = self.operations.iter().any(|existing| {
            existing.method == operation.method
                && path_template::equivalent(existing.path, operation.path)
        });
        if clash {
            return Err(CatalogError::DuplicateRoute {
                method: operation.method,
                path: operation.path,
            });
        }

        let template: Vec<String> = path_template::parameters(operation.path)
            .map_err(|source| CatalogError::Template {
                id: operation.id,
                source,
            })?
            .into_iter()
            .map(str::to_string)
            .collect();
        let declared: Vec<String> = operation
            .path_params
            .iter()
            .map(|p| p.name.to_string())
            .collect();
        if template != declared {
            return Err(CatalogError::PathParameterMismatch {
                id: operation.id,
                template,
                declared,
            });
        }

        self.operations.push(operation);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    pub fn guest(&self) -> impl Iterator<Item = &Operation> {
        self.iter().filter(|op| !op.requires_auth())
    }

    pub fn authenticated(&self) -> impl Iterator<Item = &Operation> {
        self.iter().filter(|op| op.requires_auth())
    }

    /// Operations whose resource is in `present`, order preserved.
    pub fn retain_resources(&self, present: &ResourceSet) -> Catalog {
        Catalog {
            operations: self
                .operations
                .iter()
                .filter(|op| present.contains(&op.resource()))
                .cloned()
                .collect(),
        }
    }

    /// Distinct tags in first-seen order.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut seen = HashSet::new();
        self.iter()
            .flat_map(|op| op.tags.iter().copied())
            .filter(|tag| seen.insert(*tag))
            .collect()
    }
}
