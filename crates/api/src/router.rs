//! Runtime router: binds catalog operations to controller handlers.
//!
//! Registration order matters. Guest routes are bound first; then the auth
//! interceptor is installed and applies to every binding made after it, the
//! same way a middleware chain would.

use axum::routing::{MethodFilter, MethodRouter};
use axum::Router;
use thiserror::Error;

use crate::app::controllers::ControllerSet;
use crate::catalog::{Catalog, HttpMethod, Operation};
use crate::middleware::Interceptor;
use crate::path_template::{self, TemplateError};

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("{method} {path} is already bound (operation '{operation}')")]
    DuplicateBinding {
        operation: &'static str,
        method: HttpMethod,
        path: String,
    },

    #[error("guest operation '{0}' registered after the auth interceptor")]
    GuestAfterInterceptor(&'static str),

    #[error("operation '{0}' requires authentication but no interceptor is installed")]
    MissingInterceptor(&'static str),

    #[error("route '{0}' is already mounted")]
    DuplicateMount(String),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// A bound operation, as the router sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBinding {
    pub operation_id: &'static str,
    pub method: HttpMethod,
    /// Router syntax (`:name` parameters).
    pub path: String,
    pub interceptors: Vec<&'static str>,
}

pub fn method_filter(method: HttpMethod) -> MethodFilter {
    match method {
        HttpMethod::Get => MethodFilter::GET,
        HttpMethod::Post => MethodFilter::POST,
        HttpMethod::Put => MethodFilter::PUT,
        HttpMethod::Patch => MethodFilter::PATCH,
        HttpMethod::Delete => MethodFilter::DELETE,
    }
}

#[derive(Default)]
pub struct RouteRegistry {
    router: Router,
    bindings: Vec<RouteBinding>,
    mounted: Vec<String>,
    interceptor: Option<Interceptor>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every binding made after this call goes through `interceptor`.
    pub fn use_interceptor(&mut self, interceptor: Interceptor) {
        tracing::debug!(interceptor = interceptor.name(), "interceptor installed");
        self.interceptor = Some(interceptor);
    }

    pub fn bind(&mut self, op: &Operation, handler: MethodRouter) -> Result<(), RouteError> {
        let path = path_template::to_router_path(op.path)?;
        if self
            .bindings
            .iter()
            .any(|b| b.method == op.method && path_template::equivalent(&b.path, &path))
        {
            return Err(RouteError::DuplicateBinding {
                operation: op.id,
                method: op.method,
                path,
            });
        }

        let (handler, interceptors) = match (&self.interceptor, op.requires_auth()) {
            (Some(_), false) => return Err(RouteError::GuestAfterInterceptor(op.id)),
            (None, true) => return Err(RouteError::MissingInterceptor(op.id)),
            (None, false) => (handler, Vec::new()),
            (Some(interceptor), true) => (interceptor.apply(handler), vec![interceptor.name()]),
        };

        self.router = std::mem::take(&mut self.router).route(&path, handler);
        tracing::debug!(operation = op.id, method = %op.method, %path, "route bound");
        self.bindings.push(RouteBinding {
            operation_id: op.id,
            method: op.method,
            path,
            interceptors,
        });
        Ok(())
    }

    /// Mounts an unauthenticated route that is not part of the catalog.
    pub fn mount(&mut self, path: &str, handler: MethodRouter) -> Result<(), RouteError> {
        if self.mounted.iter().any(|p| p == path) {
            return Err(RouteError::DuplicateMount(path.to_string()));
        }
        self.router = std::mem::take(&mut self.router).route(path, handler);
        self.mounted.push(path.to_string());
        Ok(())
    }

    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    pub fn mounted(&self) -> &[String] {
        &self.mounted
    }

    pub fn into_parts(self) -> (Router, Vec<RouteBinding>) {
        (self.router, self.bindings)
    }
}

/// Binds every guest operation whose controller is present.
pub fn setup_guest_routes(
    registry: &mut RouteRegistry,
    catalog: &Catalog,
    controllers: &ControllerSet,
) -> Result<(), RouteError> {
    bind_all(registry, catalog.guest(), controllers)
}

/// Installs `interceptor`, then binds every authenticated operation whose
/// controller is present.
pub fn setup_authenticated_routes(
    registry: &mut RouteRegistry,
    catalog: &Catalog,
    controllers: &ControllerSet,
    interceptor: Interceptor,
) -> Result<(), RouteError> {
    registry.use_interceptor(interceptor);
    bind_all(registry, catalog.authenticated(), controllers)
}

fn bind_all<'a>(
    registry: &mut RouteRegistry,
    operations: impl Iterator<Item = &'a Operation>,
    controllers: &ControllerSet,
) -> Result<(), RouteError> {
    for op in operations {
        match controllers.handler(op.endpoint, method_filter(op.method)) {
            Some(handler) => registry.bind(op, handler)?,
            None => tracing::debug!(operation = op.id, resource = %op.resource(), "controller absent, skipping"),
        }
    }
    Ok(())
}
