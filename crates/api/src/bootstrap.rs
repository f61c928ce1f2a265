//! Composition root: storage, use cases, controllers, docs and routes.
//!
//! Everything fatal (a malformed catalog, a clashing binding) surfaces here,
//! before the binary opens its listener.

use std::sync::Arc;

use axum::http::header;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use thiserror::Error;

use contactbook_events::{AddressProducer, ContactProducer, MessageProducer, UserProducer};
use contactbook_infra::{AddressRepository, ContactRepository, Database, UserRepository};

use crate::app::controllers::{AddressController, ContactController, ControllerSet, UserController};
use crate::app::usecase::{AddressUseCase, ContactUseCase, UserUseCase};
use crate::app::validator::Validator;
use crate::catalog::{Catalog, CatalogError, Resource};
use crate::config::AppConfig;
use crate::contract::{self, ContractGenerator, ContractSummary, SecuritySchemeDef, ServiceInfo};
use crate::middleware::Interceptor;
use crate::router::{self, RouteBinding, RouteError, RouteRegistry};

pub const OPENAPI_PATH: &str = "/openapi.json";
pub const DOCS_PATH: &str = "/docs";

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid operation catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("route registration failed: {0}")]
    Route(#[from] RouteError),
}

pub struct BootstrapConfig {
    pub config: AppConfig,
    pub db: Database,
    pub validator: Arc<Validator>,
    pub producer: Option<Arc<dyn MessageProducer>>,
}

/// Whether the in-process docs routes were mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsStatus {
    /// Production build.
    Disabled,
    /// Generation failed; logged, service still up.
    Unavailable,
    Published(ContractSummary),
}

pub struct App {
    pub router: Router,
    pub bindings: Vec<RouteBinding>,
    pub docs: DocsStatus,
}

pub fn bootstrap(input: BootstrapConfig) -> Result<App, BootstrapError> {
    let BootstrapConfig {
        config,
        db,
        validator,
        producer,
    } = input;

    let user_repository = UserRepository::new();
    let contact_repository = ContactRepository::new();
    let address_repository = AddressRepository::new();

    let (user_producer, contact_producer, address_producer) = match producer {
        Some(handle) => (
            Some(Arc::new(UserProducer::new(handle.clone()))),
            Some(Arc::new(ContactProducer::new(handle.clone()))),
            Some(Arc::new(AddressProducer::new(handle))),
        ),
        None => (None, None, None),
    };

    let user_use_case = Arc::new(UserUseCase::new(
        db.clone(),
        validator.clone(),
        user_repository,
        user_producer,
    ));
    let contact_use_case = Arc::new(ContactUseCase::new(
        db.clone(),
        validator.clone(),
        contact_repository,
        contact_producer,
    ));
    let address_use_case = Arc::new(AddressUseCase::new(
        db,
        validator,
        contact_repository,
        address_repository,
        address_producer,
    ));

    let enabled = config.enabled_resources();
    let controllers = ControllerSet {
        users: enabled
            .contains(&Resource::Users)
            .then(|| Arc::new(UserController::new(user_use_case.clone()))),
        contacts: enabled
            .contains(&Resource::Contacts)
            .then(|| Arc::new(ContactController::new(contact_use_case))),
        addresses: enabled
            .contains(&Resource::Addresses)
            .then(|| Arc::new(AddressController::new(address_use_case))),
    };
    let interceptor = Interceptor::new(user_use_case);

    let catalog = Catalog::standard()?;
    let mut registry = RouteRegistry::new();

    let docs = if config.environment.is_production() {
        DocsStatus::Disabled
    } else {
        let documented = catalog.retain_resources(&controllers.present());
        setup_docs(&mut registry, &config, &documented)?
    };

    router::setup_guest_routes(&mut registry, &catalog, &controllers)?;
    router::setup_authenticated_routes(&mut registry, &catalog, &controllers, interceptor)?;

    let (router, bindings) = registry.into_parts();
    tracing::info!(
        app = %config.app_name,
        environment = config.environment.name().unwrap_or("development"),
        routes = bindings.len(),
        docs = !matches!(docs, DocsStatus::Disabled | DocsStatus::Unavailable),
        "application bootstrapped"
    );

    Ok(App {
        router,
        bindings,
        docs,
    })
}

fn setup_docs(
    registry: &mut RouteRegistry,
    config: &AppConfig,
    catalog: &Catalog,
) -> Result<DocsStatus, RouteError> {
    let generator = ContractGenerator::new(ServiceInfo::from_config(config), [SecuritySchemeDef::bearer_jwt()]);
    let document = generator
        .generate(catalog)
        .and_then(|doc| Ok((contract::to_pretty_json(&doc)?, ContractSummary::scan(&doc))));

    let (json, summary) = match document {
        Ok(parts) => parts,
        Err(e) => {
            tracing::warn!(error = %e, "failed to build OpenAPI document, docs disabled");
            return Ok(DocsStatus::Unavailable);
        }
    };

    let json: Arc<str> = json.into();
    registry.mount(
        OPENAPI_PATH,
        get(move || {
            let json = json.clone();
            async move { ([(header::CONTENT_TYPE, "application/json")], json.to_string()) }
        }),
    )?;
    registry.mount(DOCS_PATH, get(|| async { Html(docs_page()) }))?;

    tracing::info!(operations = summary.operation_count, path = OPENAPI_PATH, "API docs published");
    Ok(DocsStatus::Published(summary))
}

fn docs_page() -> String {
    format!(
        r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8" />
    <title>API Reference</title>
    <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
    <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css" />
  </head>
  <body>
    <elements-api apiDescriptionUrl="{OPENAPI_PATH}" router="hash" layout="sidebar"></elements-api>
  </body>
</html>
"#
    )
}
