//! HTTP API: operation catalog, contract generation, routing and wiring.

pub mod app;
pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod context;
pub mod contract;
pub mod middleware;
pub mod path_template;
pub mod router;

pub use bootstrap::{App, BootstrapConfig, BootstrapError, DocsStatus, bootstrap};
pub use catalog::Catalog;
pub use config::AppConfig;
