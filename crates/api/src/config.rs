//! Process configuration, read once from the environment at startup.

use std::num::ParseIntError;

use thiserror::Error;

use contactbook_observability::{LogFormat, UnknownLogFormat};

use crate::catalog::{Resource, ResourceSet, UnknownResource};

pub const DEFAULT_APP_NAME: &str = "Contact Management API";
pub const DEFAULT_WEB_PORT: u16 = 3001;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("WEB_PORT must be a port number, got '{value}': {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("LOG_FORMAT: {0}")]
    InvalidLogFormat(#[from] UnknownLogFormat),

    #[error("DISABLED_RESOURCES: {0}")]
    UnknownResource(#[from] UnknownResource),

    #[error("{name} must be a boolean, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}

/// Deployment environment (`APP_ENV`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment(Option<String>);

impl Environment {
    pub fn new(name: Option<String>) -> Self {
        Self(name)
    }

    pub fn production() -> Self {
        Self(Some("production".to_string()))
    }

    /// Exactly `production`; anything else, or unset, is a development build.
    pub fn is_production(&self) -> bool {
        self.0.as_deref() == Some("production")
    }

    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub web_port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub disabled_resources: ResourceSet,
    pub producer_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            web_port: DEFAULT_WEB_PORT,
            environment: Environment::default(),
            log_format: LogFormat::default(),
            disabled_resources: ResourceSet::new(),
            producer_enabled: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let web_port = match var("WEB_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.web_port,
        };

        let log_format = match var("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => defaults.log_format,
        };

        let disabled_resources = match var("DISABLED_RESOURCES") {
            Some(value) => value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse::<Resource>)
                .collect::<Result<ResourceSet, _>>()?,
            None => defaults.disabled_resources,
        };

        let producer_enabled = match var("PRODUCER_ENABLED") {
            Some(value) => parse_flag("PRODUCER_ENABLED", value)?,
            None => defaults.producer_enabled,
        };

        Ok(Self {
            app_name: var("APP_NAME").unwrap_or(defaults.app_name),
            web_port,
            environment: Environment::new(var("APP_ENV")),
            log_format,
            disabled_resources,
            producer_enabled,
        })
    }

    /// Resources that get a controller.
    pub fn enabled_resources(&self) -> ResourceSet {
        Resource::ALL
            .into_iter()
            .filter(|r| !self.disabled_resources.contains(r))
            .collect()
    }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { name, value }),
    }
}
