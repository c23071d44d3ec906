//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto; un valor mal formado es un error.

use std::env;
use std::time::Duration;
use thiserror::Error;

use crate::store::{RefreshPolicy, DEFAULT_PER_PAGE, MAX_PER_PAGE};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub catalog_base_url: String,
    pub catalog_timeout: Duration,
    pub page_size: usize,
    pub refresh_policy: RefreshPolicy,
    pub fetch_on_startup: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            catalog_timeout: Duration::from_secs(30),
            page_size: DEFAULT_PER_PAGE,
            refresh_policy: RefreshPolicy::Replace,
            fetch_on_startup: true,
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Leer la configuración desde cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(value) => parse_number::<u16>("PORT", value)?,
            None => defaults.port,
        };

        let catalog_timeout = match get("CATALOG_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number::<u64>("CATALOG_TIMEOUT_SECS", value)?),
            None => defaults.catalog_timeout,
        };

        let page_size = match get("PAGE_SIZE") {
            Some(value) => {
                let size = parse_number::<usize>("PAGE_SIZE", value.clone())?;
                if size == 0 || size > MAX_PER_PAGE {
                    return Err(ConfigError::Invalid {
                        name: "PAGE_SIZE",
                        value,
                        reason: format!("must be between 1 and {}", MAX_PER_PAGE),
                    });
                }
                size
            }
            None => defaults.page_size,
        };

        let refresh_policy = match get("REFRESH_POLICY") {
            Some(value) => value.parse::<RefreshPolicy>().map_err(|reason| ConfigError::Invalid {
                name: "REFRESH_POLICY",
                value,
                reason,
            })?,
            None => defaults.refresh_policy,
        };

        let fetch_on_startup = match get("FETCH_ON_STARTUP") {
            Some(value) => parse_bool("FETCH_ON_STARTUP", value)?,
            None => defaults.fetch_on_startup,
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            port,
            host: get("HOST").unwrap_or(defaults.host),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            catalog_base_url: get("CATALOG_BASE_URL").unwrap_or(defaults.catalog_base_url),
            catalog_timeout,
            page_size,
            refresh_policy,
            fetch_on_startup,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}

fn parse_bool(name: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}
