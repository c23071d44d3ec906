//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El store vive aquí y no en un global.

use std::sync::Arc;

use crate::clients::{CatalogClient, NhtsaCatalogClient};
use crate::config::environment::EnvironmentConfig;
use crate::store::VehicleStore;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: VehicleStore,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, catalog: Arc<dyn CatalogClient>) -> Self {
        let store = VehicleStore::new(catalog, config.refresh_policy);
        Self { config, store }
    }

    /// Estado con el cliente real de vPIC
    pub fn with_nhtsa_catalog(config: EnvironmentConfig) -> anyhow::Result<Self> {
        let catalog = NhtsaCatalogClient::new(config.catalog_base_url.clone(), config.catalog_timeout)?;
        Ok(Self::new(config, Arc::new(catalog)))
    }
}
