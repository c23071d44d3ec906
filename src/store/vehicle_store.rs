//! Vehicle Store
//!
//! Fuente única de verdad del listado de vehículos y de sus transiciones
//! de préstamo. No es un singleton: lo crea la raíz de la aplicación y se
//! inyecta en `AppState`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::clients::{CatalogClient, CatalogError, CatalogMake};
use crate::models::vehicle::{
    Assignment, CheckoutType, ReturnInfo, Vehicle, VehicleState, VehicleStatus,
};
use crate::store::pagination::{paginate, Page};

/// Errores de las operaciones del store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Vehicle with id '{0}' not found")]
    NotFound(i64),

    #[error("Invalid details: {0}")]
    InvalidDetails(String),

    #[error("Vehicle with id '{id}' is {status}")]
    InvalidTransition { id: i64, status: VehicleStatus },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Cómo combina un fetch el catálogo nuevo con el estado local
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshPolicy {
    /// El listado se reemplaza entero; todo vuelve a Available.
    #[default]
    Replace,
    /// Los ids que siguen en el catálogo conservan su estado.
    Merge,
}

impl FromStr for RefreshPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(RefreshPolicy::Replace),
            "merge" => Ok(RefreshPolicy::Merge),
            other => Err(format!("unknown refresh policy '{}'", other)),
        }
    }
}

impl fmt::Display for RefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshPolicy::Replace => write!(f, "replace"),
            RefreshPolicy::Merge => write!(f, "merge"),
        }
    }
}

/// Datos del formulario de salida
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutDetails {
    pub holder_name: String,
    pub time: DateTime<Utc>,
    pub checkout_type: CheckoutType,
}

/// Datos del formulario de devolución
#[derive(Debug, Clone, PartialEq)]
pub struct CheckinDetails {
    pub return_time: DateTime<Utc>,
    pub condition: String,
}

#[derive(Clone)]
pub struct VehicleStore {
    catalog: Arc<dyn CatalogClient>,
    policy: RefreshPolicy,
    vehicles: Arc<RwLock<Vec<Vehicle>>>,
}

impl VehicleStore {
    pub fn new(catalog: Arc<dyn CatalogClient>, policy: RefreshPolicy) -> Self {
        Self {
            catalog,
            policy,
            vehicles: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    /// Traer todas las marcas de coche del catálogo.
    ///
    /// El lock no se mantiene durante la llamada de red. Si falla, el
    /// listado actual queda intacto.
    pub async fn fetch_vehicles(&self) -> Result<usize, StoreError> {
        let makes = match self.catalog.list_car_makes().await {
            Ok(makes) => makes,
            Err(e) => {
                log::error!("❌ Error fetching vehicle data: {}", e);
                return Err(e.into());
            }
        };

        let fresh = dedupe(makes);
        let mut vehicles = self.vehicles.write().await;

        let next: Vec<Vehicle> = match self.policy {
            RefreshPolicy::Replace => fresh,
            RefreshPolicy::Merge => {
                let previous: HashMap<i64, &VehicleState> =
                    vehicles.iter().map(|v| (v.id, &v.state)).collect();
                fresh
                    .into_iter()
                    .map(|mut v| {
                        if let Some(state) = previous.get(&v.id) {
                            v.state = (*state).clone();
                        }
                        v
                    })
                    .collect()
            }
        };

        let count = next.len();
        *vehicles = next;
        log::info!("🚗 Vehicle list refreshed ({} makes, policy={})", count, self.policy);
        Ok(count)
    }

    /// Marcar un vehículo como prestado
    pub async fn checkout_vehicle(
        &self,
        vehicle_id: i64,
        details: CheckoutDetails,
    ) -> Result<Vehicle, StoreError> {
        let holder_name = details.holder_name.trim();
        if holder_name.is_empty() {
            return Err(StoreError::InvalidDetails("holder name is required".to_string()));
        }
        let assignment = Assignment {
            holder_name: holder_name.to_string(),
            time: details.time,
            checkout_type: details.checkout_type,
        };

        let vehicle = self
            .transition(vehicle_id, |vehicle| match vehicle.status() {
                VehicleStatus::Available => Ok(VehicleState::CheckedOut { assignment }),
                status => Err(StoreError::InvalidTransition { id: vehicle_id, status }),
            })
            .await?;

        log::info!(
            "🔑 Vehicle {} ({}) checked out to '{}'",
            vehicle.id,
            vehicle.name,
            holder_name
        );
        Ok(vehicle)
    }

    /// Devolver un vehículo prestado. La asignación se descarta.
    pub async fn checkin_vehicle(
        &self,
        vehicle_id: i64,
        details: CheckinDetails,
    ) -> Result<Vehicle, StoreError> {
        let condition = details.condition.trim();
        if condition.is_empty() {
            return Err(StoreError::InvalidDetails("condition is required".to_string()));
        }
        let return_info = ReturnInfo {
            return_time: details.return_time,
            condition: condition.to_string(),
        };

        let vehicle = self
            .transition(vehicle_id, |vehicle| match vehicle.status() {
                VehicleStatus::CheckedOut => Ok(VehicleState::Returned { return_info }),
                status => Err(StoreError::InvalidTransition { id: vehicle_id, status }),
            })
            .await?;

        log::info!("🅿️ Vehicle {} ({}) checked in", vehicle.id, vehicle.name);
        Ok(vehicle)
    }

    /// Copia del listado completo
    pub async fn vehicles(&self) -> Vec<Vehicle> {
        self.vehicles.read().await.clone()
    }

    pub async fn get_vehicle(&self, vehicle_id: i64) -> Result<Vehicle, StoreError> {
        self.vehicles
            .read()
            .await
            .iter()
            .find(|v| v.id == vehicle_id)
            .cloned()
            .ok_or(StoreError::NotFound(vehicle_id))
    }

    pub async fn len(&self) -> usize {
        self.vehicles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.vehicles.read().await.is_empty()
    }

    pub async fn page(&self, page: usize, per_page: usize) -> Page<Vehicle> {
        let vehicles = self.vehicles.read().await;
        paginate(&vehicles, page, per_page)
    }

    /// Aplicar una transición a un solo vehículo. Se construye una lista
    /// nueva y se reemplaza bajo el mismo lock de escritura.
    async fn transition<F>(&self, vehicle_id: i64, next_state: F) -> Result<Vehicle, StoreError>
    where
        F: FnOnce(&Vehicle) -> Result<VehicleState, StoreError>,
    {
        let mut vehicles = self.vehicles.write().await;

        let index = vehicles
            .iter()
            .position(|v| v.id == vehicle_id)
            .ok_or(StoreError::NotFound(vehicle_id))?;
        let state = next_state(&vehicles[index])?;

        let mut next = vehicles.clone();
        next[index].state = state;
        let updated = next[index].clone();
        *vehicles = next;

        Ok(updated)
    }
}

/// Una entrada por `MakeId`; gana la primera aparición
fn dedupe(makes: Vec<CatalogMake>) -> Vec<Vehicle> {
    let mut seen = HashSet::with_capacity(makes.len());
    let mut vehicles = Vec::with_capacity(makes.len());

    for make in makes {
        if !seen.insert(make.id) {
            log::warn!("⚠️ Duplicate MakeId {} ('{}') dropped", make.id, make.name);
            continue;
        }
        vehicles.push(Vehicle::new(make.id, make.name));
    }

    vehicles
}
