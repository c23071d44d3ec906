//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su máquina de estados de préstamo.
//! Cada vehículo corresponde a una marca del catálogo vPIC ("MakeId"/"MakeName").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado visible del vehículo en el listado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    CheckedOut,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleStatus::Available => write!(f, "available"),
            VehicleStatus::CheckedOut => write!(f, "checked out"),
        }
    }
}

/// Tipo de salida elegido en el formulario
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CheckoutType {
    #[default]
    #[serde(rename = "loan")]
    Loan,
    #[serde(rename = "test-drive")]
    TestDrive,
}

impl CheckoutType {
    pub fn label(&self) -> &'static str {
        match self {
            CheckoutType::Loan => "Loan",
            CheckoutType::TestDrive => "Test Drive",
        }
    }
}

/// Datos de la persona que se lleva el vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub holder_name: String,
    pub time: DateTime<Utc>,
    pub checkout_type: CheckoutType,
}

/// Datos registrados al devolver el vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReturnInfo {
    pub return_time: DateTime<Utc>,
    pub condition: String,
}

/// Estado del vehículo. La asignación solo existe mientras está prestado
/// y los datos de devolución solo tras un check-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VehicleState {
    #[default]
    Available,
    CheckedOut { assignment: Assignment },
    Returned { return_info: ReturnInfo },
}

/// Vehicle principal - una marca del catálogo con su estado de préstamo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub state: VehicleState,
}

impl Vehicle {
    /// Crear un vehículo recién traído del catálogo (siempre disponible)
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            state: VehicleState::Available,
        }
    }

    pub fn status(&self) -> VehicleStatus {
        match self.state {
            VehicleState::CheckedOut { .. } => VehicleStatus::CheckedOut,
            VehicleState::Available | VehicleState::Returned { .. } => VehicleStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status() == VehicleStatus::Available
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match &self.state {
            VehicleState::CheckedOut { assignment } => Some(assignment),
            _ => None,
        }
    }

    pub fn return_info(&self) -> Option<&ReturnInfo> {
        match &self.state {
            VehicleState::Returned { return_info } => Some(return_info),
            _ => None,
        }
    }
}
