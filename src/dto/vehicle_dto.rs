use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{CheckoutType, Vehicle, VehicleStatus};
use crate::store::{CheckinDetails, CheckoutDetails};
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_datetime, validate_datetime, validate_not_blank};

// Request del formulario de salida
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub holder_name: String,

    #[validate(custom = "validate_datetime")]
    pub time: String,

    #[serde(default)]
    pub checkout_type: CheckoutType,
}

impl CheckoutRequest {
    pub fn into_details(self) -> Result<CheckoutDetails, AppError> {
        self.validate()?;
        Ok(CheckoutDetails {
            time: parse_datetime(&self.time).map_err(|_| AppError::BadRequest("time must be RFC 3339".to_string()))?,
            holder_name: self.holder_name,
            checkout_type: self.checkout_type,
        })
    }
}

// Request del formulario de devolución
#[derive(Debug, Deserialize, Validate)]
pub struct CheckinRequest {
    #[validate(custom = "validate_datetime")]
    pub return_time: String,

    #[validate(custom = "validate_not_blank", length(max = 500))]
    pub condition: String,
}

impl CheckinRequest {
    pub fn into_details(self) -> Result<CheckinDetails, AppError> {
        self.validate()?;
        Ok(CheckinDetails {
            return_time: parse_datetime(&self.return_time)
                .map_err(|_| AppError::BadRequest("return_time must be RFC 3339".to_string()))?,
            condition: self.condition,
        })
    }
}

// Query del listado paginado
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    pub fn per_page_or(&self, default: usize) -> usize {
        self.per_page.unwrap_or(default)
    }
}

// Response de vehículo, con los datos del préstamo aplanados
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VehicleResponse {
    pub id: i64,
    pub name: String,
    pub status: VehicleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_type: Option<CheckoutType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        let status = vehicle.status();
        let assignment = vehicle.assignment().cloned();
        let return_info = vehicle.return_info().cloned();

        Self {
            id: vehicle.id,
            name: vehicle.name,
            status,
            holder_name: assignment.as_ref().map(|a| a.holder_name.clone()),
            time: assignment.as_ref().map(|a| a.time.to_rfc3339()),
            checkout_type: assignment.map(|a| a.checkout_type),
            return_time: return_info.as_ref().map(|r| r.return_time.to_rfc3339()),
            condition: return_info.map(|r| r.condition),
        }
    }
}

// Response del refresco del catálogo
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub count: usize,
    pub policy: String,
}
