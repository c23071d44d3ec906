//! DTOs de la API
//!
//! Requests y responses que cruzan la frontera HTTP.

pub mod api_response;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
