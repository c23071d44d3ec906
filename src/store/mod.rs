//! Estado en memoria de la aplicación
//!
//! El listado de vehículos, sus transiciones y la paginación del listado.

pub mod pagination;
pub mod vehicle_store;

pub use pagination::{paginate, Page, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use vehicle_store::{CheckinDetails, CheckoutDetails, RefreshPolicy, StoreError, VehicleStore};
