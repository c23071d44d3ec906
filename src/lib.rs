//! Motor Platform
//!
//! Servicio de préstamo de vehículos: listado de marcas del catálogo vPIC
//! con salida (checkout) y devolución (check-in) en memoria.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use routes::create_router;
pub use state::AppState;
