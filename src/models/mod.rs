//! Modelos de datos
//!
//! Este módulo contiene los modelos del dominio de la aplicación.

pub mod vehicle;

pub use vehicle::*;
