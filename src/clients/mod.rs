//! Clients - HTTP Clients for External APIs
//!
//! This module contains HTTP clients for communicating with external APIs.

pub mod catalog_client;

// Re-export main types for convenience
pub use catalog_client::{
    CatalogClient,
    CatalogError,
    CatalogMake,
    NhtsaCatalogClient,
};
