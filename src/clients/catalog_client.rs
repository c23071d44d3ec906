//! Cliente HTTP para el catálogo vPIC de NHTSA
//!
//! Una sola lectura: todas las marcas del tipo de vehículo "car".
//! El store solo consume `MakeId` y `MakeName` de cada resultado.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errores de red o de parseo al consultar el catálogo
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog responded with HTTP {0}")]
    Status(u16),

    #[error("Catalog response could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Marca tal como la devuelve el catálogo
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogMake {
    #[serde(rename = "MakeId")]
    pub id: i64,
    #[serde(rename = "MakeName")]
    pub name: String,
}

/// Sobre de respuesta de vPIC: `{Count, Message, SearchCriteria, Results}`
#[derive(Debug, Deserialize)]
struct CatalogEnvelope {
    #[serde(rename = "Count", default)]
    count: Option<u64>,
    #[serde(rename = "Results")]
    results: Vec<CatalogMake>,
}

/// Fuente de marcas para el store
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn list_car_makes(&self) -> Result<Vec<CatalogMake>, CatalogError>;
}

/// Cliente real contra la API pública de vPIC
pub struct NhtsaCatalogClient {
    client: Client,
    base_url: String,
}

impl NhtsaCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn makes_url(&self) -> String {
        format!("{}/GetMakesForVehicleType/car?format=json", self.base_url)
    }
}

/// Parsear el cuerpo JSON del catálogo
pub fn parse_makes(body: &str) -> Result<Vec<CatalogMake>, CatalogError> {
    let envelope: CatalogEnvelope = serde_json::from_str(body)?;
    if let Some(count) = envelope.count {
        if count as usize != envelope.results.len() {
            log::warn!(
                "⚠️ Catalog Count={} but {} results received",
                count,
                envelope.results.len()
            );
        }
    }
    Ok(envelope.results)
}

#[async_trait]
impl CatalogClient for NhtsaCatalogClient {
    async fn list_car_makes(&self) -> Result<Vec<CatalogMake>, CatalogError> {
        let url = self.makes_url();
        log::info!("🌐 Fetching car makes from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::error!("❌ Catalog responded with status {}", status);
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let makes = parse_makes(&body)?;
        log::info!("✅ Catalog returned {} makes", makes.len());
        Ok(makes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    const FIXTURE: &str = r#"{
        "Count": 2,
        "Message": "Response returned successfully",
        "SearchCriteria": "Vehicle Type: car",
        "Results": [
            {"MakeId": 440, "MakeName": "ASTON MARTIN", "VehicleTypeId": 2, "VehicleTypeName": "Passenger Car"},
            {"MakeId": 441, "MakeName": "TESLA", "VehicleTypeId": 2, "VehicleTypeName": "Passenger Car"}
        ]
    }"#;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_parse_makes_ignores_extra_fields() {
        let makes = parse_makes(FIXTURE).unwrap();
        assert_eq!(makes.len(), 2);
        assert_eq!(makes[0], CatalogMake { id: 440, name: "ASTON MARTIN".to_string() });
        assert_eq!(makes[1].name, "TESLA");
    }

    #[test]
    fn test_parse_makes_rejects_missing_results() {
        let result = parse_makes(r#"{"Count": 0, "Message": "oops"}"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_makes_url_strips_trailing_slash() {
        let client = NhtsaCatalogClient::new("http://example.test/api/vehicles/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.makes_url(),
            "http://example.test/api/vehicles/GetMakesForVehicleType/car?format=json"
        );
    }

    #[tokio::test]
    async fn test_list_car_makes_against_local_server() {
        let router = Router::new().route(
            "/GetMakesForVehicleType/car",
            get(|| async { FIXTURE }),
        );
        let base_url = serve(router).await;

        let client = NhtsaCatalogClient::new(base_url, Duration::from_secs(5)).unwrap();
        let makes = client.list_car_makes().await.unwrap();
        assert_eq!(makes.len(), 2);
        assert_eq!(makes[0].id, 440);
    }

    #[tokio::test]
    async fn test_list_car_makes_reports_http_status() {
        let router = Router::new().route(
            "/GetMakesForVehicleType/car",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base_url = serve(router).await;

        let client = NhtsaCatalogClient::new(base_url, Duration::from_secs(5)).unwrap();
        let result = client.list_car_makes().await;
        assert!(matches!(result, Err(CatalogError::Status(500))));
    }
}
