//! Cliente HTTP de la API de Motor Platform

use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub holder_name: Option<String>,
    pub time: Option<String>,
    pub checkout_type: Option<String>,
    pub return_time: Option<String>,
    pub condition: Option<String>,
}

impl Vehicle {
    pub fn is_available(&self) -> bool {
        self.status == "available"
    }
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub items: Vec<Vehicle>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub message: Option<String>,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct RefreshData {
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct About {
    pub name: String,
    pub description: String,
    pub values: Vec<String>,
}

pub struct MotorApi {
    client: Client,
    base_url: String,
}

impl MotorApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn list(&self, page: usize, per_page: usize) -> Result<Page> {
        let url = format!("{}/api/vehicles?page={}&per_page={}", self.base_url, page, per_page);
        read(self.client.get(&url).send().await?).await
    }

    pub async fn get(&self, id: i64) -> Result<Vehicle> {
        let url = format!("{}/api/vehicles/{}", self.base_url, id);
        read(self.client.get(&url).send().await?).await
    }

    pub async fn refresh(&self) -> Result<ApiResponse<RefreshData>> {
        let url = format!("{}/api/vehicles/refresh", self.base_url);
        read(self.client.post(&url).send().await?).await
    }

    pub async fn checkout(
        &self,
        id: i64,
        holder_name: &str,
        time: &str,
        checkout_type: &str,
    ) -> Result<ApiResponse<Vehicle>> {
        let url = format!("{}/api/vehicles/{}/checkout", self.base_url, id);
        let payload = json!({
            "holder_name": holder_name,
            "time": time,
            "checkout_type": checkout_type,
        });
        read(self.client.post(&url).json(&payload).send().await?).await
    }

    pub async fn checkin(&self, id: i64, return_time: &str, condition: &str) -> Result<ApiResponse<Vehicle>> {
        let url = format!("{}/api/vehicles/{}/checkin", self.base_url, id);
        let payload = json!({
            "return_time": return_time,
            "condition": condition,
        });
        read(self.client.post(&url).json(&payload).send().await?).await
    }

    pub async fn about(&self) -> Result<About> {
        let url = format!("{}/api/about", self.base_url);
        read(self.client.get(&url).send().await?).await
    }
}

/// Decodificar la respuesta o convertir el JSON de error en un mensaje
async fn read<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }

    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);
    Err(anyhow!("HTTP {}: {}", status.as_u16(), message))
}
