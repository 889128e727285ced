use serde::Serialize;

use super::types::prediction_service_error::PredictionServiceError;
use crate::types::{
    coordinates::Coordinates, health_status::HealthStatus,
    prediction_response::PredictionResponse,
};

#[derive(Clone)]
pub struct PredictionServiceConfig {
    pub host: String,
}

#[derive(Clone)]
pub struct PredictionService {
    config: PredictionServiceConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct DemoPredictionBody<'a> {
    location: &'a str,
}

#[derive(Serialize)]
struct CoordinatesPredictionBody {
    latitude: f64,
    longitude: f64,
}

impl PredictionService {
    pub fn new(config: PredictionServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub async fn predict_from_demo(
        &self,
        location: &str,
    ) -> Result<PredictionResponse, PredictionServiceError> {
        let url = format!("{}/predict_from_demo", self.config.host);

        let resp = self
            .client
            .post(&url)
            .json(&DemoPredictionBody { location })
            .send()
            .await
            .map_err(|e| {
                PredictionServiceError::Internal(format!("Failed to send request: {}", e))
            })?;

        if !resp.status().is_success() {
            return Err(PredictionServiceError::Status(resp.status()));
        }

        resp.json::<PredictionResponse>().await.map_err(|e| {
            PredictionServiceError::Internal(format!("Failed to get response body: {}", e))
        })
    }

    // Coordinates go out at full precision; rounding is display-only.
    pub async fn predict_from_coordinates(
        &self,
        coordinates: &Coordinates,
    ) -> Result<PredictionResponse, PredictionServiceError> {
        let url = format!("{}/predict_from_coordinates", self.config.host);

        let resp = self
            .client
            .post(&url)
            .json(&CoordinatesPredictionBody {
                latitude: coordinates.latitude,
                longitude: coordinates.longitude,
            })
            .send()
            .await
            .map_err(|e| {
                PredictionServiceError::Internal(format!("Failed to send request: {}", e))
            })?;

        if !resp.status().is_success() {
            return Err(PredictionServiceError::Status(resp.status()));
        }

        resp.json::<PredictionResponse>().await.map_err(|e| {
            PredictionServiceError::Internal(format!("Failed to get response body: {}", e))
        })
    }

    pub async fn health(&self) -> Result<HealthStatus, PredictionServiceError> {
        let url = format!("{}/health", self.config.host);

        let resp = self.client.get(&url).send().await.map_err(|e| {
            PredictionServiceError::Internal(format!("Failed to send request: {}", e))
        })?;

        if !resp.status().is_success() {
            return Err(PredictionServiceError::Status(resp.status()));
        }

        resp.json::<HealthStatus>().await.map_err(|e| {
            PredictionServiceError::Internal(format!("Failed to get response body: {}", e))
        })
    }
}
