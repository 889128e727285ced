use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::provider::{GeolocationError, LocationProvider, Position, PositionOptions};
use crate::types::coordinates::Coordinates;

#[derive(Clone)]
pub struct IpLookupConfig {
    pub host: String,
}

// IP-based position fix (ip-api.com wire shape). The accuracy hint in
// PositionOptions cannot be honored by an IP fix and is ignored here.
pub struct IpLookupProvider {
    config: IpLookupConfig,
    client: reqwest::Client,
    last_fix: Mutex<Option<Position>>,
}

#[derive(Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

impl IpLookupProvider {
    pub fn new(config: IpLookupConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            last_fix: Mutex::new(None),
        }
    }

    async fn lookup(&self) -> Result<Position, GeolocationError> {
        let url = format!("{}/json", self.config.host);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| GeolocationError::PositionUnavailable)?;

        if resp.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(GeolocationError::PermissionDenied);
        }
        if !resp.status().is_success() {
            return Err(GeolocationError::PositionUnavailable);
        }

        let body = resp
            .json::<IpLookupResponse>()
            .await
            .map_err(|e| GeolocationError::Other(format!("Malformed lookup response: {}", e)))?;

        if body.status != "success" {
            return Err(GeolocationError::PositionUnavailable);
        }

        Ok(Position {
            coordinates: Coordinates {
                latitude: body.lat,
                longitude: body.lon,
            },
            fix_time: Utc::now(),
        })
    }
}

#[async_trait]
impl LocationProvider for IpLookupProvider {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Position, GeolocationError> {
        // A fix no older than maximum_age is served without a lookup.
        if let Ok(max_age) = chrono::Duration::from_std(options.maximum_age) {
            if let Some(last) = self.last_fix.lock().await.as_ref() {
                if Utc::now().signed_duration_since(last.fix_time) <= max_age {
                    return Ok(last.clone());
                }
            }
        }

        let position = tokio::time::timeout(options.timeout, self.lookup())
            .await
            .map_err(|_| GeolocationError::Timeout)??;

        *self.last_fix.lock().await = Some(position.clone());
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn resolves_coordinates_from_lookup() {
        let mut mock_server = mockito::Server::new_async().await;

        mock_server
            .mock("GET", "/json")
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "success", "lat": 28.6129, "lon": 77.2295}"#)
            .create_async()
            .await;

        let provider = IpLookupProvider::new(IpLookupConfig {
            host: mock_server.url(),
        });

        let position = provider
            .current_position(PositionOptions::default())
            .await
            .unwrap();

        assert_eq!(position.coordinates.latitude, 28.6129);
        assert_eq!(position.coordinates.longitude, 77.2295);
    }

    #[tokio::test]
    async fn forbidden_maps_to_permission_denied() {
        let mut mock_server = mockito::Server::new_async().await;

        mock_server
            .mock("GET", "/json")
            .with_status(403)
            .create_async()
            .await;

        let provider = IpLookupProvider::new(IpLookupConfig {
            host: mock_server.url(),
        });

        let error = provider
            .current_position(PositionOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error, GeolocationError::PermissionDenied);
    }

    #[tokio::test]
    async fn failed_lookup_maps_to_position_unavailable() {
        let mut mock_server = mockito::Server::new_async().await;

        mock_server
            .mock("GET", "/json")
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "fail", "message": "private range"}"#)
            .create_async()
            .await;

        let provider = IpLookupProvider::new(IpLookupConfig {
            host: mock_server.url(),
        });

        let error = provider
            .current_position(PositionOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error, GeolocationError::PositionUnavailable);
    }

    #[tokio::test]
    async fn recent_fix_is_served_from_cache() {
        let mut mock_server = mockito::Server::new_async().await;

        let mock = mock_server
            .mock("GET", "/json")
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "success", "lat": 28.6129, "lon": 77.2295}"#)
            .expect(1)
            .create_async()
            .await;

        let provider = IpLookupProvider::new(IpLookupConfig {
            host: mock_server.url(),
        });

        let first = provider
            .current_position(PositionOptions::default())
            .await
            .unwrap();
        let second = provider
            .current_position(PositionOptions::default())
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(first.coordinates, second.coordinates);
        assert_eq!(first.fix_time, second.fix_time);
    }

    #[tokio::test]
    async fn zero_maximum_age_forces_a_fresh_lookup() {
        let mut mock_server = mockito::Server::new_async().await;

        let mock = mock_server
            .mock("GET", "/json")
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "success", "lat": 28.6129, "lon": 77.2295}"#)
            .expect(2)
            .create_async()
            .await;

        let provider = IpLookupProvider::new(IpLookupConfig {
            host: mock_server.url(),
        });

        let options = PositionOptions {
            maximum_age: Duration::from_secs(0),
            ..PositionOptions::default()
        };

        provider.current_position(options).await.unwrap();
        // The first fix is at least a few microseconds old by now.
        tokio::time::sleep(Duration::from_millis(5)).await;
        provider.current_position(options).await.unwrap();

        mock.assert_async().await;
    }
}
