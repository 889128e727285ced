use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::types::coordinates::Coordinates;

#[derive(Debug, Clone, Copy)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Position {
    pub coordinates: Coordinates,
    pub fix_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
    Other(String),
}

impl std::fmt::Display for GeolocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GeolocationError::PermissionDenied => write!(f, "Location permission denied"),
            GeolocationError::PositionUnavailable => write!(f, "Position unavailable"),
            GeolocationError::Timeout => write!(f, "Location request timed out"),
            GeolocationError::Unsupported => write!(f, "Location is not supported on this host"),
            GeolocationError::Other(e) => write!(f, "Location error: {}", e),
        }
    }
}

// Single-shot position query. One suspension point per call, no retries.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(
        &self,
        options: PositionOptions,
    ) -> Result<Position, GeolocationError>;
}

// Stand-in for hosts with no location capability configured.
pub struct UnsupportedLocationProvider;

#[async_trait]
impl LocationProvider for UnsupportedLocationProvider {
    async fn current_position(
        &self,
        _options: PositionOptions,
    ) -> Result<Position, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_provider_fails_immediately() {
        let provider = UnsupportedLocationProvider;

        let error = provider
            .current_position(PositionOptions::default())
            .await
            .unwrap_err();

        assert_eq!(error, GeolocationError::Unsupported);
    }

    #[test]
    fn default_options_match_capability_contract() {
        let options = PositionOptions::default();

        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::from_secs(60));
    }
}
