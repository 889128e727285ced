use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub stops_in_database: usize,
    pub demo_locations: usize,
    pub model_loaded: bool,
}
