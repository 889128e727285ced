use serde::{Deserialize, Serialize};

use crate::types::coordinates::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestStop {
    pub stop_id: i64,
    pub english_name: String,
    pub hindi_name: String,
    pub distance_meters: f64,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentLocation {
    pub coordinates: Coordinates,
    pub nearest_stop: NearestStop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopPrediction {
    pub stop_id: i64,
    pub stop_name_english: String,
    pub stop_name_hindi: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementAudio {
    pub english: String,
    pub hindi: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoInfo {
    pub location_name: String,
    pub location_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub current_location: CurrentLocation,
    pub prediction: StopPrediction,
    pub audio: AnnouncementAudio,
    pub play_audio: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_info: Option<DemoInfo>,
}
