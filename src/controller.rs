use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::error;
use validator::Validate;

use crate::location::provider::{GeolocationError, LocationProvider, PositionOptions};
use crate::services::prediction_client::prediction_service::PredictionService;
use crate::speech::sequencer::AnnouncementSequencer;
use crate::types::prediction_response::PredictionResponse;
use crate::ui::surface::{Control, NearestStopView, ResultView, UiSurface};

// Lets the result panel paint before speech begins.
pub const PLAYBACK_DELAY: Duration = Duration::from_millis(1000);

const SERVER_ERROR_MESSAGE: &str =
    "Error predicting next stop. Please make sure the prediction API server is running.";
const SELECT_DEMO_MESSAGE: &str = "Please select a demo location.";
const PERMISSION_DENIED_MESSAGE: &str =
    "Location access denied. Please allow location access or use demo locations.";
const UNAVAILABLE_MESSAGE: &str =
    "Location unavailable. Please check your connection and try again.";
const TIMEOUT_MESSAGE: &str = "Location request timed out. Please try again.";
const GENERIC_LOCATION_MESSAGE: &str =
    "Error getting location or predicting stop. Please try again.";

#[derive(Validate)]
struct DemoPredictionInput {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    location: String,
}

pub struct PredictionController {
    prediction_service: PredictionService,
    location_provider: Arc<dyn LocationProvider>,
    sequencer: AnnouncementSequencer,
    surface: Arc<dyn UiSurface>,
    current_prediction: Mutex<Option<PredictionResponse>>,
}

impl PredictionController {
    pub fn new(
        prediction_service: PredictionService,
        location_provider: Arc<dyn LocationProvider>,
        sequencer: AnnouncementSequencer,
        surface: Arc<dyn UiSurface>,
    ) -> Self {
        Self {
            prediction_service,
            location_provider,
            sequencer,
            surface,
            current_prediction: Mutex::new(None),
        }
    }

    pub async fn predict_from_demo(&self, location: &str) {
        self.begin(Control::DemoPredict, false);

        if let Err(message) = self.run_demo_flow(location).await {
            self.fail(&message);
        }

        self.surface.set_control_enabled(Control::DemoPredict, true);
    }

    pub async fn predict_from_current_location(&self) {
        self.begin(Control::UseCurrentLocation, true);
        self.surface
            .set_control_label(Control::UseCurrentLocation, "Getting Location...");

        if let Err(message) = self.run_location_flow().await {
            self.fail(&message);
        }

        self.surface
            .set_control_enabled(Control::UseCurrentLocation, true);
        self.surface
            .set_control_label(Control::UseCurrentLocation, "Use My Current Location");
    }

    // Replays the stored prediction's announcements; nothing happens until
    // a prediction has succeeded at least once.
    pub async fn play_current_audio(&self) {
        let current = self.current_prediction.lock().await.clone();
        let response = match current {
            Some(response) => response,
            None => return,
        };

        self.sequencer
            .play_announcements(
                &response.audio.english,
                &response.prediction.stop_name_english,
            )
            .await;
    }

    // Backgrounded app: stop speech right away rather than keep talking.
    pub async fn handle_visibility_change(&self, hidden: bool) {
        if hidden && self.sequencer.is_speaking().await {
            self.sequencer.cancel().await;
        }
    }

    async fn run_demo_flow(&self, location: &str) -> Result<(), String> {
        let input = DemoPredictionInput {
            location: location.to_string(),
        };
        if let Err(e) = input.validate() {
            error!("Rejected demo prediction input: {}", e);
            return Err(SELECT_DEMO_MESSAGE.to_string());
        }

        let response = self
            .prediction_service
            .predict_from_demo(location)
            .await
            .map_err(|e| {
                error!("Prediction error: {}", e);
                SERVER_ERROR_MESSAGE.to_string()
            })?;

        let status = response
            .demo_info
            .as_ref()
            .map(|demo| format!("Demo location: {}", demo.location_name));
        self.complete_with(response, status).await;
        Ok(())
    }

    async fn run_location_flow(&self) -> Result<(), String> {
        let position = self
            .location_provider
            .current_position(PositionOptions::default())
            .await
            .map_err(|e| {
                error!("Location error: {}", e);
                location_error_message(&e).to_string()
            })?;

        let coordinates = position.coordinates;
        let status = format!(
            "Location found: {:.4}, {:.4}",
            coordinates.latitude, coordinates.longitude
        );

        let response = self
            .prediction_service
            .predict_from_coordinates(&coordinates)
            .await
            .map_err(|e| {
                error!("Prediction error: {}", e);
                GENERIC_LOCATION_MESSAGE.to_string()
            })?;

        self.complete_with(response, Some(status)).await;
        Ok(())
    }

    fn begin(&self, control: Control, hide_location_status: bool) {
        self.surface.hide_error();
        self.surface.show_loading();
        self.surface.hide_result();
        self.surface.hide_nearest_stop();
        if hide_location_status {
            self.surface.hide_location_status();
        }
        self.surface.set_control_enabled(control, false);
    }

    fn fail(&self, message: &str) {
        self.surface.hide_loading();
        self.surface.hide_result();
        self.surface.hide_nearest_stop();
        self.surface.show_error(message);
    }

    async fn complete_with(&self, response: PredictionResponse, location_status: Option<String>) {
        self.surface
            .show_nearest_stop(&NearestStopView::from_response(&response));
        if let Some(status) = location_status {
            self.surface.show_location_status(&status);
        }

        let view = ResultView::from_response(&response);
        self.surface.hide_loading();
        self.surface.show_result(&view);

        *self.current_prediction.lock().await = Some(response.clone());

        if response.play_audio {
            let sequencer = self.sequencer.clone();
            let english = response.audio.english.clone();
            let stop_name = response.prediction.stop_name_english.clone();
            tokio::spawn(async move {
                tokio::time::sleep(PLAYBACK_DELAY).await;
                sequencer.play_announcements(&english, &stop_name).await;
            });
        }
    }
}

fn location_error_message(error: &GeolocationError) -> &'static str {
    match error {
        GeolocationError::PermissionDenied => PERMISSION_DENIED_MESSAGE,
        GeolocationError::PositionUnavailable => UNAVAILABLE_MESSAGE,
        GeolocationError::Timeout => TIMEOUT_MESSAGE,
        GeolocationError::Unsupported | GeolocationError::Other(_) => GENERIC_LOCATION_MESSAGE,
    }
}
