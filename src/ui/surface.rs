use crate::types::prediction_response::PredictionResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    DemoPredict,
    UseCurrentLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearestStopView {
    pub name: String,
    pub distance_text: String,
}

impl NearestStopView {
    pub fn from_response(response: &PredictionResponse) -> Self {
        let nearest = &response.current_location.nearest_stop;
        Self {
            name: nearest.english_name.clone(),
            distance_text: format!("Distance: {:.0} meters away", nearest.distance_meters),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub stop_name_english: String,
    pub stop_name_hindi: String,
    pub confidence_text: String,
}

impl ResultView {
    pub fn from_response(response: &PredictionResponse) -> Self {
        Self {
            stop_name_english: response.prediction.stop_name_english.clone(),
            stop_name_hindi: response.prediction.stop_name_hindi.clone(),
            confidence_text: format!(
                "Confidence: {:.1}%",
                response.prediction.confidence * 100.0
            ),
        }
    }
}

// The set of named panels and triggering controls the controller drives.
pub trait UiSurface: Send + Sync {
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_result(&self, view: &ResultView);
    fn hide_result(&self);
    fn show_nearest_stop(&self, view: &NearestStopView);
    fn hide_nearest_stop(&self);
    fn show_location_status(&self, text: &str);
    fn hide_location_status(&self);
    fn show_error(&self, message: &str);
    fn hide_error(&self);
    fn set_control_enabled(&self, control: Control, enabled: bool);
    fn set_control_label(&self, control: Control, label: &str);
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::coordinates::Coordinates;
    use crate::types::prediction_response::{
        AnnouncementAudio, CurrentLocation, NearestStop, StopPrediction,
    };

    fn response(confidence: f64, distance_meters: f64) -> PredictionResponse {
        PredictionResponse {
            current_location: CurrentLocation {
                coordinates: Coordinates {
                    latitude: 28.6328,
                    longitude: 77.2199,
                },
                nearest_stop: NearestStop {
                    stop_id: 4,
                    english_name: "Connaught Place".to_string(),
                    hindi_name: "कनॉट प्लेस".to_string(),
                    distance_meters,
                    coordinates: Coordinates {
                        latitude: 28.6328,
                        longitude: 77.2199,
                    },
                },
            },
            prediction: StopPrediction {
                stop_id: 5,
                stop_name_english: "India Gate".to_string(),
                stop_name_hindi: "इंडिया गेट".to_string(),
                confidence,
            },
            audio: AnnouncementAudio {
                english: "Next stop is India Gate".to_string(),
                hindi: "Agalaaaa staation  haaaa इंडिया गेट".to_string(),
            },
            play_audio: false,
            demo_info: None,
        }
    }

    #[test]
    fn confidence_is_rounded_to_one_decimal() {
        let view = ResultView::from_response(&response(0.873, 120.4));

        assert_eq!(view.confidence_text, "Confidence: 87.3%");
    }

    #[test]
    fn confidence_of_one_reads_as_hundred_percent() {
        let view = ResultView::from_response(&response(1.0, 120.4));

        assert_eq!(view.confidence_text, "Confidence: 100.0%");
    }

    #[test]
    fn distance_is_rounded_to_whole_meters() {
        let view = NearestStopView::from_response(&response(0.873, 120.4));

        assert_eq!(view.name, "Connaught Place");
        assert_eq!(view.distance_text, "Distance: 120 meters away");
    }
}
