use super::surface::{Control, NearestStopView, ResultView, UiSurface};

// Line-oriented rendition of the panels: shown panels print, hidden
// panels have nothing to erase.
pub struct ConsoleSurface;

impl UiSurface for ConsoleSurface {
    fn show_loading(&self) {
        println!("Predicting next stop...");
    }

    fn hide_loading(&self) {}

    fn show_result(&self, view: &ResultView) {
        println!("Next stop: {}", view.stop_name_english);
        println!("           {}", view.stop_name_hindi);
        println!("{}", view.confidence_text);
    }

    fn hide_result(&self) {}

    fn show_nearest_stop(&self, view: &NearestStopView) {
        println!("Nearest stop: {}", view.name);
        println!("{}", view.distance_text);
    }

    fn hide_nearest_stop(&self) {}

    fn show_location_status(&self, text: &str) {
        println!("{}", text);
    }

    fn hide_location_status(&self) {}

    fn show_error(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn hide_error(&self) {}

    fn set_control_enabled(&self, _control: Control, _enabled: bool) {}

    fn set_control_label(&self, _control: Control, label: &str) {
        println!("[{}]", label);
    }
}
