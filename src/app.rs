use std::sync::Arc;

use tracing::warn;

use crate::controller::PredictionController;
use crate::location::ip_lookup::{IpLookupConfig, IpLookupProvider};
use crate::location::provider::{LocationProvider, UnsupportedLocationProvider};
use crate::services::prediction_client::prediction_service::{
    PredictionService, PredictionServiceConfig,
};
use crate::speech::espeak::{EspeakConfig, EspeakSynthesizer};
use crate::speech::sequencer::AnnouncementSequencer;
use crate::speech::synthesizer::{LogSynthesizer, SpeechSynthesizer};
use crate::ui::console::ConsoleSurface;

pub struct AppConfig {
    pub predictor_host: String,
    pub location_host: Option<String>,
    pub espeak_bin: String,
}

pub async fn gen_controller(config: AppConfig) -> PredictionController {
    let prediction_service = PredictionService::new(PredictionServiceConfig {
        host: config.predictor_host,
    });

    let location_provider: Arc<dyn LocationProvider> = match config.location_host {
        Some(host) => Arc::new(IpLookupProvider::new(IpLookupConfig { host })),
        None => Arc::new(UnsupportedLocationProvider),
    };

    let synthesizer: Arc<dyn SpeechSynthesizer> =
        if EspeakSynthesizer::probe(&config.espeak_bin).await {
            Arc::new(EspeakSynthesizer::new(EspeakConfig {
                bin: config.espeak_bin,
            }))
        } else {
            warn!("No speech engine found, announcements will only be logged");
            Arc::new(LogSynthesizer)
        };

    PredictionController::new(
        prediction_service,
        location_provider,
        AnnouncementSequencer::new(synthesizer),
        Arc::new(ConsoleSurface),
    )
}
