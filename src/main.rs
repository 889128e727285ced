mod app;
mod controller;
mod location;
mod services;
mod speech;
mod types;
mod ui;

use std::env;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use app::AppConfig;
use services::prediction_client::prediction_service::{PredictionService, PredictionServiceConfig};

const DEMO_LOCATIONS: [(&str, &str); 5] = [
    ("kashmere_gate", "Kashmere Gate"),
    ("connaught_place", "Connaught Place"),
    ("india_gate", "India Gate"),
    ("red_fort", "Red Fort"),
    ("aiims", "AIIMS"),
];

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    info!("Starting bus stop prediction client...");

    let predictor_host =
        env::var("PREDICTOR_HOST").unwrap_or_else(|_| "http://localhost:5000".to_string());
    let location_host = match env::var("GEOLOCATION_HOST") {
        Ok(host) if host.is_empty() => None,
        Ok(host) => Some(host),
        Err(_) => Some("http://ip-api.com".to_string()),
    };
    let espeak_bin = env::var("ESPEAK_BIN").unwrap_or_else(|_| "espeak-ng".to_string());

    let probe = PredictionService::new(PredictionServiceConfig {
        host: predictor_host.clone(),
    });
    match probe.health().await {
        Ok(health) => info!(
            "Prediction API is up: {} stops in database, model loaded: {}",
            health.stops_in_database, health.model_loaded
        ),
        Err(e) => warn!(
            "Prediction API health check failed ({}), is the server running on {}?",
            e, predictor_host
        ),
    }

    let controller = app::gen_controller(AppConfig {
        predictor_host,
        location_host,
        espeak_bin,
    })
    .await;

    println!("Commands:");
    println!("  demo <location>    predict from a demo location:");
    for (key, label) in DEMO_LOCATIONS {
        println!("      {:<16}{}", key, label);
    }
    println!("  here               predict from the current location");
    println!("  replay             replay the last announcements");
    println!("  hide / show        simulate the app going to the background");
    println!("  quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "demo" => controller.predict_from_demo(argument).await,
            "here" => controller.predict_from_current_location().await,
            "replay" => controller.play_current_audio().await,
            "hide" => controller.handle_visibility_change(true).await,
            "show" => controller.handle_visibility_change(false).await,
            "quit" | "exit" => break,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }
}
