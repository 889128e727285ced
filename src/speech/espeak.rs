use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::debug;

use super::synthesizer::{SpeechError, SpeechSynthesizer, Utterance, Voice};

const DEFAULT_WORDS_PER_MINUTE: f32 = 175.0;

#[derive(Clone)]
pub struct EspeakConfig {
    pub bin: String,
}

impl Default for EspeakConfig {
    fn default() -> Self {
        Self {
            bin: "espeak-ng".to_string(),
        }
    }
}

// Local speech engine driven over the espeak-ng CLI. One utterance at a
// time; a new speak call does not interrupt the previous process, that is
// the sequencer's job via cancel().
pub struct EspeakSynthesizer {
    config: EspeakConfig,
    active: Mutex<Option<Child>>,
}

impl EspeakSynthesizer {
    pub fn new(config: EspeakConfig) -> Self {
        Self {
            config,
            active: Mutex::new(None),
        }
    }

    pub async fn probe(bin: &str) -> bool {
        Command::new(bin)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl SpeechSynthesizer for EspeakSynthesizer {
    async fn voices(&self) -> Vec<Voice> {
        let output = match Command::new(&self.config.bin)
            .arg("--voices=en")
            .output()
            .await
        {
            Ok(output) if output.status.success() => output,
            _ => return Vec::new(),
        };

        parse_voice_listing(&String::from_utf8_lossy(&output.stdout))
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let speed = (DEFAULT_WORDS_PER_MINUTE * utterance.rate) as i32;
        let pitch = (50.0 * utterance.pitch).clamp(0.0, 99.0) as i32;
        let amplitude = (100.0 * utterance.volume).clamp(0.0, 200.0) as i32;
        let voice = match utterance.voice {
            Some(ref voice) => voice.lang.clone(),
            None => utterance.lang.to_lowercase(),
        };

        let child = Command::new(&self.config.bin)
            .arg("-s")
            .arg(speed.to_string())
            .arg("-p")
            .arg(pitch.to_string())
            .arg("-a")
            .arg(amplitude.to_string())
            .arg("-v")
            .arg(voice)
            .arg(&utterance.text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                SpeechError::Engine(format!("Failed to start {}: {}", self.config.bin, e))
            })?;

        debug!("Audio announcement started: {}", utterance.text);
        *self.active.lock().await = Some(child);
        Ok(())
    }

    async fn cancel(&self) {
        if let Some(mut child) = self.active.lock().await.take() {
            if let Err(e) = child.start_kill() {
                debug!("Failed to stop speech process: {}", e);
            }
        }
    }

    async fn is_speaking(&self) -> bool {
        let mut active = self.active.lock().await;
        match active.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(_)) => {
                    debug!("Audio announcement completed");
                    *active = None;
                    false
                }
                Err(_) => {
                    *active = None;
                    false
                }
            },
            None => false,
        }
    }
}

fn parse_voice_listing(listing: &str) -> Vec<Voice> {
    // Columns: Pty Language Age/Gender VoiceName File Other Languages
    listing
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 4 {
                return None;
            }
            Some(Voice {
                lang: fields[1].to_string(),
                name: fields[3].to_string(),
            })
        })
        .collect()
}
