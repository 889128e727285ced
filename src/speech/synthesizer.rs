use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

#[derive(Debug, Clone)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub voice: Option<Voice>,
}

impl Utterance {
    // Slightly slowed down, neutral pitch, full volume.
    pub fn announcement(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lang: "en-US".to_string(),
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
            voice: None,
        }
    }
}

pub const PREFERRED_VOICE_HINTS: [&str; 3] = ["Female", "Google", "Microsoft"];

// Prefer a clear English voice; the engine default is fine otherwise.
pub fn pick_preferred_voice(voices: &[Voice]) -> Option<Voice> {
    voices
        .iter()
        .find(|voice| {
            voice.lang.contains("en")
                && PREFERRED_VOICE_HINTS
                    .iter()
                    .any(|hint| voice.name.contains(hint))
        })
        .cloned()
}

#[derive(Debug)]
pub enum SpeechError {
    Engine(String),
}

impl std::fmt::Display for SpeechError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SpeechError::Engine(e) => write!(f, "Speech engine error: {}", e),
        }
    }
}

// Queued, single-utterance-at-a-time speech capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn voices(&self) -> Vec<Voice>;
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;
    async fn cancel(&self);
    async fn is_speaking(&self) -> bool;
}

// Fallback when no speech engine is installed: announcements go to the log.
pub struct LogSynthesizer;

#[async_trait]
impl SpeechSynthesizer for LogSynthesizer {
    async fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        info!("Announcement: {}", utterance.text);
        Ok(())
    }

    async fn cancel(&self) {}

    async fn is_speaking(&self) -> bool {
        false
    }
}
