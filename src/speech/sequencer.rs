use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::error;

use super::synthesizer::{pick_preferred_voice, SpeechSynthesizer, Utterance};

pub const ANNOUNCEMENT_GAP: Duration = Duration::from_millis(3000);

struct ActiveSequence {
    id: u64,
    token: CancellationToken,
}

// Two states: idle (no active sequence) and speaking. Starting a sequence
// while one is active cancels the old one and clears the engine queue
// before the new one speaks.
#[derive(Clone)]
pub struct AnnouncementSequencer {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    active: Arc<Mutex<Option<ActiveSequence>>>,
    sequence_counter: Arc<AtomicU64>,
}

impl AnnouncementSequencer {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            synthesizer,
            active: Arc::new(Mutex::new(None)),
            sequence_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    // Speaks the English announcement, then after a fixed gap a second
    // announcement naming the predicted stop. The second one substitutes
    // English words for the Hindi text; the engine mangles transliterated
    // Hindi. The gap is a fixed timer, not tied to the first utterance's
    // actual duration.
    pub async fn play_announcements(&self, english_text: &str, stop_name_english: &str) {
        let (id, token) = self.begin().await;

        let sequencer = self.clone();
        let first = english_text.to_string();
        let second = format!("Agla station hai {}", stop_name_english);
        tokio::spawn(async move {
            if token.is_cancelled() {
                return;
            }
            sequencer.speak_now(&first).await;

            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(ANNOUNCEMENT_GAP) => {}
            }

            if token.is_cancelled() {
                return;
            }
            sequencer.speak_now(&second).await;
            sequencer.finish(id).await;
        });
    }

    pub async fn cancel(&self) {
        if let Some(sequence) = self.active.lock().await.take() {
            sequence.token.cancel();
        }
        self.synthesizer.cancel().await;
    }

    pub async fn is_speaking(&self) -> bool {
        self.synthesizer.is_speaking().await
    }

    async fn begin(&self) -> (u64, CancellationToken) {
        let mut active = self.active.lock().await;
        if let Some(previous) = active.take() {
            previous.token.cancel();
            self.synthesizer.cancel().await;
        }

        let id = self.sequence_counter.fetch_add(1, Ordering::Relaxed);
        let token = CancellationToken::new();
        *active = Some(ActiveSequence {
            id,
            token: token.clone(),
        });
        (id, token)
    }

    async fn finish(&self, id: u64) {
        let mut active = self.active.lock().await;
        if matches!(active.as_ref(), Some(sequence) if sequence.id == id) {
            *active = None;
        }
    }

    async fn speak_now(&self, text: &str) {
        if self.synthesizer.is_speaking().await {
            self.synthesizer.cancel().await;
        }

        let voices = self.synthesizer.voices().await;
        let mut utterance = Utterance::announcement(text);
        utterance.voice = pick_preferred_voice(&voices);

        if let Err(e) = self.synthesizer.speak(utterance).await {
            error!("Speech synthesis error: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::synthesizer::testing::RecordingSynthesizer;

    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    fn sequencer() -> (AnnouncementSequencer, Arc<RecordingSynthesizer>) {
        let synthesizer = Arc::new(RecordingSynthesizer::default());
        (
            AnnouncementSequencer::new(synthesizer.clone()),
            synthesizer,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn second_announcement_follows_after_fixed_gap() {
        let (sequencer, synthesizer) = sequencer();

        sequencer
            .play_announcements("Next stop is India Gate", "India Gate")
            .await;
        settle().await;

        assert_eq!(synthesizer.spoken(), vec!["Next stop is India Gate"]);

        tokio::time::advance(ANNOUNCEMENT_GAP).await;
        settle().await;

        assert_eq!(
            synthesizer.spoken(),
            vec!["Next stop is India Gate", "Agla station hai India Gate"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn new_sequence_cancels_the_previous_one() {
        let (sequencer, synthesizer) = sequencer();

        sequencer
            .play_announcements("Next stop is India Gate", "India Gate")
            .await;
        settle().await;

        sequencer
            .play_announcements("Next stop is Red Fort", "Red Fort")
            .await;
        settle().await;

        tokio::time::advance(ANNOUNCEMENT_GAP).await;
        settle().await;

        let spoken = synthesizer.spoken();
        assert!(!spoken.contains(&"Agla station hai India Gate".to_string()));
        assert_eq!(*spoken.last().unwrap(), "Agla station hai Red Fort");
        // The first utterance was still active when the second sequence started.
        assert!(synthesizer.cancels() >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_a_sequence_mid_gap() {
        let (sequencer, synthesizer) = sequencer();

        sequencer
            .play_announcements("Next stop is India Gate", "India Gate")
            .await;
        settle().await;

        sequencer.cancel().await;

        tokio::time::advance(ANNOUNCEMENT_GAP).await;
        settle().await;

        assert_eq!(synthesizer.spoken(), vec!["Next stop is India Gate"]);
        assert!(!synthesizer.is_speaking().await);
    }

    #[tokio::test]
    async fn is_speaking_reflects_the_engine() {
        let (sequencer, synthesizer) = sequencer();

        assert!(!sequencer.is_speaking().await);
        synthesizer.set_speaking(true);
        assert!(sequencer.is_speaking().await);
    }
}
