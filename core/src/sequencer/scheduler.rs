use std::sync::Arc;
use std::time::Duration;

use fartbox_types::SequencerConfig;
use tracing::{debug, info, warn};

use crate::audio::{SoundBackend, SoundRequest};
use crate::letters;
use crate::world::{ChatSink, PlayerId};

/// One resolved letter of a sequence
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub letter: char,
    pub sound_id: String,
    /// Pacing before the next letter may start (already floored)
    pub duration: Duration,
    pub volume: f32,
}

/// How a `speak` call ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// Nothing was typed after the command
    Usage,
    /// Input had characters, none of them letters
    NoValidLetters,
    /// Every letter was stepped through; `played` lists them in order
    Completed { played: String },
}

/// Result of a single letter. Both variants count as a finished step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Played,
    Failed,
}

/// Concatenate the argument tokens, uppercase, keep only `A`-`Z`
pub fn normalize<S: AsRef<str>>(args: &[S]) -> String {
    args.iter()
        .map(AsRef::as_ref)
        .collect::<String>()
        .to_uppercase()
        .chars()
        .filter(char::is_ascii_uppercase)
        .collect()
}

/// Plays letter sounds one after another for a player.
///
/// Each `speak` call is independent: two calls for the same player run
/// side by side rather than replacing each other.
pub struct Scheduler {
    backend: Arc<dyn SoundBackend>,
    chat: Arc<dyn ChatSink>,
    config: Arc<SequencerConfig>,
}

impl Scheduler {
    pub fn new(
        backend: Arc<dyn SoundBackend>,
        chat: Arc<dyn ChatSink>,
        config: Arc<SequencerConfig>,
    ) -> Self {
        Self {
            backend,
            chat,
            config,
        }
    }

    /// Resolve already-normalized letters into playback requests
    pub fn plan(&self, normalized: &str, volume: f32) -> Vec<PlaybackRequest> {
        normalized
            .chars()
            .map(|letter| PlaybackRequest {
                letter,
                sound_id: self.config.letter_sound_id(letter),
                duration: letters::duration(letter),
                volume,
            })
            .collect()
    }

    /// Speak `args` as letter sounds at `volume`.
    ///
    /// `command` is the chat command name used in the usage hint.
    pub async fn speak<S: AsRef<str>>(
        &self,
        player: &PlayerId,
        command: &str,
        args: &[S],
        volume: f32,
    ) -> SpeakOutcome {
        let colors = self.config.colors;

        if args.iter().all(|a| a.as_ref().trim().is_empty()) {
            self.chat.send_message(
                player,
                &format!("Usage: /{command} <letters>"),
                Some(colors.hint),
            );
            return SpeakOutcome::Usage;
        }

        let letters = normalize(args);
        if letters.is_empty() {
            self.chat.send_message(
                player,
                "No valid letters to fart! Use A-Z.",
                Some(colors.hint),
            );
            return SpeakOutcome::NoValidLetters;
        }

        let plan = self.plan(&letters, volume);
        debug!(player = %player, letters = %letters, volume, "Starting letter sequence");

        for request in &plan {
            let step = self.play_step(player, request);
            debug!(player = %player, letter = %request.letter, ?step, "Letter step");
            tokio::time::sleep(request.duration).await;
        }

        info!(player = %player, letters = %letters, "Letter sequence complete");
        self.chat.send_message(
            player,
            &format!("Farted: {letters}"),
            Some(colors.success),
        );
        SpeakOutcome::Completed { played: letters }
    }

    /// Start one letter. Failures are logged and still count as done.
    fn play_step(&self, player: &PlayerId, request: &PlaybackRequest) -> StepOutcome {
        let sound = SoundRequest::one_shot(request.sound_id.clone(), request.volume);
        match self.backend.start_sound(&sound) {
            Ok(_handle) => StepOutcome::Played,
            Err(e) => {
                warn!(
                    player = %player,
                    sound = %request.sound_id,
                    error = %e,
                    "Failed to start letter sound"
                );
                StepOutcome::Failed
            }
        }
    }
}
