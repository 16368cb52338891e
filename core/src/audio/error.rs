//! Error types for sound playback

use thiserror::Error;

/// Errors while starting a sound
#[derive(Debug, Error)]
pub enum SoundError {
    #[error("sound not found: {id}")]
    NotFound { id: String },

    #[error("failed to decode sound {id}: {reason}")]
    Decode { id: String, reason: String },

    #[error("audio device unavailable: {0}")]
    Device(String),

    #[error("audio output has been shut down")]
    Released,
}
