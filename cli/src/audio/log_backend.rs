use fartbox_core::{SoundBackend, SoundError, SoundHandle, SoundRequest};
use tracing::{info, trace};

/// Backend that logs playback instead of producing audio
#[derive(Debug, Default, Clone, Copy)]
pub struct LogBackend;

struct LogHandle {
    id: String,
}

impl SoundHandle for LogHandle {
    fn pause(&self) {
        info!(sound = %self.id, "Sound paused");
    }

    fn set_playback_rate(&self, rate: f32) {
        trace!(sound = %self.id, rate, "Playback rate");
    }
}

impl SoundBackend for LogBackend {
    fn start_sound(&self, request: &SoundRequest) -> Result<Box<dyn SoundHandle>, SoundError> {
        info!(
            sound = %request.id,
            volume = request.volume,
            looping = request.looping,
            entity = ?request.attached_to,
            "Sound started"
        );
        Ok(Box::new(LogHandle {
            id: request.id.clone(),
        }))
    }
}
