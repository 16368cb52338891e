use crate::world::EntityId;

use super::SoundError;

/// Everything needed to start one playback
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    /// Sound identifier, e.g. `audio/sfx/farts/fartA.mp3`
    pub id: String,
    pub volume: f32,
    /// Repeat until paused
    pub looping: bool,
    /// Entity the sound follows in the world, if any
    pub attached_to: Option<EntityId>,
    pub reference_distance: Option<f32>,
}

impl SoundRequest {
    pub fn one_shot(id: impl Into<String>, volume: f32) -> Self {
        Self {
            id: id.into(),
            volume,
            looping: false,
            attached_to: None,
            reference_distance: None,
        }
    }

    pub fn looping(id: impl Into<String>, volume: f32) -> Self {
        Self {
            looping: true,
            ..Self::one_shot(id, volume)
        }
    }

    /// Attach the sound to an entity with the given attenuation reference distance
    pub fn attached(mut self, entity: EntityId, reference_distance: f32) -> Self {
        self.attached_to = Some(entity);
        self.reference_distance = Some(reference_distance);
        self
    }
}

/// A sound that has been started.
///
/// Dropping a handle does not stop playback; call `pause` for that.
pub trait SoundHandle: Send {
    fn pause(&self);
    fn set_playback_rate(&self, rate: f32);
}

/// Starts sounds. Implemented by the host (rodio, a game engine, a test recorder).
pub trait SoundBackend: Send + Sync {
    fn start_sound(&self, request: &SoundRequest) -> Result<Box<dyn SoundHandle>, SoundError>;
}
