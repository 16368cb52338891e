pub mod audio;
pub mod commands;
pub mod deferred;
pub mod letters;
pub mod looping;
pub mod sequencer;
pub mod service;
pub mod world;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use audio::{SoundBackend, SoundError, SoundHandle, SoundRequest};
pub use commands::{ChatCommand, CommandError, Voice};
pub use deferred::DeferredTask;
pub use looping::{LoopController, LoopRegistry, LoopState};
pub use sequencer::{PlaybackRequest, Scheduler, SpeakOutcome, StepOutcome};
pub use service::{Dispatched, SoundboardService};
pub use world::{ChatSink, EntityDirectory, EntityId, PlayerId, PlayerInput};
