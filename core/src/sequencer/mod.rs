//! Sequential letter playback
//!
//! This module provides:
//! - **Normalization**: chat arguments to a run of `A`-`Z` letters
//! - **Planning**: one `PlaybackRequest` per letter (sound id, pacing, volume)
//! - **Scheduler**: plays the plan one letter at a time, holding each for its pacing

mod scheduler;


pub use scheduler::{PlaybackRequest, Scheduler, SpeakOutcome, StepOutcome, normalize};
