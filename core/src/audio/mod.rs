//! Sound playback seam
//!
//! The core never touches an audio device. It asks a `SoundBackend` to start
//! sounds and keeps the returned `SoundHandle` around for sounds it needs to
//! pause or speed up later.

mod backend;
mod error;

pub use backend::{SoundBackend, SoundHandle, SoundRequest};
pub use error::SoundError;
