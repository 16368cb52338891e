//! Sound backends for the console host
//!
//! `RodioBackend` plays files from the assets directory on the default output
//! device. `LogBackend` only logs, for machines without audio output.

mod log_backend;
mod rodio_backend;

use std::path::PathBuf;
use std::sync::Arc;

use fartbox_core::{SoundBackend, SoundError};
use fartbox_types::SequencerConfig;
use tracing::warn;

pub use log_backend::LogBackend;
pub use rodio_backend::RodioBackend;

/// Open the output device, falling back to logging if allowed
pub fn open_backend(config: &SequencerConfig) -> Result<Arc<dyn SoundBackend>, SoundError> {
    match RodioBackend::open(PathBuf::from(&config.assets_dir)) {
        Ok(backend) => Ok(Arc::new(backend)),
        Err(e) if config.allow_silent_fallback => {
            warn!(error = %e, "No audio output, sounds will only be logged");
            Ok(Arc::new(LogBackend))
        }
        Err(e) => Err(e),
    }
}
