use std::sync::Arc;

use fartbox_core::{SoundError, SoundboardService};
use fartbox_types::SequencerConfig;
use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::audio;
use crate::chat::StdoutChat;
use crate::world::ConsoleWorld;

#[derive(Default)]
pub struct BackgroundTasks {
    pub ticker: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub async fn abort_all(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the soundboard service.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<SequencerConfig>,
    pub service: Arc<SoundboardService>,
    pub world: Arc<ConsoleWorld>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    /// Open the audio backend and build the service. Must run inside a tokio runtime.
    pub fn new(config: SequencerConfig) -> Result<Self, SoundError> {
        let backend = audio::open_backend(&config)?;
        let world = Arc::new(ConsoleWorld::new());
        let service = SoundboardService::new(
            backend,
            Arc::new(StdoutChat::new(true)),
            world.clone(),
            config.clone(),
            Handle::current(),
        );
        Ok(Self {
            config: Arc::new(config),
            service: Arc::new(service),
            world,
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        })
    }
}
