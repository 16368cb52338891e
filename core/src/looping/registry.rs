use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use fartbox_types::LoopSettings;
use hashbrown::HashMap;
use tokio::runtime::Handle;
use tracing::debug;

use super::{LoopContext, LoopController, LoopState, TickOutcome};
use crate::audio::SoundBackend;
use crate::deferred::DeferredTask;
use crate::world::{EntityDirectory, PlayerId, PlayerInput};

type Controllers = HashMap<PlayerId, LoopController>;

/// Loop controllers keyed by player.
///
/// Cheap to clone; clones share the same controllers.
#[derive(Clone)]
pub struct LoopRegistry {
    controllers: Arc<Mutex<Controllers>>,
    backend: Arc<dyn SoundBackend>,
    directory: Arc<dyn EntityDirectory>,
    settings: Arc<LoopSettings>,
    runtime: Handle,
}

impl LoopRegistry {
    pub fn new(
        backend: Arc<dyn SoundBackend>,
        directory: Arc<dyn EntityDirectory>,
        settings: Arc<LoopSettings>,
        runtime: Handle,
    ) -> Self {
        Self {
            controllers: Arc::new(Mutex::new(HashMap::new())),
            backend,
            directory,
            settings,
            runtime,
        }
    }

    pub fn register(&self, player: &PlayerId) {
        self.lock()
            .entry(player.clone())
            .or_insert_with(|| LoopController::new(player.clone()));
    }

    /// Drop the player's controller, releasing its sound and pending resume
    pub fn remove(&self, player: &PlayerId) {
        if let Some(mut controller) = self.lock().remove(player) {
            controller.shutdown();
            debug!(player = %player, "Loop controller removed");
        }
    }

    /// Toggle the player's loop. `None` if the player is not registered.
    pub fn toggle(&self, player: &PlayerId) -> Option<LoopState> {
        let entity = self.directory.entity_of(player);
        let mut controllers = self.lock();
        let controller = controllers.get_mut(player)?;
        let ctx = LoopContext {
            backend: self.backend.as_ref(),
            settings: &self.settings,
            entity,
        };
        Some(controller.toggle(&ctx))
    }

    /// Feed one tick of input. Unknown players are ignored.
    pub fn on_tick(&self, player: &PlayerId, input: PlayerInput) {
        let entity = self.directory.entity_of(player);
        let mut controllers = self.lock();
        let Some(controller) = controllers.get_mut(player) else {
            return;
        };
        let ctx = LoopContext {
            backend: self.backend.as_ref(),
            settings: &self.settings,
            entity,
        };
        if controller.on_tick(input, &ctx) == TickOutcome::InterruptStarted {
            let generation = controller.interrupt_generation();
            controller.arm_resume(self.schedule_resume(player, generation));
        }
    }

    pub fn state(&self, player: &PlayerId) -> Option<LoopState> {
        self.lock().get(player).map(LoopController::state)
    }

    /// Every registered player and their loop state, sorted by player
    pub fn states(&self) -> Vec<(PlayerId, LoopState)> {
        let mut states: Vec<_> = self
            .lock()
            .iter()
            .map(|(player, c)| (player.clone(), c.state()))
            .collect();
        states.sort_by(|a, b| a.0.cmp(&b.0));
        states
    }

    fn schedule_resume(&self, player: &PlayerId, generation: u64) -> DeferredTask {
        let weak: Weak<Mutex<Controllers>> = Arc::downgrade(&self.controllers);
        let backend = Arc::clone(&self.backend);
        let directory = Arc::clone(&self.directory);
        let settings = Arc::clone(&self.settings);
        let player = player.clone();
        let delay = Duration::from_millis(self.settings.resume_delay_ms);

        DeferredTask::schedule(&self.runtime, delay, move || {
            let Some(controllers) = weak.upgrade() else {
                return;
            };
            let entity = directory.entity_of(&player);
            let mut controllers = controllers.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(controller) = controllers.get_mut(&player) {
                let ctx = LoopContext {
                    backend: backend.as_ref(),
                    settings: &settings,
                    entity,
                };
                controller.resume_if_current(generation, &ctx);
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, Controllers> {
        self.controllers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
