use fartbox_types::LoopSettings;
use tracing::{debug, warn};

use crate::audio::{SoundBackend, SoundHandle, SoundRequest};
use crate::deferred::DeferredTask;
use crate::world::{EntityId, PlayerId, PlayerInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Off,
    Looping,
    Interrupted,
}

impl LoopState {
    pub fn label(&self) -> &'static str {
        match self {
            LoopState::Off => "off",
            LoopState::Looping => "looping",
            LoopState::Interrupted => "interrupted",
        }
    }
}

/// What a tick asks of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    /// An interrupt began; the caller must schedule `resume` after the delay
    InterruptStarted,
}

/// Host services a controller needs for one call
pub struct LoopContext<'a> {
    pub backend: &'a dyn SoundBackend,
    pub settings: &'a LoopSettings,
    /// The player's live entity, `None` if it has despawned
    pub entity: Option<EntityId>,
}

/// Loop state machine for a single player
pub struct LoopController {
    player: PlayerId,
    state: LoopState,
    sound: Option<Box<dyn SoundHandle>>,
    /// Jump key value on the previous tick
    last_jump: bool,
    interrupt_pending: bool,
    /// Bumped on every interrupt and shutdown; a resume timer only counts
    /// for the generation it was scheduled in
    interrupt_generation: u64,
    resume_task: Option<DeferredTask>,
}

impl LoopController {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            state: LoopState::Off,
            sound: None,
            last_jump: false,
            interrupt_pending: false,
            interrupt_generation: 0,
            resume_task: None,
        }
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_interrupt_pending(&self) -> bool {
        self.interrupt_pending
    }

    pub fn interrupt_generation(&self) -> u64 {
        self.interrupt_generation
    }

    pub fn has_sound(&self) -> bool {
        self.sound.is_some()
    }

    /// Switch the loop on from `Off`, or off from any other state
    pub fn toggle(&mut self, ctx: &LoopContext<'_>) -> LoopState {
        match self.state {
            LoopState::Off => {
                let Some(entity) = ctx.entity else {
                    warn!(player = %self.player, "No entity to attach loop to, ignoring toggle");
                    return self.state;
                };
                self.release_sound();
                if self.start_loop(ctx, entity) {
                    self.state = LoopState::Looping;
                }
            }
            LoopState::Looping | LoopState::Interrupted => self.shutdown(),
        }
        debug!(player = %self.player, state = self.state.label(), "Loop toggled");
        self.state
    }

    /// Per-simulation-step update. Never blocks.
    pub fn on_tick(&mut self, input: PlayerInput, ctx: &LoopContext<'_>) -> TickOutcome {
        if let Some(sound) = &self.sound {
            let rate = if input.sprint {
                ctx.settings.fast_rate
            } else {
                ctx.settings.normal_rate
            };
            sound.set_playback_rate(rate);
        }

        let rising = input.jump && !self.last_jump;
        self.last_jump = input.jump;

        if rising && self.state == LoopState::Looping && !self.interrupt_pending {
            self.begin_interrupt(ctx);
            return TickOutcome::InterruptStarted;
        }
        TickOutcome::Idle
    }

    /// Hand over the timer that will call `resume`
    pub fn arm_resume(&mut self, task: DeferredTask) {
        if let Some(previous) = self.resume_task.replace(task) {
            previous.cancel();
        }
    }

    /// `resume`, but only if no interrupt or shutdown happened since
    /// `generation` was read
    pub fn resume_if_current(&mut self, generation: u64, ctx: &LoopContext<'_>) -> LoopState {
        if generation != self.interrupt_generation {
            debug!(player = %self.player, generation, "Stale resume ignored");
            return self.state;
        }
        self.resume(ctx)
    }

    /// Bring the loop back after an interrupt with a fresh sound
    pub fn resume(&mut self, ctx: &LoopContext<'_>) -> LoopState {
        if let Some(task) = self.resume_task.take() {
            task.disarm();
        }
        if self.state != LoopState::Interrupted {
            self.interrupt_pending = false;
            return self.state;
        }
        self.interrupt_pending = false;

        let Some(entity) = ctx.entity else {
            debug!(player = %self.player, "Entity gone before resume, loop stays off");
            self.state = LoopState::Off;
            return self.state;
        };

        self.state = if self.start_loop(ctx, entity) {
            LoopState::Looping
        } else {
            LoopState::Off
        };
        debug!(player = %self.player, state = self.state.label(), "Loop resumed");
        self.state
    }

    /// Release everything and go to `Off`
    pub fn shutdown(&mut self) {
        self.release_sound();
        if let Some(task) = self.resume_task.take() {
            task.cancel();
        }
        self.interrupt_pending = false;
        self.interrupt_generation += 1;
        self.state = LoopState::Off;
    }

    fn begin_interrupt(&mut self, ctx: &LoopContext<'_>) {
        self.release_sound();
        self.state = LoopState::Interrupted;
        self.interrupt_pending = true;
        self.interrupt_generation += 1;

        let request = SoundRequest::one_shot(
            ctx.settings.interrupt_sound.clone(),
            ctx.settings.volume,
        );
        if let Err(e) = ctx.backend.start_sound(&request) {
            warn!(
                player = %self.player,
                sound = %request.id,
                error = %e,
                "Failed to start interrupt sound"
            );
        }
        debug!(player = %self.player, "Loop interrupted");
    }

    fn start_loop(&mut self, ctx: &LoopContext<'_>, entity: EntityId) -> bool {
        let request = SoundRequest::looping(ctx.settings.loop_sound.clone(), ctx.settings.volume)
            .attached(entity, ctx.settings.reference_distance);
        match ctx.backend.start_sound(&request) {
            Ok(handle) => {
                self.sound = Some(handle);
                true
            }
            Err(e) => {
                warn!(
                    player = %self.player,
                    sound = %request.id,
                    error = %e,
                    "Failed to start loop sound"
                );
                false
            }
        }
    }

    fn release_sound(&mut self) {
        if let Some(sound) = self.sound.take() {
            sound.pause();
        }
    }
}

impl Drop for LoopController {
    fn drop(&mut self) {
        self.release_sound();
    }
}
