//! Soundboard service
//!
//! Ties the scheduler and the loop registry to the host: chat lines come in
//! through `handle_chat`, simulation steps through `on_tick`, and players are
//! registered and torn down with `join` / `leave`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fartbox_types::SequencerConfig;
use hashbrown::HashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::audio::SoundBackend;
use crate::commands::{ChatCommand, CommandError, Voice};
use crate::looping::{LoopRegistry, LoopState};
use crate::sequencer::{Scheduler, SpeakOutcome};
use crate::world::{ChatSink, EntityDirectory, PlayerId, PlayerInput};

/// What a chat command ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    /// A letter sequence was spawned and runs in the background
    SequenceStarted,
    LoopToggled(LoopState),
    Help,
    /// The player is not registered or has no entity
    Ignored,
}

pub struct SoundboardService {
    config: Arc<SequencerConfig>,
    scheduler: Arc<Scheduler>,
    loops: LoopRegistry,
    chat: Arc<dyn ChatSink>,
    /// In-flight letter sequences per player
    sequences: Mutex<HashMap<PlayerId, Vec<JoinHandle<SpeakOutcome>>>>,
    runtime: Handle,
}

impl SoundboardService {
    pub fn new(
        backend: Arc<dyn SoundBackend>,
        chat: Arc<dyn ChatSink>,
        directory: Arc<dyn EntityDirectory>,
        config: SequencerConfig,
        runtime: Handle,
    ) -> Self {
        let config = Arc::new(config);
        let scheduler = Arc::new(Scheduler::new(
            Arc::clone(&backend),
            Arc::clone(&chat),
            Arc::clone(&config),
        ));
        let loops = LoopRegistry::new(
            backend,
            directory,
            Arc::new(config.looping.clone()),
            runtime.clone(),
        );
        Self {
            config,
            scheduler,
            loops,
            chat,
            sequences: Mutex::new(HashMap::new()),
            runtime,
        }
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn join(&self, player: &PlayerId) {
        self.loops.register(player);
        info!(player = %player, "Player joined");
    }

    /// Tear down the player's loop and abort their running sequences
    pub fn leave(&self, player: &PlayerId) {
        self.loops.remove(player);
        if let Some(handles) = self.sequences().remove(player) {
            for handle in handles {
                handle.abort();
            }
        }
        info!(player = %player, "Player left");
    }

    /// Forward one simulation step of input to the player's loop
    pub fn on_tick(&self, player: &PlayerId, input: PlayerInput) {
        self.loops.on_tick(player, input);
    }

    /// Route a chat line. Plain chat comes back as `NotSlashCommand`.
    pub fn handle_chat(&self, player: &PlayerId, line: &str) -> Result<Dispatched, CommandError> {
        let command = match ChatCommand::parse(line) {
            Ok(command) => command,
            Err(e @ CommandError::UnknownCommand(_)) => {
                self.chat
                    .send_message(player, &e.to_string(), Some(self.config.colors.error));
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        debug!(player = %player, ?command, "Chat command");

        match command {
            ChatCommand::Speak { voice, args } => Ok(self.speak(player, voice, args)),
            ChatCommand::Step => Ok(self.toggle_loop(player)),
            ChatCommand::Help => {
                for line in ChatCommand::help_lines() {
                    self.chat
                        .send_message(player, line, Some(self.config.colors.hint));
                }
                Ok(Dispatched::Help)
            }
        }
    }

    /// Spawn a letter sequence. Runs alongside any sequence already playing.
    ///
    /// Players that have not joined are ignored.
    pub fn speak(&self, player: &PlayerId, voice: Voice, args: Vec<String>) -> Dispatched {
        if self.loops.state(player).is_none() {
            debug!(player = %player, "Speak from unregistered player ignored");
            return Dispatched::Ignored;
        }

        let scheduler = Arc::clone(&self.scheduler);
        let volume = voice.volume(&self.config.volumes);
        let task_player = player.clone();
        let handle = self.runtime.spawn(async move {
            scheduler
                .speak(&task_player, voice.command_name(), &args, volume)
                .await
        });

        let mut sequences = self.sequences();
        let running = sequences.entry(player.clone()).or_default();
        running.retain(|h| !h.is_finished());
        running.push(handle);
        Dispatched::SequenceStarted
    }

    /// Toggle the player's loop and tell them about it
    pub fn toggle_loop(&self, player: &PlayerId) -> Dispatched {
        let before = self.loops.state(player);
        let Some(after) = self.loops.toggle(player) else {
            return Dispatched::Ignored;
        };
        if before == Some(LoopState::Off) && after == LoopState::Off {
            return Dispatched::Ignored;
        }

        let text = match after {
            LoopState::Off => "Fart steps off",
            _ => "Fart steps on! Sprint to speed up, jump to interrupt.",
        };
        self.chat
            .send_message(player, text, Some(self.config.colors.success));
        Dispatched::LoopToggled(after)
    }

    /// Loop state of every registered player
    pub fn status(&self) -> Vec<(PlayerId, LoopState)> {
        self.loops.states()
    }

    /// Letter sequences still running for a player
    pub fn active_sequences(&self, player: &PlayerId) -> usize {
        self.sequences()
            .get(player)
            .map_or(0, |handles| handles.iter().filter(|h| !h.is_finished()).count())
    }

    fn sequences(&self) -> MutexGuard<'_, HashMap<PlayerId, Vec<JoinHandle<SpeakOutcome>>>> {
        self.sequences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
