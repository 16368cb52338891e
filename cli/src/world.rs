//! Simulated players for the console host
//!
//! Tracks which players are spawned, their entity ids and the input flags the
//! tick loop hands to the soundboard each step.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use fartbox_core::{EntityDirectory, EntityId, PlayerId, PlayerInput};

#[derive(Debug)]
struct PlayerSlot {
    entity: EntityId,
    sprint: bool,
    /// Jump is asserted on the next tick only
    jump_queued: bool,
}

#[derive(Debug, Default)]
struct WorldState {
    next_entity: u64,
    players: BTreeMap<PlayerId, PlayerSlot>,
}

#[derive(Debug, Default)]
pub struct ConsoleWorld {
    state: Mutex<WorldState>,
}

impl ConsoleWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an entity for the player. `None` if already spawned.
    pub fn spawn(&self, player: &PlayerId) -> Option<EntityId> {
        let mut state = self.lock();
        if state.players.contains_key(player) {
            return None;
        }
        state.next_entity += 1;
        let entity = EntityId(state.next_entity);
        state.players.insert(
            player.clone(),
            PlayerSlot {
                entity,
                sprint: false,
                jump_queued: false,
            },
        );
        Some(entity)
    }

    pub fn despawn(&self, player: &PlayerId) -> bool {
        self.lock().players.remove(player).is_some()
    }

    /// Set the held state of the sprint key. False if the player is unknown.
    pub fn set_sprint(&self, player: &PlayerId, held: bool) -> bool {
        match self.lock().players.get_mut(player) {
            Some(slot) => {
                slot.sprint = held;
                true
            }
            None => false,
        }
    }

    /// Press jump for exactly one tick. False if the player is unknown.
    pub fn press_jump(&self, player: &PlayerId) -> bool {
        match self.lock().players.get_mut(player) {
            Some(slot) => {
                slot.jump_queued = true;
                true
            }
            None => false,
        }
    }

    /// Input for this tick for every spawned player; consumes queued jumps
    pub fn drain_inputs(&self) -> Vec<(PlayerId, PlayerInput)> {
        self.lock()
            .players
            .iter_mut()
            .map(|(player, slot)| {
                let input = PlayerInput {
                    sprint: slot.sprint,
                    jump: std::mem::take(&mut slot.jump_queued),
                };
                (player.clone(), input)
            })
            .collect()
    }

    pub fn players(&self) -> Vec<(PlayerId, EntityId)> {
        self.lock()
            .players
            .iter()
            .map(|(player, slot)| (player.clone(), slot.entity))
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, WorldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EntityDirectory for ConsoleWorld {
    fn entity_of(&self, player: &PlayerId) -> Option<EntityId> {
        self.lock().players.get(player).map(|slot| slot.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_assigns_unique_entities() {
        let world = ConsoleWorld::new();
        let a = world.spawn(&PlayerId::new("a")).unwrap();
        let b = world.spawn(&PlayerId::new("b")).unwrap();
        assert_ne!(a, b);
        assert_eq!(world.spawn(&PlayerId::new("a")), None);
    }

    #[test]
    fn test_jump_lasts_one_tick() {
        let world = ConsoleWorld::new();
        let alice = PlayerId::new("alice");
        world.spawn(&alice);

        assert!(world.press_jump(&alice));
        assert!(world.drain_inputs()[0].1.jump);
        assert!(!world.drain_inputs()[0].1.jump);
    }

    #[test]
    fn test_sprint_is_held_until_released() {
        let world = ConsoleWorld::new();
        let alice = PlayerId::new("alice");
        world.spawn(&alice);

        world.set_sprint(&alice, true);
        assert!(world.drain_inputs()[0].1.sprint);
        assert!(world.drain_inputs()[0].1.sprint);
        world.set_sprint(&alice, false);
        assert!(!world.drain_inputs()[0].1.sprint);
    }

    #[test]
    fn test_despawn_clears_entity() {
        let world = ConsoleWorld::new();
        let alice = PlayerId::new("alice");
        world.spawn(&alice);

        assert!(world.despawn(&alice));
        assert_eq!(world.entity_of(&alice), None);
        assert!(!world.press_jump(&alice));
    }
}
