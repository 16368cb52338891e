//! Player and entity identities, and the host services the core consumes

use std::fmt;
use std::sync::Arc;

use fartbox_types::Color;

/// Stable identity of a connected player
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(Arc<str>);

impl PlayerId {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// In-world presence of a player (the thing sounds get attached to)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Looks up the live entity of a player
pub trait EntityDirectory: Send + Sync {
    /// `None` once the player's entity has despawned
    fn entity_of(&self, player: &PlayerId) -> Option<EntityId>;
}

/// Delivers a line of chat text to one player
pub trait ChatSink: Send + Sync {
    fn send_message(&self, player: &PlayerId, text: &str, color: Option<Color>);
}

/// Per-tick input flags for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    /// Rate key (sprint), read as a held level
    pub sprint: bool,
    /// Interrupt key (jump), read for its rising edge
    pub jump: bool,
}
