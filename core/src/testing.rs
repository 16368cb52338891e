//! Test doubles for the host services

use std::sync::{Arc, Mutex};

use hashbrown::{HashMap, HashSet};
use tokio::time::Instant;

use fartbox_types::Color;

use crate::audio::{SoundBackend, SoundError, SoundHandle, SoundRequest};
use crate::world::{ChatSink, EntityDirectory, EntityId, PlayerId};

#[derive(Debug, Clone, PartialEq)]
pub enum SoundEvent {
    Started {
        handle: usize,
        request: SoundRequest,
        at: Instant,
    },
    Paused {
        handle: usize,
    },
    Rate {
        handle: usize,
        rate: f32,
    },
}

#[derive(Default)]
struct Recording {
    events: Vec<SoundEvent>,
    next_handle: usize,
}

/// Backend that records every call instead of playing anything
#[derive(Default, Clone)]
pub struct RecordingBackend {
    recording: Arc<Mutex<Recording>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every start of `id` fail
    pub fn fail_on(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn events(&self) -> Vec<SoundEvent> {
        self.recording.lock().unwrap().events.clone()
    }

    pub fn started(&self) -> Vec<SoundRequest> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SoundEvent::Started { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn started_ids(&self) -> Vec<String> {
        self.started().into_iter().map(|r| r.id).collect()
    }

    pub fn start_times(&self) -> Vec<Instant> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                SoundEvent::Started { at, .. } => Some(at),
                _ => None,
            })
            .collect()
    }

    pub fn pause_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, SoundEvent::Paused { .. }))
            .count()
    }

    /// Most recent rate set on any handle
    pub fn last_rate(&self) -> Option<f32> {
        self.events().into_iter().rev().find_map(|e| match e {
            SoundEvent::Rate { rate, .. } => Some(rate),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.recording.lock().unwrap().events.clear();
    }
}

struct RecordingHandle {
    id: usize,
    recording: Arc<Mutex<Recording>>,
}

impl SoundHandle for RecordingHandle {
    fn pause(&self) {
        self.recording
            .lock()
            .unwrap()
            .events
            .push(SoundEvent::Paused { handle: self.id });
    }

    fn set_playback_rate(&self, rate: f32) {
        self.recording.lock().unwrap().events.push(SoundEvent::Rate {
            handle: self.id,
            rate,
        });
    }
}

impl SoundBackend for RecordingBackend {
    fn start_sound(&self, request: &SoundRequest) -> Result<Box<dyn SoundHandle>, SoundError> {
        if self.failing.lock().unwrap().contains(&request.id) {
            return Err(SoundError::NotFound {
                id: request.id.clone(),
            });
        }
        let mut rec = self.recording.lock().unwrap();
        let id = rec.next_handle;
        rec.next_handle += 1;
        rec.events.push(SoundEvent::Started {
            handle: id,
            request: request.clone(),
            at: Instant::now(),
        });
        Ok(Box::new(RecordingHandle {
            id,
            recording: Arc::clone(&self.recording),
        }))
    }
}

/// Chat sink that keeps every message
#[derive(Default, Clone)]
pub struct RecordingChat {
    messages: Arc<Mutex<Vec<(PlayerId, String, Option<Color>)>>>,
}

impl RecordingChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text, _)| text.clone())
            .collect()
    }

    pub fn texts_for(&self, player: &PlayerId) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _, _)| p == player)
            .map(|(_, text, _)| text.clone())
            .collect()
    }
}

impl ChatSink for RecordingChat {
    fn send_message(&self, player: &PlayerId, text: &str, color: Option<Color>) {
        self.messages
            .lock()
            .unwrap()
            .push((player.clone(), text.to_string(), color));
    }
}

/// Entity directory backed by a plain map
#[derive(Default, Clone)]
pub struct FixedDirectory {
    entities: Arc<Mutex<HashMap<PlayerId, EntityId>>>,
}

impl FixedDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&self, player: &PlayerId, entity: EntityId) {
        self.entities.lock().unwrap().insert(player.clone(), entity);
    }

    pub fn despawn(&self, player: &PlayerId) {
        self.entities.lock().unwrap().remove(player);
    }
}

impl EntityDirectory for FixedDirectory {
    fn entity_of(&self, player: &PlayerId) -> Option<EntityId> {
        self.entities.lock().unwrap().get(player).copied()
    }
}
