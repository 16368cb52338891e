//! Shared configuration types for fartbox
//!
//! This crate contains serializable configuration types that are shared between
//! the sequencing core (fartbox-core) and the console host (fartbox-cli).

use serde::{Deserialize, Serialize};

/// RGBA color used for chat hints
pub type Color = [u8; 4];

fn default_true() -> bool {
    true
}

// ─────────────────────────────────────────────────────────────────────────────
// Volume Presets
// ─────────────────────────────────────────────────────────────────────────────

/// Volume factors for the three speak entry points.
///
/// All three share the same sequencing; only the factor handed to the
/// sound backend differs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePresets {
    #[serde(default = "default_speak_volume")]
    pub speak: f32,
    #[serde(default = "default_loud_volume")]
    pub loud: f32,
    #[serde(default = "default_whisper_volume")]
    pub whisper: f32,
}

fn default_speak_volume() -> f32 {
    1.0
}

fn default_loud_volume() -> f32 {
    2.0
}

fn default_whisper_volume() -> f32 {
    0.3
}

impl Default for VolumePresets {
    fn default() -> Self {
        Self {
            speak: default_speak_volume(),
            loud: default_loud_volume(),
            whisper: default_whisper_volume(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Looping Sound Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Settings for the per-player looping sound and its interrupt cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopSettings {
    /// Continuous sound attached to the player while the loop is on
    #[serde(default = "default_loop_sound")]
    pub loop_sound: String,

    /// One-shot sound played when the loop is interrupted
    #[serde(default = "default_interrupt_sound")]
    pub interrupt_sound: String,

    #[serde(default = "default_loop_volume")]
    pub volume: f32,

    /// Playback rate while the rate key is held
    #[serde(default = "default_fast_rate")]
    pub fast_rate: f32,

    /// Playback rate otherwise
    #[serde(default = "default_normal_rate")]
    pub normal_rate: f32,

    /// Delay between the interrupt and the loop coming back
    #[serde(default = "default_resume_delay_ms")]
    pub resume_delay_ms: u64,

    /// Distance at which attached sounds start to attenuate
    #[serde(default = "default_reference_distance")]
    pub reference_distance: f32,
}

fn default_loop_sound() -> String {
    "audio/sfx/farts/fartstep.mp3".to_string()
}

fn default_interrupt_sound() -> String {
    "audio/sfx/farts/fartjump.mp3".to_string()
}

fn default_loop_volume() -> f32 {
    0.8
}

fn default_fast_rate() -> f32 {
    1.5
}

fn default_normal_rate() -> f32 {
    1.0
}

fn default_resume_delay_ms() -> u64 {
    1000
}

fn default_reference_distance() -> f32 {
    5.0
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            loop_sound: default_loop_sound(),
            interrupt_sound: default_interrupt_sound(),
            volume: default_loop_volume(),
            fast_rate: default_fast_rate(),
            normal_rate: default_normal_rate(),
            resume_delay_ms: default_resume_delay_ms(),
            reference_distance: default_reference_distance(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat Colors
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatColors {
    /// Usage and "no valid letters" hints
    #[serde(default = "default_hint_color")]
    pub hint: Color,
    /// Unknown command replies
    #[serde(default = "default_error_color")]
    pub error: Color,
    /// Sequence complete / loop toggled
    #[serde(default = "default_success_color")]
    pub success: Color,
}

fn default_hint_color() -> Color {
    [255, 204, 0, 255]
}

fn default_error_color() -> Color {
    [255, 80, 80, 255]
}

fn default_success_color() -> Color {
    [120, 220, 120, 255]
}

impl Default for ChatColors {
    fn default() -> Self {
        Self {
            hint: default_hint_color(),
            error: default_error_color(),
            success: default_success_color(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sequencer Config
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// Note: Persistence (load/save) lives in fartbox-cli, which owns the
/// platform-specific dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencerConfig {
    /// Directory part of every letter sound id
    #[serde(default = "default_sound_dir")]
    pub sound_dir: String,
    #[serde(default = "default_sound_prefix")]
    pub sound_prefix: String,
    #[serde(default = "default_sound_extension")]
    pub sound_extension: String,

    #[serde(default)]
    pub volumes: VolumePresets,
    #[serde(default)]
    pub looping: LoopSettings,
    #[serde(default)]
    pub colors: ChatColors,

    /// Simulation steps per second for the host tick loop
    #[serde(default = "default_tick_rate_hz")]
    pub tick_rate_hz: u32,

    /// Root directory sound ids are resolved against by the audio backend
    #[serde(default)]
    pub assets_dir: String,

    /// Fall back to log-only playback when no output device is available
    #[serde(default = "default_true")]
    pub allow_silent_fallback: bool,
}

fn default_sound_dir() -> String {
    "audio/sfx/farts".to_string()
}

fn default_sound_prefix() -> String {
    "fart".to_string()
}

fn default_sound_extension() -> String {
    "mp3".to_string()
}

fn default_tick_rate_hz() -> u32 {
    60
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            sound_dir: default_sound_dir(),
            sound_prefix: default_sound_prefix(),
            sound_extension: default_sound_extension(),
            volumes: VolumePresets::default(),
            looping: LoopSettings::default(),
            colors: ChatColors::default(),
            tick_rate_hz: default_tick_rate_hz(),
            assets_dir: String::new(),
            allow_silent_fallback: true,
        }
    }
}

impl SequencerConfig {
    /// Sound id for a single letter, e.g. `audio/sfx/farts/fartA.mp3`
    pub fn letter_sound_id(&self, letter: char) -> String {
        format!(
            "{}/{}{}.{}",
            self.sound_dir.trim_end_matches('/'),
            self.sound_prefix,
            letter,
            self.sound_extension
        )
    }
}
