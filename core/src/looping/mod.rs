//! Looping sound with interrupt
//!
//! Each player gets a `LoopController`: a small state machine that owns at
//! most one live looping sound, speeds it up while the sprint key is held and,
//! on a jump key press, swaps it for a one-shot sound before bringing the loop
//! back after a short delay.
//!
//! # States
//!
//! - `Off`: no sound
//! - `Looping`: continuous sound attached to the player's entity
//! - `Interrupted`: loop released, one-shot playing, resume scheduled
//!
//! The `LoopRegistry` keys controllers by player and drives the resume timer.

mod controller;
mod registry;

#[cfg(test)]
mod controller_tests;

pub use controller::{LoopContext, LoopController, LoopState, TickOutcome};
pub use registry::LoopRegistry;
