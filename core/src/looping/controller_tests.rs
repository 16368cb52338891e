//! Tests for the per-player loop state machine, driven without timers

use fartbox_types::LoopSettings;

use super::{LoopContext, LoopController, LoopState, TickOutcome};
use crate::testing::{RecordingBackend, SoundEvent};
use crate::world::{EntityId, PlayerId, PlayerInput};

const ENTITY: EntityId = EntityId(7);

fn ctx<'a>(backend: &'a RecordingBackend, settings: &'a LoopSettings) -> LoopContext<'a> {
    LoopContext {
        backend,
        settings,
        entity: Some(ENTITY),
    }
}

fn input(sprint: bool, jump: bool) -> PlayerInput {
    PlayerInput { sprint, jump }
}

fn looping_controller(backend: &RecordingBackend, settings: &LoopSettings) -> LoopController {
    let mut controller = LoopController::new(PlayerId::new("stepper"));
    assert_eq!(controller.toggle(&ctx(backend, settings)), LoopState::Looping);
    backend.clear();
    controller
}

#[test]
fn test_toggle_on_attaches_loop_to_entity() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = LoopController::new(PlayerId::new("stepper"));

    assert_eq!(controller.toggle(&ctx(&backend, &settings)), LoopState::Looping);

    let started = backend.started();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].id, settings.loop_sound);
    assert!(started[0].looping);
    assert_eq!(started[0].attached_to, Some(ENTITY));
    assert_eq!(started[0].reference_distance, Some(settings.reference_distance));
}

#[test]
fn test_toggle_twice_returns_to_off_without_sound() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = LoopController::new(PlayerId::new("stepper"));

    controller.toggle(&ctx(&backend, &settings));
    assert_eq!(controller.toggle(&ctx(&backend, &settings)), LoopState::Off);

    assert!(!controller.has_sound());
    assert_eq!(backend.pause_count(), 1);
}

#[test]
fn test_toggle_without_entity_is_noop() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = LoopController::new(PlayerId::new("ghost"));
    let no_entity = LoopContext {
        backend: &backend,
        settings: &settings,
        entity: None,
    };

    assert_eq!(controller.toggle(&no_entity), LoopState::Off);
    assert!(backend.events().is_empty());
}

#[test]
fn test_failed_loop_start_stays_off() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    backend.fail_on(&settings.loop_sound);
    let mut controller = LoopController::new(PlayerId::new("stepper"));

    assert_eq!(controller.toggle(&ctx(&backend, &settings)), LoopState::Off);
    assert!(!controller.has_sound());
}

#[test]
fn test_rate_reapplied_every_tick() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);

    for _ in 0..5 {
        controller.on_tick(input(true, false), &ctx(&backend, &settings));
        assert_eq!(backend.last_rate(), Some(settings.fast_rate));
    }
    let rate_events = backend
        .events()
        .iter()
        .filter(|e| matches!(e, SoundEvent::Rate { .. }))
        .count();
    assert_eq!(rate_events, 5);

    controller.on_tick(input(false, false), &ctx(&backend, &settings));
    assert_eq!(backend.last_rate(), Some(settings.normal_rate));
}

#[test]
fn test_tick_while_off_touches_nothing() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = LoopController::new(PlayerId::new("stepper"));

    let outcome = controller.on_tick(input(true, true), &ctx(&backend, &settings));

    assert_eq!(outcome, TickOutcome::Idle);
    assert!(backend.events().is_empty());
}

#[test]
fn test_rising_edge_interrupts() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);

    let outcome = controller.on_tick(input(false, true), &ctx(&backend, &settings));

    assert_eq!(outcome, TickOutcome::InterruptStarted);
    assert_eq!(controller.state(), LoopState::Interrupted);
    assert!(controller.is_interrupt_pending());
    assert!(!controller.has_sound());
    assert_eq!(backend.pause_count(), 1);
    assert_eq!(backend.started_ids(), [settings.interrupt_sound.clone()]);
    assert!(!backend.started()[0].looping);
}

#[test]
fn test_held_jump_is_not_a_new_edge() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);

    // Jump already held when the loop comes back: no edge until released
    controller.on_tick(input(false, true), &ctx(&backend, &settings));
    controller.resume(&ctx(&backend, &settings));
    backend.clear();

    for _ in 0..3 {
        let outcome = controller.on_tick(input(false, true), &ctx(&backend, &settings));
        assert_eq!(outcome, TickOutcome::Idle);
    }
    assert_eq!(controller.state(), LoopState::Looping);

    controller.on_tick(input(false, false), &ctx(&backend, &settings));
    let outcome = controller.on_tick(input(false, true), &ctx(&backend, &settings));
    assert_eq!(outcome, TickOutcome::InterruptStarted);
}

#[test]
fn test_second_edge_while_pending_is_ignored() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);

    controller.on_tick(input(false, true), &ctx(&backend, &settings));
    controller.on_tick(input(false, false), &ctx(&backend, &settings));
    let outcome = controller.on_tick(input(false, true), &ctx(&backend, &settings));

    assert_eq!(outcome, TickOutcome::Idle);
    assert_eq!(backend.started().len(), 1, "only one interrupt sound");
}

#[test]
fn test_resume_starts_fresh_loop() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);
    controller.on_tick(input(false, true), &ctx(&backend, &settings));

    assert_eq!(controller.resume(&ctx(&backend, &settings)), LoopState::Looping);

    assert!(!controller.is_interrupt_pending());
    assert!(controller.has_sound());
    assert_eq!(
        backend.started_ids(),
        [settings.interrupt_sound.clone(), settings.loop_sound.clone()]
    );
}

#[test]
fn test_resume_without_entity_goes_off() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);
    controller.on_tick(input(false, true), &ctx(&backend, &settings));

    let gone = LoopContext {
        backend: &backend,
        settings: &settings,
        entity: None,
    };
    assert_eq!(controller.resume(&gone), LoopState::Off);
    assert!(!controller.is_interrupt_pending());
}

#[test]
fn test_toggle_during_interrupt_turns_off() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);
    controller.on_tick(input(false, true), &ctx(&backend, &settings));

    assert_eq!(controller.toggle(&ctx(&backend, &settings)), LoopState::Off);
    assert!(!controller.is_interrupt_pending());

    // A late resume must not bring the loop back
    assert_eq!(controller.resume(&ctx(&backend, &settings)), LoopState::Off);
    assert!(!controller.has_sound());
}

#[test]
fn test_resume_from_earlier_interrupt_is_ignored() {
    let backend = RecordingBackend::new();
    let settings = LoopSettings::default();
    let mut controller = looping_controller(&backend, &settings);

    controller.on_tick(input(false, true), &ctx(&backend, &settings));
    let first = controller.interrupt_generation();

    // Off and on again, then a second interrupt before the first timer fires
    controller.toggle(&ctx(&backend, &settings));
    controller.toggle(&ctx(&backend, &settings));
    controller.on_tick(input(false, false), &ctx(&backend, &settings));
    controller.on_tick(input(false, true), &ctx(&backend, &settings));
    let second = controller.interrupt_generation();
    assert_ne!(first, second);

    assert_eq!(
        controller.resume_if_current(first, &ctx(&backend, &settings)),
        LoopState::Interrupted
    );
    assert!(controller.is_interrupt_pending());
    assert!(!controller.has_sound());

    assert_eq!(
        controller.resume_if_current(second, &ctx(&backend, &settings)),
        LoopState::Looping
    );
    assert!(controller.has_sound());
}
