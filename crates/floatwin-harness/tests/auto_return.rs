//! The deferred auto-return: arming, firing, cancellation, supersession.

use std::time::Duration;

use floatwin_harness::{ManualScheduler, OverlayHarness};
use floatwin_runtime::controller::ControllerState;
use floatwin_runtime::timer::{DeferredActionTimer, SnapBackPayload};
use pretty_assertions::assert_eq;

/// Settle the window at the left resting position (-133).
fn settle_left(h: &mut OverlayHarness) {
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    h.finish_snap(6);
    assert_eq!(h.controller.position().x, -133);
}

#[test]
fn reveal_arms_the_reversed_payload() {
    let mut h = OverlayHarness::new();
    settle_left(&mut h);

    h.tap((40.0, 400.0));
    h.finish_snap(6);
    assert_eq!(h.controller.position().x, 0);
    assert_eq!(
        h.scheduler.pending(),
        Some((Duration::from_millis(5000), SnapBackPayload::new(0, -133)))
    );
}

#[test]
fn fire_returns_to_the_pre_tap_position() {
    let mut h = OverlayHarness::new();
    settle_left(&mut h);
    h.tap((40.0, 400.0));
    h.finish_snap(6);

    assert!(h.fire_auto_return());
    assert_eq!(h.controller.state(), ControllerState::Animating);
    h.finish_snap(6);
    assert_eq!(h.controller.position().x, -133);
    assert!(!h.controller.is_revealed());
    assert!(!h.controller.is_auto_return_armed());
}

#[test]
fn a_press_before_the_fire_disarms_it() {
    let mut h = OverlayHarness::new();
    settle_left(&mut h);
    h.tap((40.0, 400.0));
    h.finish_snap(6);
    assert!(h.controller.is_auto_return_armed());

    // Any fresh press, even one that goes nowhere, kills the snap-back.
    h.advance_ms(200);
    h.tap_unconfirmed((600.0, 600.0));
    assert!(!h.controller.is_auto_return_armed());
    assert!(!h.fire_auto_return());
}

#[test]
fn stale_fire_is_dropped() {
    let mut h = OverlayHarness::new();
    settle_left(&mut h);
    h.tap((40.0, 400.0));
    h.finish_snap(6);
    let payload = h.scheduler.pending().unwrap().1;

    // The press cancels the armed action; a late host delivery of the old
    // payload must not snap anything.
    h.advance_ms(200);
    h.tap_unconfirmed((600.0, 600.0));
    h.controller.on_deferred_timer_fired(payload);
    assert_eq!(h.controller.state(), ControllerState::Idle);
    assert_eq!(h.controller.position().x, 0);
}

#[test]
fn rearming_supersedes_the_previous_payload() {
    // Driven at the timer level: the controller's own flow always cancels
    // via the press first, so last-write-wins is exercised directly.
    let (scheduler, probe) = ManualScheduler::new();
    let mut timer = DeferredActionTimer::new(Box::new(scheduler));
    let first = SnapBackPayload::new(0, -133);
    let second = SnapBackPayload::new(880, 1014);

    timer.schedule(first, Duration::from_millis(5000));
    timer.schedule(second, Duration::from_millis(5000));

    // The host only holds the latest callback, and the first payload can
    // never be claimed even if a stale delivery shows up.
    assert_eq!(probe.pending(), Some((Duration::from_millis(5000), second)));
    assert_eq!(timer.claim(first), None);
    assert_eq!(timer.claim(second), Some(second));
}

#[test]
fn fire_arriving_mid_animation_is_dropped() {
    let mut h = OverlayHarness::new();
    settle_left(&mut h);
    h.tap((40.0, 400.0));
    // Still animating the reveal when the host (misbehaving) fires early.
    assert_eq!(h.controller.state(), ControllerState::Animating);
    let payload = h.scheduler.pending().unwrap().1;
    h.controller.on_deferred_timer_fired(payload);

    // The callback is spent and the reveal animation is undisturbed.
    assert!(!h.controller.is_auto_return_armed());
    h.finish_snap(6);
    assert_eq!(h.controller.position().x, 0);
    assert_eq!(h.controller.state(), ControllerState::Idle);
}
