//! Input suppression while a snap animation owns the position.

use floatwin_harness::OverlayHarness;
use floatwin_runtime::controller::ControllerState;
use pretty_assertions::assert_eq;

#[test]
fn pointer_storm_during_animation_mutates_nothing() {
    let mut h = OverlayHarness::new();
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    assert_eq!(h.controller.state(), ControllerState::Animating);
    let calls_before = h.surface.len();
    let pos_before = h.controller.position();

    // A full storm: presses, drags, pinches — all consumed, none applied.
    for i in 0..32 {
        let t = h.advance_ms(4);
        let x = 300.0 + i as f32 * 10.0;
        h.controller.on_pointer_down(x, 400.0, t);
        h.controller.on_pointer_move(x + 40.0, 440.0, t);
        h.controller.on_secondary_pointer_down(x + 120.0, 400.0, t);
        h.controller.on_secondary_pointer_move(x + 200.0, 400.0, t);
        h.controller.on_secondary_pointer_up(t);
        h.controller.on_pointer_up(x + 40.0, 440.0, t);
    }

    assert_eq!(h.surface.len(), calls_before);
    assert_eq!(h.controller.position(), pos_before);
    assert_eq!(h.controller.state(), ControllerState::Animating);
    assert!((h.controller.scale_factor() - 1.0).abs() < 1e-6);
}

#[test]
fn suppressed_press_does_not_disarm_the_auto_return() {
    let mut h = OverlayHarness::new();
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    h.finish_snap(6);
    h.tap((40.0, 400.0));
    assert_eq!(h.controller.state(), ControllerState::Animating);
    assert!(h.controller.is_auto_return_armed());

    // A press inside the suppression window is consumed before the
    // timer-cancel step ever runs.
    let t = h.advance_ms(10);
    h.controller.on_pointer_down(500.0, 500.0, t);
    let t = h.advance_ms(10);
    h.controller.on_pointer_up(500.0, 500.0, t);
    assert!(h.controller.is_auto_return_armed());

    // Once the reveal finishes, the armed snap-back still works.
    h.finish_snap(6);
    assert!(h.fire_auto_return());
    h.finish_snap(6);
    assert_eq!(h.controller.position().x, -133);
}

#[test]
fn input_works_again_after_completion() {
    let mut h = OverlayHarness::new();
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    h.finish_snap(6);
    assert_eq!(h.controller.state(), ControllerState::Idle);

    h.advance_ms(500);
    h.drag_by((100.0, 400.0), 800.0, 100.0);
    assert_eq!(h.controller.state(), ControllerState::Animating);
    h.finish_snap(6);
    assert_eq!(h.controller.position().x, 1014);
}

#[test]
fn half_gesture_from_before_the_snap_does_not_leak_through() {
    let mut h = OverlayHarness::new();
    // A quick press/up pair delivered inside the suppression window must
    // not linger as a pending tap once the animation ends.
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    assert_eq!(h.controller.state(), ControllerState::Animating);

    // These arrive suppressed mid-animation.
    let t = h.advance_ms(5);
    h.controller.on_pointer_down(300.0, 300.0, t);
    let t = h.advance_ms(5);
    h.controller.on_pointer_up(300.0, 300.0, t);

    h.finish_snap(6);
    // No pending tap sneaks out after the animation.
    let t = h.advance_ms(400);
    h.controller.poll_gestures(t);
    assert_eq!(h.controller.state(), ControllerState::Idle);
    assert!(!h.controller.is_auto_return_armed());
    assert_eq!(h.controller.position().x, -133);
}

#[test]
fn animation_frames_keep_flowing_during_the_storm() {
    let mut h = OverlayHarness::new();
    h.drag_by((500.0, 500.0), 100.0, 0.0);

    // Interleave suppressed input with real frames.
    for i in 1..=4 {
        let t = h.advance_ms(8);
        h.controller.on_pointer_down(600.0, 600.0, t);
        h.controller.on_animation_tick(i as f32 / 4.0);
        h.controller.on_pointer_up(600.0, 600.0, t);
    }

    assert_eq!(h.controller.state(), ControllerState::Idle);
    assert_eq!(h.controller.position().x, -133);
}
