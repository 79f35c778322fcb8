//! Double-tap dispatch to the embedder-supplied primary action.

use floatwin_harness::OverlayHarness;
use floatwin_runtime::controller::ControllerState;
use pretty_assertions::assert_eq;

#[test]
fn double_tap_invokes_the_action_exactly_once() {
    let mut h = OverlayHarness::new();
    h.double_tap((400.0, 400.0));
    assert_eq!(h.action.invocations(), 1);
}

#[test]
fn double_tap_neither_toggles_nor_arms() {
    let mut h = OverlayHarness::new();
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    h.finish_snap(6);
    let parked = h.controller.position();

    h.advance_ms(500);
    h.double_tap((40.0, 400.0));
    // No snap, no auto-return, no leaked single tap afterwards.
    assert_eq!(h.controller.state(), ControllerState::Idle);
    assert_eq!(h.controller.position(), parked);
    assert!(!h.controller.is_auto_return_armed());
    assert!(!h.controller.is_revealed());
    let t = h.advance_ms(400);
    h.controller.poll_gestures(t);
    assert_eq!(h.controller.state(), ControllerState::Idle);
}

#[test]
fn single_taps_do_not_reach_the_action() {
    let mut h = OverlayHarness::new();
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    h.finish_snap(6);

    h.tap((40.0, 400.0));
    h.finish_snap(6);
    h.advance_ms(200);
    h.tap((40.0, 400.0));
    h.finish_snap(6);
    assert_eq!(h.action.invocations(), 0);
}

#[test]
fn drags_do_not_reach_the_action() {
    let mut h = OverlayHarness::new();
    h.drag_by((500.0, 500.0), 300.0, 0.0);
    h.finish_snap(6);
    assert_eq!(h.action.invocations(), 0);
}
