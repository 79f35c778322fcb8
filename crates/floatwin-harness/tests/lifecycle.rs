//! Overlay show/hide lifecycle and host collaborator failures.

use floatwin_harness::{OverlayHarness, SurfaceCall};
use floatwin_runtime::controller::ControllerState;
use floatwin_runtime::error::ControllerError;
use floatwin_runtime::host::HostError;
use pretty_assertions::assert_eq;

#[test]
fn show_attaches_video_and_materializes_geometry() {
    let mut h = OverlayHarness::new();
    h.controller.show().unwrap();

    assert!(h.controller.is_shown());
    assert!(h.video.attached());
    assert_eq!(
        h.surface.calls(),
        vec![
            SurfaceCall::SetSize {
                width: 200,
                height: 267
            },
            SurfaceCall::SetPosition { x: 0, y: 0 },
        ]
    );
}

#[test]
fn attach_failure_is_surfaced_not_swallowed() {
    let mut h = OverlayHarness::with_failing_attach("camera busy");
    let err = h.controller.show().unwrap_err();
    assert_eq!(
        err,
        ControllerError::Host(HostError::SurfaceAttach("camera busy".into()))
    );
    assert!(!h.controller.is_shown());
    // No geometry goes to a surface the video never reached.
    assert!(h.surface.is_empty());
}

#[test]
fn hide_detaches_and_quiesces_everything() {
    let mut h = OverlayHarness::new();
    h.controller.show().unwrap();

    // Leave the overlay mid-animation with the auto-return armed.
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    h.finish_snap(6);
    h.tap((40.0, 400.0));
    assert!(h.controller.is_auto_return_armed());
    assert_eq!(h.controller.state(), ControllerState::Animating);

    h.controller.hide().unwrap();
    assert!(!h.controller.is_shown());
    assert!(!h.video.attached());
    assert_eq!(h.controller.state(), ControllerState::Idle);
    assert!(!h.controller.is_auto_return_armed());
    assert!(!h.fire_auto_return());

    // The cancelled run ignores late frames.
    let pos = h.controller.position();
    h.controller.on_animation_tick(1.0);
    assert_eq!(h.controller.position(), pos);
}

#[test]
fn hide_releases_the_render_hint_of_an_interrupted_snap() {
    let mut h = OverlayHarness::new();
    h.controller.show().unwrap();
    h.drag_by((500.0, 500.0), 100.0, 0.0);
    h.controller.hide().unwrap();
    assert_eq!(h.surface.render_hints(), vec![true, false]);
}

#[test]
fn detach_failure_is_surfaced() {
    let mut h = OverlayHarness::with_failing_detach("pipeline stalled");
    h.controller.show().unwrap();
    let err = h.controller.hide().unwrap_err();
    assert_eq!(
        err,
        ControllerError::Host(HostError::SurfaceDetach("pipeline stalled".into()))
    );
    // Interaction state was still quiesced before the failure surfaced.
    assert_eq!(h.controller.state(), ControllerState::Idle);
    assert!(!h.controller.is_shown());
}

#[test]
fn show_after_hide_restores_current_geometry() {
    let mut h = OverlayHarness::new();
    h.controller.show().unwrap();
    h.drag_by((500.0, 500.0), 700.0, 40.0);
    h.finish_snap(6);
    h.controller.hide().unwrap();

    h.surface.clear();
    h.controller.show().unwrap();
    // The second show pushes the parked position, not the initial one.
    assert_eq!(
        h.surface.calls(),
        vec![
            SurfaceCall::SetSize {
                width: 200,
                height: 267
            },
            SurfaceCall::SetPosition { x: 1014, y: 40 },
        ]
    );
}
