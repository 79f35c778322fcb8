#![forbid(unsafe_code)]

//! Recording host doubles.
//!
//! Each double implements one collaborator trait over shared state, and
//! hands out a probe the test keeps after boxing the double into the
//! controller. Everything is deterministic: no threads, no clocks — a
//! "scheduled" callback sits in the probe until the test fires it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use floatwin_runtime::host::{
    DeferredScheduler, HostError, PrimaryAction, SurfaceHandle, SurfaceHost, VideoSource,
};
use floatwin_runtime::timer::SnapBackPayload;

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// One outbound surface command, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    SetPosition { x: i32, y: i32 },
    SetSize { width: i32, height: i32 },
    SetRenderHint { hardware_accelerated: bool },
}

/// Surface double that records every command.
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
    handle: SurfaceHandle,
}

impl RecordingSurface {
    /// Create the double and the probe observing it.
    #[must_use]
    pub fn new() -> (Self, SurfaceRecorder) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let surface = Self {
            calls: calls.clone(),
            handle: SurfaceHandle::new(1),
        };
        (surface, SurfaceRecorder { calls })
    }
}

impl SurfaceHost for RecordingSurface {
    fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::SetPosition { x, y });
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::SetSize { width, height });
    }

    fn set_render_hint(&mut self, hardware_accelerated: bool) {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::SetRenderHint {
                hardware_accelerated,
            });
    }
}

/// Read side of a [`RecordingSurface`].
#[derive(Clone)]
pub struct SurfaceRecorder {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl SurfaceRecorder {
    /// All commands so far.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of commands so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// True when no command was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every position command, in order.
    #[must_use]
    pub fn positions(&self) -> Vec<(i32, i32)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::SetPosition { x, y } => Some((*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// The most recent position command.
    #[must_use]
    pub fn last_position(&self) -> Option<(i32, i32)> {
        self.positions().last().copied()
    }

    /// Every size command, in order.
    #[must_use]
    pub fn sizes(&self) -> Vec<(i32, i32)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::SetSize { width, height } => Some((*width, *height)),
                _ => None,
            })
            .collect()
    }

    /// Every render-hint command, in order.
    #[must_use]
    pub fn render_hints(&self) -> Vec<bool> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::SetRenderHint {
                    hardware_accelerated,
                } => Some(*hardware_accelerated),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SchedulerState {
    pending: Option<(Duration, SnapBackPayload)>,
    schedules: usize,
    cancels: usize,
}

/// Scheduler double: holds at most one callback until the test fires it.
pub struct ManualScheduler {
    state: Arc<Mutex<SchedulerState>>,
}

impl ManualScheduler {
    /// Create the double and the probe observing it.
    #[must_use]
    pub fn new() -> (Self, SchedulerProbe) {
        let state = Arc::new(Mutex::new(SchedulerState::default()));
        (
            Self {
                state: state.clone(),
            },
            SchedulerProbe { state },
        )
    }
}

impl DeferredScheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration, payload: SnapBackPayload) {
        let mut s = self.state.lock().unwrap();
        s.pending = Some((delay, payload));
        s.schedules += 1;
    }

    fn cancel_scheduled(&mut self) {
        let mut s = self.state.lock().unwrap();
        s.pending = None;
        s.cancels += 1;
    }
}

/// Read/fire side of a [`ManualScheduler`].
#[derive(Clone)]
pub struct SchedulerProbe {
    state: Arc<Mutex<SchedulerState>>,
}

impl SchedulerProbe {
    /// The outstanding callback, if any.
    #[must_use]
    pub fn pending(&self) -> Option<(Duration, SnapBackPayload)> {
        self.state.lock().unwrap().pending
    }

    /// Consume the outstanding callback, as the host timer would on expiry.
    /// The caller is responsible for delivering it to the controller.
    #[must_use]
    pub fn take_fire(&self) -> Option<SnapBackPayload> {
        self.state
            .lock()
            .unwrap()
            .pending
            .take()
            .map(|(_, payload)| payload)
    }

    /// Total `schedule_once` calls.
    #[must_use]
    pub fn schedules(&self) -> usize {
        self.state.lock().unwrap().schedules
    }

    /// Total `cancel_scheduled` calls.
    #[must_use]
    pub fn cancels(&self) -> usize {
        self.state.lock().unwrap().cancels
    }
}

// ---------------------------------------------------------------------------
// Primary action
// ---------------------------------------------------------------------------

/// Double-tap action double that counts invocations.
pub struct CountingAction {
    invocations: Arc<Mutex<usize>>,
}

impl CountingAction {
    /// Create the double and the probe observing it.
    #[must_use]
    pub fn new() -> (Self, ActionProbe) {
        let invocations = Arc::new(Mutex::new(0));
        (
            Self {
                invocations: invocations.clone(),
            },
            ActionProbe { invocations },
        )
    }
}

impl PrimaryAction for CountingAction {
    fn invoke(&mut self) {
        *self.invocations.lock().unwrap() += 1;
    }
}

/// Read side of a [`CountingAction`].
#[derive(Clone)]
pub struct ActionProbe {
    invocations: Arc<Mutex<usize>>,
}

impl ActionProbe {
    /// Invocations so far.
    #[must_use]
    pub fn invocations(&self) -> usize {
        *self.invocations.lock().unwrap()
    }
}

// ---------------------------------------------------------------------------
// Video source
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct VideoState {
    attached: bool,
    attaches: usize,
    detaches: usize,
}

/// Video-source double with injectable attach/detach failures.
pub struct StubVideoSource {
    state: Arc<Mutex<VideoState>>,
    fail_attach: Option<String>,
    fail_detach: Option<String>,
}

impl StubVideoSource {
    /// A source that always succeeds.
    #[must_use]
    pub fn new() -> (Self, VideoProbe) {
        Self::build(None, None)
    }

    /// A source whose attach fails with the given message.
    #[must_use]
    pub fn failing_attach(message: &str) -> (Self, VideoProbe) {
        Self::build(Some(message.to_string()), None)
    }

    /// A source whose detach fails with the given message.
    #[must_use]
    pub fn failing_detach(message: &str) -> (Self, VideoProbe) {
        Self::build(None, Some(message.to_string()))
    }

    fn build(fail_attach: Option<String>, fail_detach: Option<String>) -> (Self, VideoProbe) {
        let state = Arc::new(Mutex::new(VideoState::default()));
        (
            Self {
                state: state.clone(),
                fail_attach,
                fail_detach,
            },
            VideoProbe { state },
        )
    }
}

impl VideoSource for StubVideoSource {
    fn attach(&mut self, _surface: SurfaceHandle) -> Result<(), HostError> {
        if let Some(message) = &self.fail_attach {
            return Err(HostError::SurfaceAttach(message.clone()));
        }
        let mut s = self.state.lock().unwrap();
        s.attached = true;
        s.attaches += 1;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), HostError> {
        if let Some(message) = &self.fail_detach {
            return Err(HostError::SurfaceDetach(message.clone()));
        }
        let mut s = self.state.lock().unwrap();
        s.attached = false;
        s.detaches += 1;
        Ok(())
    }
}

/// Read side of a [`StubVideoSource`].
#[derive(Clone)]
pub struct VideoProbe {
    state: Arc<Mutex<VideoState>>,
}

impl VideoProbe {
    /// Whether the source is currently attached.
    #[must_use]
    pub fn attached(&self) -> bool {
        self.state.lock().unwrap().attached
    }

    /// Successful attach count.
    #[must_use]
    pub fn attaches(&self) -> usize {
        self.state.lock().unwrap().attaches
    }

    /// Successful detach count.
    #[must_use]
    pub fn detaches(&self) -> usize {
        self.state.lock().unwrap().detaches
    }
}
