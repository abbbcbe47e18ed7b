//! The input assignment manager.
//!
//! [`AssignmentManager`] owns the configuration set (one [`Assignment`] per
//! [`Input`]) and the capture slot (at most one input awaiting assignment).
//!
//! ## Capture workflow
//! 1. [`start_assignment`](AssignmentManager::start_assignment) opens a capture for an
//!    input, replacing any capture already open.
//! 2. The first qualifying raw event wins: a key press, or an axis sample whose
//!    magnitude reaches the configured deadzone. It becomes the input's assignment,
//!    the capture closes, and an [`InputAssigned`] notification is published.
//! 3. [`stop_assignment`](AssignmentManager::stop_assignment) (or a cancel key routed
//!    through [`handle_event`](AssignmentManager::handle_event)) closes the capture
//!    without touching the configuration.
//!
//! A capture has no timeout.
//!
//! ## Concurrency
//! All state lives behind one mutex and every operation takes `&self`, so the
//! manager can be shared as `Arc<AssignmentManager>` between the thread that
//! delivers device events and the one handling UI gestures. Operations never block
//! on consumers: notifications go out through unbounded channels while the lock is
//! held, which keeps them in submit order.

use crate::binding::{self, Assignment, BindingOutput, InputConfig, InputState};
use crate::config::SetupSettings;
use crate::device::Device;
use crate::event::{AxisCode, DeviceId, InputEvent, InputKind, KeyCode};
use crate::eventbus::{AssignmentBus, EventFilter, InputAssigned, SubscriptionId};
use crate::input::Input;
use crate::snapshot::ConfigSnapshot;
use std::sync::mpsc::Receiver;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct State {
    configuration: [Assignment; Input::COUNT],
    capture: Option<Input>,
    version: u64,
    bus: AssignmentBus,
}

impl State {
    fn entries(&self) -> Vec<InputConfig> {
        Input::ALL
            .iter()
            .map(|&input| InputConfig::new(input, self.configuration[input.index()]))
            .collect()
    }

    fn set(&mut self, input: Input, assignment: Assignment) {
        self.configuration[input.index()] = assignment;
        self.version += 1;
    }

    /// Terminal transition of a capture session.
    fn complete_capture(&mut self, input: Input, assignment: Assignment) {
        self.set(input, assignment);
        self.capture = None;
        tracing::debug!(%input, binding = %assignment.describe(), version = self.version, "input assigned");
        self.bus.publish(InputAssigned {
            input,
            assignment,
            version: self.version,
        });
    }

    fn submit_key(&mut self, key_code: KeyCode, device_id: Option<DeviceId>) -> Option<Input> {
        let Some(input) = self.capture else {
            #[cfg(feature = "debug-log")]
            tracing::trace!(key_code, ?device_id, "key ignored: not capturing");
            return None;
        };
        self.complete_capture(input, Assignment::from_key(key_code, device_id));
        Some(input)
    }

    fn submit_axis(
        &mut self,
        axis: AxisCode,
        value: f32,
        device_id: Option<DeviceId>,
        deadzone: f32,
    ) -> Option<Input> {
        let input = self.capture?;
        let Some(assignment) = Assignment::from_axis(axis, value, device_id, deadzone) else {
            #[cfg(feature = "debug-log")]
            tracing::trace!(axis, value, ?device_id, "axis ignored: inside deadzone");
            return None;
        };
        self.complete_capture(input, assignment);
        Some(input)
    }

    /// Check and transition happen under the caller's single guard.
    fn route(&mut self, settings: &SetupSettings, event: &InputEvent) -> bool {
        let Some(input) = self.capture else {
            return false;
        };
        match event.kind {
            InputKind::KeyPressed { key_code } if settings.is_cancel_key(key_code) => {
                self.capture = None;
                tracing::debug!(%input, key_code, "capture cancelled");
                true
            }
            InputKind::KeyPressed { key_code } => {
                self.submit_key(key_code, event.device_id).is_some()
            }
            InputKind::KeyReleased { .. } => false,
            InputKind::AxisMoved { axis, value } => self
                .submit_axis(axis, value, event.device_id, settings.axis_deadzone)
                .is_some(),
        }
    }
}

/// Serialized owner of the assignment configuration and capture state.
pub struct AssignmentManager {
    settings: SetupSettings,
    state: Mutex<State>,
}

impl Default for AssignmentManager {
    fn default() -> Self {
        Self::new(SetupSettings::default())
    }
}

impl AssignmentManager {
    /// Manager with every input unassigned.
    ///
    /// Out-of-range thresholds in `settings` are clamped into `[0, 1]`.
    pub fn new(settings: SetupSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            state: Mutex::new(State {
                configuration: [Assignment::None; Input::COUNT],
                capture: None,
                version: 0,
                bus: AssignmentBus::new(),
            }),
        }
    }

    /// Manager pre-loaded with `configs` (see [`load`](Self::load)).
    pub fn with_configuration<'a>(
        settings: SetupSettings,
        configs: impl IntoIterator<Item = &'a InputConfig>,
    ) -> Self {
        let manager = Self::new(settings);
        manager.load(configs);
        manager
    }

    pub fn settings(&self) -> &SetupSettings {
        &self.settings
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Every mutation leaves the state consistent, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a capture for `input`, superseding any capture in progress.
    pub fn start_assignment(&self, input: Input) {
        let mut state = self.lock();
        match state.capture.replace(input) {
            Some(prev) if prev != input => {
                tracing::debug!(%input, superseded = %prev, "capture restarted")
            }
            Some(_) => {}
            None => tracing::debug!(%input, "capture started"),
        }
    }

    /// Closes the current capture, if any. Never touches the configuration.
    pub fn stop_assignment(&self) {
        if let Some(input) = self.lock().capture.take() {
            tracing::debug!(%input, "capture stopped");
        }
    }

    /// Unbinds `input`.
    ///
    /// An open capture on `input` stays open unless
    /// [`SetupSettings::clear_cancels_capture`] is set.
    pub fn clear_assignment(&self, input: Input) {
        let mut state = self.lock();
        state.set(input, Assignment::None);
        if self.settings.clear_cancels_capture && state.capture == Some(input) {
            state.capture = None;
        }
        tracing::debug!(%input, version = state.version, "assignment cleared");
    }

    /// Offers a key-down to the open capture.
    ///
    /// Returns the input that was assigned, or `None` if no capture was open.
    pub fn submit_key_event(&self, key_code: KeyCode, device_id: Option<DeviceId>) -> Option<Input> {
        self.lock().submit_key(key_code, device_id)
    }

    /// Offers an axis sample to the open capture.
    ///
    /// Samples below the deadzone are dropped and leave the capture open.
    /// Returns the input that was assigned, if any.
    pub fn submit_axis_event(
        &self,
        axis: AxisCode,
        value: f32,
        device_id: Option<DeviceId>,
    ) -> Option<Input> {
        self.lock()
            .submit_axis(axis, value, device_id, self.settings.axis_deadzone)
    }

    /// Routes a raw event the way an input-setup screen would.
    ///
    /// Returns whether the event was consumed. Nothing is consumed while no
    /// capture is open. During a capture, cancel keys stop it and other key
    /// presses are assigned. Key releases pass through untouched, and axis
    /// samples are consumed only when they produce an assignment.
    pub fn handle_event(&self, event: &InputEvent) -> bool {
        self.lock().route(&self.settings, event)
    }

    /// Polls `device` once and routes every event. Returns how many were consumed.
    pub fn pump(&self, device: &mut dyn Device) -> usize {
        device
            .poll()
            .iter()
            .filter(|event| self.handle_event(event))
            .count()
    }

    /// Current configuration, one entry per input, canonical order.
    pub fn query(&self) -> Vec<InputConfig> {
        self.lock().entries()
    }

    /// Assignment of a single input.
    pub fn assignment(&self, input: Input) -> Assignment {
        self.lock().configuration[input.index()]
    }

    /// Input awaiting assignment, if a capture is open.
    pub fn input_under_assignment(&self) -> Option<Input> {
        self.lock().capture
    }

    /// Configuration version; bumped by every assignment change.
    pub fn version(&self) -> u64 {
        self.lock().version
    }

    /// Atomic copy of configuration and capture state.
    pub fn snapshot(&self) -> ConfigSnapshot {
        let state = self.lock();
        ConfigSnapshot {
            version: state.version,
            capture: state.capture,
            entries: state.entries(),
        }
    }

    /// Replaces the whole configuration.
    ///
    /// Inputs missing from `configs` become unassigned; for duplicates the last
    /// entry wins. Capture state is left alone and no notification is published.
    pub fn load<'a>(&self, configs: impl IntoIterator<Item = &'a InputConfig>) {
        let mut configuration = [Assignment::None; Input::COUNT];
        for config in configs {
            configuration[config.input.index()] = config.assignment;
        }
        let mut state = self.lock();
        state.configuration = configuration;
        state.version += 1;
        tracing::debug!(version = state.version, "configuration loaded");
    }

    /// Logical inputs currently held, using [`SetupSettings::activation_threshold`] for axes.
    pub fn resolve(&self, state: &InputState) -> BindingOutput {
        let state_lock = self.lock();
        binding::resolve(&state_lock.entries(), state, self.settings.activation_threshold)
    }

    /// Subscribes to every [`InputAssigned`] notification.
    pub fn subscribe(&self) -> (SubscriptionId, Receiver<InputAssigned>) {
        self.subscribe_filtered(EventFilter::All)
    }

    pub fn subscribe_filtered(&self, filter: EventFilter) -> (SubscriptionId, Receiver<InputAssigned>) {
        self.lock().bus.subscribe(filter)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().bus.unsubscribe(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::AxisDirection;

    #[test]
    fn test_query_has_one_entry_per_input() {
        let mgr = AssignmentManager::default();
        let configs = mgr.query();
        assert_eq!(configs.len(), Input::COUNT);
        for (config, &input) in configs.iter().zip(Input::ALL) {
            assert_eq!(config.input, input);
            assert_eq!(config.assignment, Assignment::None);
        }
    }

    #[test]
    fn test_start_is_idempotent_and_last_wins() {
        let mgr = AssignmentManager::default();
        mgr.start_assignment(Input::A);
        mgr.start_assignment(Input::A);
        assert_eq!(mgr.input_under_assignment(), Some(Input::A));
        mgr.start_assignment(Input::B);
        assert_eq!(mgr.input_under_assignment(), Some(Input::B));
        mgr.stop_assignment();
        mgr.stop_assignment();
        assert_eq!(mgr.input_under_assignment(), None);
    }

    #[test]
    fn test_key_completes_capture() {
        let mgr = AssignmentManager::default();
        let (_, rx) = mgr.subscribe();
        mgr.start_assignment(Input::L);
        assert_eq!(mgr.submit_key_event(102, Some(3)), Some(Input::L));
        assert_eq!(mgr.assignment(Input::L), Assignment::from_key(102, Some(3)));
        assert_eq!(mgr.input_under_assignment(), None);

        // Capture is closed; the next key goes nowhere.
        assert_eq!(mgr.submit_key_event(103, None), None);
        assert_eq!(mgr.assignment(Input::L), Assignment::from_key(102, Some(3)));

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].input, Input::L);
        assert_eq!(events[0].version, mgr.version());
    }

    #[test]
    fn test_axis_respects_deadzone() {
        let mgr = AssignmentManager::new(SetupSettings {
            axis_deadzone: 0.4,
            ..SetupSettings::default()
        });
        mgr.start_assignment(Input::Right);
        assert_eq!(mgr.submit_axis_event(0, 0.39, None), None);
        assert_eq!(mgr.input_under_assignment(), Some(Input::Right));
        assert_eq!(mgr.submit_axis_event(0, 0.4, None), Some(Input::Right));
        assert_eq!(
            mgr.assignment(Input::Right),
            Assignment::Axis {
                device_id: None,
                axis_code: 0,
                direction: AxisDirection::Positive,
            }
        );
    }

    #[test]
    fn test_clear_keeps_capture_by_default() {
        let mgr = AssignmentManager::default();
        mgr.start_assignment(Input::A);
        mgr.submit_key_event(29, None);
        mgr.start_assignment(Input::A);
        mgr.clear_assignment(Input::A);
        assert_eq!(mgr.assignment(Input::A), Assignment::None);
        assert_eq!(mgr.input_under_assignment(), Some(Input::A));
    }

    #[test]
    fn test_clear_can_cancel_capture() {
        let mgr = AssignmentManager::new(SetupSettings {
            clear_cancels_capture: true,
            ..SetupSettings::default()
        });
        mgr.start_assignment(Input::B);
        mgr.clear_assignment(Input::A);
        assert_eq!(mgr.input_under_assignment(), Some(Input::B));
        mgr.clear_assignment(Input::B);
        assert_eq!(mgr.input_under_assignment(), None);
    }

    #[test]
    fn test_handle_event_routing() {
        let mgr = AssignmentManager::default();
        assert!(!mgr.handle_event(&InputEvent::key_pressed(None, 29)));

        mgr.start_assignment(Input::X);
        assert!(!mgr.handle_event(&InputEvent::key_released(None, 52)));
        assert!(!mgr.handle_event(&InputEvent::axis_moved(None, 0, 0.1)));
        assert_eq!(mgr.input_under_assignment(), Some(Input::X));

        assert!(mgr.handle_event(&InputEvent::key_pressed(None, crate::event::KEYCODE_BACK)));
        assert_eq!(mgr.input_under_assignment(), None);
        assert_eq!(mgr.assignment(Input::X), Assignment::None);

        mgr.start_assignment(Input::X);
        assert!(mgr.handle_event(&InputEvent::key_pressed(Some(1), 52)));
        assert_eq!(mgr.assignment(Input::X), Assignment::from_key(52, Some(1)));
    }

    #[test]
    fn test_route_acts_on_the_capture_open_under_the_guard() {
        let settings = SetupSettings::default();
        let mgr = AssignmentManager::default();
        mgr.start_assignment(Input::X);

        let mut state = mgr.lock();
        // The UI restarts the capture on Y before the event thread's cancel is routed.
        state.capture = Some(Input::Y);
        assert!(state.route(&settings, &InputEvent::key_pressed(None, crate::event::KEYCODE_BACK)));
        assert_eq!(state.capture, None);
        assert!(state.configuration.iter().all(Assignment::is_none));

        // A key after the capture closed is neither assigned nor consumed.
        assert!(!state.route(&settings, &InputEvent::key_pressed(None, 29)));
        assert_eq!(state.version, 0);
    }

    #[test]
    fn test_nan_deadzone_is_sanitized() {
        let mgr = AssignmentManager::new(SetupSettings {
            axis_deadzone: f32::NAN,
            ..SetupSettings::default()
        });
        assert_eq!(mgr.settings().axis_deadzone, SetupSettings::default().axis_deadzone);

        mgr.start_assignment(Input::Up);
        assert_eq!(mgr.submit_axis_event(1, 0.001, None), None);
        assert_eq!(mgr.assignment(Input::Up), Assignment::None);
        assert_eq!(mgr.input_under_assignment(), Some(Input::Up));
    }

    #[test]
    fn test_out_of_range_deadzone_is_clamped() {
        let mgr = AssignmentManager::new(SetupSettings {
            axis_deadzone: 3.0,
            activation_threshold: -1.0,
            ..SetupSettings::default()
        });
        assert_eq!(mgr.settings().axis_deadzone, 1.0);
        assert_eq!(mgr.settings().activation_threshold, 0.0);

        mgr.start_assignment(Input::Down);
        assert_eq!(mgr.submit_axis_event(1, 0.99, None), None);
        assert_eq!(mgr.submit_axis_event(1, 1.0, None), Some(Input::Down));
    }

    #[test]
    fn test_load_fills_missing_and_keeps_capture() {
        let mgr = AssignmentManager::default();
        mgr.start_assignment(Input::Start);
        let before = mgr.version();
        let (_, rx) = mgr.subscribe();

        mgr.load(&[
            InputConfig::new(Input::A, Assignment::from_key(1, None)),
            InputConfig::new(Input::A, Assignment::from_key(2, None)),
        ]);

        let snap = mgr.snapshot();
        assert!(snap.version > before);
        assert!(snap.is_capturing(Input::Start));
        assert_eq!(snap.get(Input::A), Assignment::from_key(2, None));
        assert_eq!(snap.into_inner().len(), Input::COUNT);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_resolve_uses_current_configuration() {
        let mgr = AssignmentManager::default();
        mgr.start_assignment(Input::FastForward);
        mgr.submit_axis_event(17, 0.9, None);

        let mut state = InputState::new();
        state.apply(&InputEvent::axis_moved(Some(2), 17, 0.6));
        assert!(mgr.resolve(&state).is_active(Input::FastForward));

        state.apply(&InputEvent::axis_moved(Some(2), 17, 0.2));
        assert!(mgr.resolve(&state).active.is_empty());
    }
}
