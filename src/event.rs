//! Raw device events.
//!
//! The external event source (platform key/motion callbacks, a [`Device`](crate::device::Device)
//! implementation, a test script) reports input as small, device-agnostic deltas
//! ([`InputKind`]) wrapped in a timestamped [`InputEvent`].
//!
//! ## Value conventions
//! - **Key codes** and **axis codes** are the platform's integer codes, passed through untouched.
//! - **Axes:** by convention normalized to `[-1.0, 1.0]`; the sign selects the
//!   [`AxisDirection`](crate::binding::AxisDirection) of a captured binding.
//! - **Device ids** are optional. `None` means the source could not (or chose not to)
//!   attribute the event to a specific device.

use std::time::Instant;

/// Platform identifier of an originating input device.
pub type DeviceId = i32;

/// Platform key code (e.g. Android `KEYCODE_A` = 29).
pub type KeyCode = i32;

/// Platform motion axis code (e.g. Android `AXIS_Y` = 1).
pub type AxisCode = i32;

/// Android `KEYCODE_BACK`; the default capture-cancel key.
pub const KEYCODE_BACK: KeyCode = 4;

/// Per-device input change (delta).
#[derive(Clone, Debug, PartialEq)]
pub enum InputKind {
    /// A key transitioned to pressed (key-down).
    KeyPressed { key_code: KeyCode },

    /// A key transitioned to released (key-up).
    KeyReleased { key_code: KeyCode },

    /// A continuous axis changed.
    AxisMoved { axis: AxisCode, value: f32 },
}

/// Timestamped input event as delivered by an event source.
#[derive(Clone, Debug)]
pub struct InputEvent {
    /// Capture time (monotonic).
    pub at: Instant,
    /// Originating device, if known.
    pub device_id: Option<DeviceId>,
    /// The actual input change.
    pub kind: InputKind,
}

impl InputEvent {
    /// Stamps `kind` with the current time.
    pub fn new(device_id: Option<DeviceId>, kind: InputKind) -> Self {
        Self {
            at: Instant::now(),
            device_id,
            kind,
        }
    }

    pub fn key_pressed(device_id: Option<DeviceId>, key_code: KeyCode) -> Self {
        Self::new(device_id, InputKind::KeyPressed { key_code })
    }

    pub fn key_released(device_id: Option<DeviceId>, key_code: KeyCode) -> Self {
        Self::new(device_id, InputKind::KeyReleased { key_code })
    }

    pub fn axis_moved(device_id: Option<DeviceId>, axis: AxisCode, value: f32) -> Self {
        Self::new(device_id, InputKind::AxisMoved { axis, value })
    }
}
