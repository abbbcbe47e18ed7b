//! Assignments: which physical key or axis drives each logical input.
//!
//! An [`Assignment`] is a tagged union; exhaustive matching covers every case.
//! This module also holds the mapping rules that turn a raw key/axis event into
//! an assignment, and [`resolve`], which evaluates a configuration against live
//! device state.

use crate::event::{AxisCode, DeviceId, InputEvent, InputKind, KeyCode};
use crate::input::Input;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Which polarity of axis deflection triggers an axis binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDirection {
    Positive,
    Negative,
}

impl AxisDirection {
    /// Polarity of `value`, or `None` for zero/NaN.
    pub fn from_value(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(AxisDirection::Positive)
        } else if value < 0.0 {
            Some(AxisDirection::Negative)
        } else {
            None
        }
    }

    /// Deflection of `value` along this direction (negative when pushed the other way).
    #[inline]
    pub fn deflection(self, value: f32) -> f32 {
        match self {
            AxisDirection::Positive => value,
            AxisDirection::Negative => -value,
        }
    }
}

/// Physical binding (or absence of one) for a logical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assignment {
    /// No binding.
    #[default]
    None,
    /// Bound to a discrete key, optionally scoped to one device.
    Key {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_id: Option<DeviceId>,
        key_code: KeyCode,
    },
    /// Bound to one polarity of a continuous axis, optionally scoped to one device.
    Axis {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_id: Option<DeviceId>,
        axis_code: AxisCode,
        direction: AxisDirection,
    },
}

impl Assignment {
    /// Key binding for a key-down event.
    pub fn from_key(key_code: KeyCode, device_id: Option<DeviceId>) -> Self {
        Assignment::Key {
            device_id,
            key_code,
        }
    }

    /// Axis binding for an axis sample, or `None` if the sample is below `deadzone`.
    ///
    /// The direction follows the sign of `value`. NaN and zero never qualify.
    pub fn from_axis(
        axis_code: AxisCode,
        value: f32,
        device_id: Option<DeviceId>,
        deadzone: f32,
    ) -> Option<Self> {
        if value.is_nan() || value.abs() < deadzone {
            return None;
        }
        let direction = AxisDirection::from_value(value)?;
        Some(Assignment::Axis {
            device_id,
            axis_code,
            direction,
        })
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Assignment::None)
    }

    /// Originating device the binding is scoped to, if any.
    pub fn device_id(&self) -> Option<DeviceId> {
        match self {
            Assignment::None => None,
            Assignment::Key { device_id, .. } | Assignment::Axis { device_id, .. } => *device_id,
        }
    }

    /// Short label suitable for a settings list (`"Key 29"`, `"-Axis 1"`, `"Not set"`).
    pub fn describe(&self) -> String {
        let (mut label, device_id) = match self {
            Assignment::None => return "Not set".to_string(),
            Assignment::Key {
                device_id,
                key_code,
            } => (format!("Key {key_code}"), device_id),
            Assignment::Axis {
                device_id,
                axis_code,
                direction,
            } => {
                let prefix = match direction {
                    AxisDirection::Negative => "-",
                    AxisDirection::Positive => "",
                };
                (format!("{prefix}Axis {axis_code}"), device_id)
            }
        };
        if let Some(id) = device_id {
            label.push_str(&format!(" (device {id})"));
        }
        label
    }

    /// Whether this binding is currently triggered by `state`.
    ///
    /// Unscoped bindings (`device_id == None`) match the code on any device.
    /// Axis bindings are active once deflection in their direction reaches `threshold`.
    pub fn is_active(&self, state: &InputState, threshold: f32) -> bool {
        match *self {
            Assignment::None => false,
            Assignment::Key {
                device_id,
                key_code,
            } => state
                .pressed
                .iter()
                .any(|&(dev, code)| code == key_code && scope_matches(device_id, dev)),
            Assignment::Axis {
                device_id,
                axis_code,
                direction,
            } => state.axes.iter().any(|(&(dev, code), &value)| {
                code == axis_code
                    && scope_matches(device_id, dev)
                    && direction.deflection(value) >= threshold
            }),
        }
    }
}

fn scope_matches(bound: Option<DeviceId>, seen: Option<DeviceId>) -> bool {
    bound.is_none() || bound == seen
}

/// A logical input paired with its current assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputConfig {
    pub input: Input,
    #[serde(default)]
    pub assignment: Assignment,
}

impl InputConfig {
    pub fn new(input: Input, assignment: Assignment) -> Self {
        Self { input, assignment }
    }

    /// Unbound entry for `input`.
    pub fn unassigned(input: Input) -> Self {
        Self::new(input, Assignment::None)
    }

    /// True for key and axis bindings; presentation layers show a "clear" control for these.
    pub fn has_key_assigned(&self) -> bool {
        !self.assignment.is_none()
    }
}

/// Live key/axis state accumulated from an event stream.
///
/// Keys are `(device_id, code)` so device-scoped bindings can be told apart.
#[derive(Default, Debug, Clone)]
pub struct InputState {
    pressed: HashSet<(Option<DeviceId>, KeyCode)>,
    axes: HashMap<(Option<DeviceId>, AxisCode), f32>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one event into the state.
    pub fn apply(&mut self, event: &InputEvent) {
        let dev = event.device_id;
        match event.kind {
            InputKind::KeyPressed { key_code } => {
                self.pressed.insert((dev, key_code));
            }
            InputKind::KeyReleased { key_code } => {
                self.pressed.remove(&(dev, key_code));
            }
            InputKind::AxisMoved { axis, value } => {
                self.axes.insert((dev, axis), value);
            }
        }
    }

    /// Folds a batch of events into the state, in order.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Last known value of an axis on a device (0.0 if never seen).
    pub fn get_axis(&self, device_id: Option<DeviceId>, axis: AxisCode) -> f32 {
        self.axes.get(&(device_id, axis)).copied().unwrap_or(0.0)
    }

    /// Whether a key on a device is currently held.
    pub fn is_pressed(&self, device_id: Option<DeviceId>, key_code: KeyCode) -> bool {
        self.pressed.contains(&(device_id, key_code))
    }
}

/// Logical inputs currently triggered, as produced by [`resolve`].
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BindingOutput {
    pub active: BTreeSet<Input>,
}

impl BindingOutput {
    #[inline]
    pub fn is_active(&self, input: Input) -> bool {
        self.active.contains(&input)
    }
}

/// Resolves which logical inputs are active given the current device state.
pub fn resolve<'a>(
    configs: impl IntoIterator<Item = &'a InputConfig>,
    state: &InputState,
    threshold: f32,
) -> BindingOutput {
    let mut output = BindingOutput::default();

    for config in configs {
        if config.assignment.is_active(state, threshold) {
            output.active.insert(config.input);
        }
    }

    output
}
