//! Scripted in-memory event source.

use crate::device::Device;
use crate::event::{AxisCode, DeviceId, InputEvent, KeyCode};

/// A device whose events are injected by code rather than read from hardware.
///
/// Every injected event carries this device's `platform_id` (if any), so it can
/// stand in for a specific controller when testing device-scoped bindings.
#[derive(Default)]
pub struct VirtualDevice {
    id: String,
    name: String,
    platform_id: Option<DeviceId>,
    events: Vec<InputEvent>,
}

impl VirtualDevice {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            platform_id: None,
            events: Vec::new(),
        }
    }

    /// Attributes all injected events to `platform_id`.
    pub fn with_platform_id(mut self, platform_id: DeviceId) -> Self {
        self.platform_id = Some(platform_id);
        self
    }

    /// Inject a raw input event into the virtual device.
    pub fn feed(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Convenience method to set an axis value.
    pub fn set_axis(&mut self, axis: AxisCode, value: f32) {
        self.feed(InputEvent::axis_moved(self.platform_id, axis, value));
    }

    pub fn press_key(&mut self, key_code: KeyCode) {
        self.feed(InputEvent::key_pressed(self.platform_id, key_code));
    }

    pub fn release_key(&mut self, key_code: KeyCode) {
        self.feed(InputEvent::key_released(self.platform_id, key_code));
    }

    /// Press followed by release.
    pub fn tap_key(&mut self, key_code: KeyCode) {
        self.press_key(key_code);
        self.release_key(key_code);
    }

    /// Events injected but not yet polled.
    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl Device for VirtualDevice {
    fn poll(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> &str {
        &self.id
    }
}
