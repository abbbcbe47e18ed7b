//! Input event sources.

use crate::event::InputEvent;

/// A pollable source of raw input events (platform bridge, scripted device, replay).
///
/// Sources hand events over in the order they occurred; the manager only
/// consumes them and never polls hardware itself.
pub trait Device {
    /// Drains the events received since the last poll.
    fn poll(&mut self) -> Vec<InputEvent>;
    fn name(&self) -> &str;
    fn id(&self) -> &str;
}
