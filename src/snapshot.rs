//! Point-in-time view of the assignment configuration.
//!
//! [`ConfigSnapshot`] is an **owned**, read-only copy of the configuration set
//! plus the capture slot, taken atomically under the manager's lock. It's what a
//! presentation layer renders and what a persistence layer saves.
//!
//! # Semantics
//! - `entries` holds exactly one [`InputConfig`] per [`Input`], in canonical order.
//! - `version` increases with every configuration change; equal versions mean equal entries.
//! - A snapshot is **immutable** and never refreshes itself.

use crate::binding::{Assignment, InputConfig};
use crate::input::Input;
use crate::profile::InputProfile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigSnapshot {
    /// Configuration version this snapshot was taken at.
    pub version: u64,
    /// Input awaiting assignment, if a capture was in progress.
    pub capture: Option<Input>,
    /// One entry per input, canonical order.
    pub entries: Vec<InputConfig>,
}

impl ConfigSnapshot {
    /// Assignment of a specific input.
    ///
    /// Snapshots taken by the manager are complete; for a hand-built one with a
    /// missing entry this reads as [`Assignment::None`].
    pub fn get(&self, input: Input) -> Assignment {
        self.entries
            .get(input.index())
            .filter(|config| config.input == input)
            .or_else(|| self.entries.iter().find(|config| config.input == input))
            .map_or(Assignment::None, |config| config.assignment)
    }

    /// Iterate entries in canonical order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &InputConfig> {
        self.entries.iter()
    }

    /// Whether `input` is the one being captured.
    #[inline]
    pub fn is_capturing(&self, input: Input) -> bool {
        self.capture == Some(input)
    }

    /// Consume the snapshot and return its entries.
    #[inline]
    pub fn into_inner(self) -> Vec<InputConfig> {
        self.entries
    }

    /// Persistable form of this snapshot.
    pub fn to_profile(&self, name: impl Into<String>) -> InputProfile {
        InputProfile::from_configs(name, &self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_tolerates_partial_entries() {
        let snap = ConfigSnapshot {
            version: 3,
            capture: None,
            entries: vec![InputConfig::new(Input::Rewind, Assignment::from_key(46, None))],
        };
        assert_eq!(snap.get(Input::Rewind), Assignment::from_key(46, None));
        assert_eq!(snap.get(Input::A), Assignment::None);
        assert_eq!(ConfigSnapshot { entries: Vec::new(), ..snap }.get(Input::Rewind), Assignment::None);
    }
}
