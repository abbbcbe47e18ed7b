//! Tunables for the input-setup workflow.
//!
//! Stored as TOML. Every field has a default, so a partial (or empty) file is valid.

use crate::error::{Error, Result};
use crate::event::{KeyCode, KEYCODE_BACK};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Capture and resolution settings for an [`AssignmentManager`](crate::manager::AssignmentManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupSettings {
    /// Minimum `|value|` an axis sample needs to count as a capture attempt.
    pub axis_deadzone: f32,
    /// Key codes that cancel an in-progress capture instead of being assigned.
    pub cancel_key_codes: Vec<KeyCode>,
    /// Whether clearing the input under capture also stops the capture.
    pub clear_cancels_capture: bool,
    /// Axis deflection at which an axis binding reads as active during resolution.
    pub activation_threshold: f32,
}

impl Default for SetupSettings {
    fn default() -> Self {
        Self {
            axis_deadzone: 0.5,
            cancel_key_codes: vec![KEYCODE_BACK],
            clear_cancels_capture: false,
            activation_threshold: 0.5,
        }
    }
}

impl SetupSettings {
    /// Load settings from a TOML file, or return defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let settings: SetupSettings = toml::from_str(&content)?;
        settings.validate()?;
        tracing::info!(path = %path.display(), "loaded setup settings");
        Ok(settings)
    }

    /// Save settings to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), "saved setup settings");
        Ok(())
    }

    /// Rejects NaN or out-of-range thresholds.
    pub fn validate(&self) -> Result<()> {
        check_unit("axis_deadzone", self.axis_deadzone)?;
        check_unit("activation_threshold", self.activation_threshold)?;
        Ok(())
    }

    /// Copy with thresholds forced into `[0, 1]`; NaN falls back to the default.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.axis_deadzone = clamp_unit(self.axis_deadzone, defaults.axis_deadzone);
        self.activation_threshold =
            clamp_unit(self.activation_threshold, defaults.activation_threshold);
        self
    }

    #[inline]
    pub fn is_cancel_key(&self, key_code: KeyCode) -> bool {
        self.cancel_key_codes.contains(&key_code)
    }
}

fn clamp_unit(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        tracing::warn!(value, fallback, "NaN threshold replaced");
        fallback
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn check_unit(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidSetting(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
