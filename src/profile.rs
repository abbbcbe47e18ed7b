//! Persisted input profiles.
//!
//! [`InputProfile`] is the on-disk form of a configuration set: assignments keyed
//! by each [`Input`]'s stable identifier. JSON and TOML are supported; the format
//! is picked from the file extension.
//!
//! ## Normalization
//! - Entries whose key is not a known input are skipped (logged at `warn`).
//! - Inputs with no entry are treated as [`Assignment::None`].
//!
//! [`InputProfile::to_configs`] therefore always yields exactly one entry per input,
//! so a manager never observes a partial configuration.
//!
//! # Example
//! ```no_run
//! use padbind::{AssignmentManager, InputProfile};
//!
//! let profile = InputProfile::load("controls.toml".as_ref()).expect("load profile");
//! let manager = AssignmentManager::default();
//! manager.load(&profile.to_configs());
//! ```

use crate::binding::{Assignment, InputConfig};
use crate::error::{Error, Result};
use crate::input::Input;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

fn default_name() -> String {
    "default".to_string()
}

/// Serialized shape: string keys so unknown identifiers survive parsing.
#[derive(Serialize, Deserialize)]
struct RawProfile {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    assignments: BTreeMap<String, Assignment>,
}

/// Named set of input assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawProfile", into = "RawProfile")]
pub struct InputProfile {
    pub name: String,
    pub assignments: BTreeMap<Input, Assignment>,
}

impl From<RawProfile> for InputProfile {
    fn from(raw: RawProfile) -> Self {
        let mut assignments = BTreeMap::new();
        for (key, assignment) in raw.assignments {
            match key.parse::<Input>() {
                Ok(input) => {
                    assignments.insert(input, assignment);
                }
                Err(e) => tracing::warn!(profile = %raw.name, "skipping entry: {e}"),
            }
        }
        Self {
            name: raw.name,
            assignments,
        }
    }
}

impl From<InputProfile> for RawProfile {
    fn from(profile: InputProfile) -> Self {
        Self {
            name: profile.name,
            assignments: profile
                .assignments
                .into_iter()
                .map(|(input, assignment)| (input.id().to_string(), assignment))
                .collect(),
        }
    }
}

impl Default for InputProfile {
    fn default() -> Self {
        Self::new(default_name())
    }
}

impl InputProfile {
    /// Empty profile (every input unassigned).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assignments: BTreeMap::new(),
        }
    }

    /// Builds a profile from configuration entries; later duplicates win.
    pub fn from_configs<'a>(
        name: impl Into<String>,
        configs: impl IntoIterator<Item = &'a InputConfig>,
    ) -> Self {
        let mut profile = Self::new(name);
        for config in configs {
            profile.assignments.insert(config.input, config.assignment);
        }
        profile
    }

    /// Assignment for `input` (`None` when absent).
    pub fn get(&self, input: Input) -> Assignment {
        self.assignments.get(&input).copied().unwrap_or_default()
    }

    /// Complete configuration set in canonical order.
    pub fn to_configs(&self) -> Vec<InputConfig> {
        Input::ALL
            .iter()
            .map(|&input| InputConfig::new(input, self.get(input)))
            .collect()
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_toml(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reads a `.json` or `.toml` profile.
    pub fn load(path: &Path) -> Result<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;
        let profile = match format {
            Format::Json => Self::from_json(&content)?,
            Format::Toml => Self::from_toml(&content)?,
        };
        tracing::info!(
            path = %path.display(),
            name = %profile.name,
            entries = profile.assignments.len(),
            "loaded input profile"
        );
        Ok(profile)
    }

    /// Writes a `.json` or `.toml` profile, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match Format::of(path)? {
            Format::Json => self.to_json()?,
            Format::Toml => self.to_toml()?,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), name = %self.name, "saved input profile");
        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
