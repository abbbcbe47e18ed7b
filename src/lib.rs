//! Headless input-assignment manager.
//!
//! Binds physical keys and analog axes to a fixed set of logical emulator
//! controls, including the "press any button" capture workflow that produces
//! those bindings.
//!
//! # Example
//! ```
//! use padbind::{Assignment, AssignmentManager, Input};
//!
//! let manager = AssignmentManager::default();
//! let (_, assigned) = manager.subscribe();
//!
//! manager.start_assignment(Input::A);
//! manager.submit_key_event(29, None);
//!
//! assert_eq!(manager.assignment(Input::A), Assignment::from_key(29, None));
//! assert_eq!(assigned.try_recv().map(|e| e.input), Ok(Input::A));
//! ```

pub mod backends;
pub mod binding;
pub mod config;
pub mod device;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod input;
pub mod manager;
pub mod profile;
pub mod snapshot;

pub use binding::*;
pub use config::SetupSettings;
pub use device::*;
pub use error::{Error, Result};
pub use event::*;
pub use eventbus::{AssignmentBus, EventFilter, InputAssigned, SubscriptionId};
pub use input::Input;
pub use manager::*;
pub use profile::InputProfile;
pub use snapshot::ConfigSnapshot;
