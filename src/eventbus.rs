//! "Input assigned" notifications.
//!
//! [`AssignmentBus`] fans each completed capture out to any number of
//! subscribers. Delivery goes through unbounded channels, so publishing never
//! blocks the caller; a slow consumer just accumulates a backlog. Subscribers
//! receive notifications in publish order.

use crate::binding::Assignment;
use crate::input::Input;
use std::collections::BTreeMap;
use std::sync::mpsc::{self, Receiver, Sender};

/// Emitted once per successful capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputAssigned {
    /// The logical input that was just configured.
    pub input: Input,
    /// Its new assignment.
    pub assignment: Assignment,
    /// Configuration version after the assignment was applied.
    pub version: u64,
}

/// Determines which notifications a subscriber wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFilter {
    All,
    Only(Input),
    Custom(fn(&InputAssigned) -> bool),
}

impl EventFilter {
    fn accepts(&self, event: &InputAssigned) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(input) => event.input == *input,
            EventFilter::Custom(f) => f(event),
        }
    }
}

/// Identifies a subscription on an [`AssignmentBus`].
pub type SubscriptionId = u64;

struct SubscriberEntry {
    sender: Sender<InputAssigned>,
    enabled: bool,
    filter: EventFilter,
}

/// Publish/subscribe hub for [`InputAssigned`] notifications.
#[derive(Default)]
pub struct AssignmentBus {
    next_id: SubscriptionId,
    // Ordered by id so fan-out order is deterministic.
    subscribers: BTreeMap<SubscriptionId, SubscriberEntry>,
}

impl AssignmentBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber and returns its id and receiving end.
    pub fn subscribe(&mut self, filter: EventFilter) -> (SubscriptionId, Receiver<InputAssigned>) {
        let (sender, receiver) = mpsc::channel();
        let id = self.next_id;
        self.subscribers.insert(
            id,
            SubscriberEntry {
                sender,
                enabled: true,
                filter,
            },
        );
        self.next_id += 1;
        (id, receiver)
    }

    /// Enables a previously registered subscriber.
    pub fn enable(&mut self, id: SubscriptionId) {
        if let Some(entry) = self.subscribers.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Mutes a subscriber without removing it. Notifications published while
    /// muted are not delivered later.
    pub fn disable(&mut self, id: SubscriptionId) {
        if let Some(entry) = self.subscribers.get_mut(&id) {
            entry.enabled = false;
        }
    }

    /// Unregisters a subscriber entirely; its receiver sees a disconnect.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.remove(&id);
    }

    /// Number of registered subscribers (enabled or not).
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Delivers `event` to every enabled, matching subscriber.
    ///
    /// Subscribers whose receiver was dropped are removed.
    pub fn publish(&mut self, event: InputAssigned) {
        self.subscribers.retain(|id, entry| {
            if !entry.enabled || !entry.filter.accepts(&event) {
                return true;
            }
            match entry.sender.send(event) {
                Ok(()) => true,
                Err(_) => {
                    tracing::debug!(subscription = id, "dropping disconnected subscriber");
                    false
                }
            }
        });
    }
}
