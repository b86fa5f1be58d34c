//! State change history.
//!
//! Every state assignment made by the engine is recorded on the entity's
//! lifecycle as an immutable [`StateChange`].

use super::state::StateId;
use super::trigger::Trigger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What caused a state change.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ChangeCause {
    /// A trigger was fired and a matching transition passed its rules.
    Fired(Trigger),
    /// A direct jump to a target state was requested.
    Goto,
}

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use stategate::core::{ChangeCause, StateChange, Trigger};
/// use chrono::Utc;
///
/// let change = StateChange {
///     from: "placed".to_string(),
///     to: "shipped".to_string(),
///     cause: ChangeCause::Fired(Trigger::new("MarkAsShipped")),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(change.to, "shipped");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateChange<S: StateId> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// Trigger or goto request that caused the change
    pub cause: ChangeCause,
    /// When the change was applied
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state changes.
///
/// History is immutable - the `record` method returns a new history
/// with the change added.
///
/// # Example
///
/// ```rust
/// use stategate::core::{ChangeCause, StateChange, StateHistory};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
/// let history = history.record(StateChange {
///     from: 1u8,
///     to: 2,
///     cause: ChangeCause::Goto,
///     timestamp: Utc::now(),
/// });
/// let history = history.record(StateChange {
///     from: 2u8,
///     to: 3,
///     cause: ChangeCause::Goto,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec![&1u8, &2, &3]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: StateId> {
    changes: Vec<StateChange<S>>,
}

impl<S: StateId> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateId> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// Record a change, returning a new history.
    ///
    /// The existing history is left untouched, so every call copies the
    /// recorded changes.
    pub fn record(&self, change: StateChange<S>) -> Self {
        let mut changes = self.changes.clone();
        changes.push(change);
        Self { changes }
    }

    /// Append a change in place.
    pub(crate) fn push(&mut self, change: StateChange<S>) {
        self.changes.push(change);
    }

    /// States traversed in order: the first source state, then the target of
    /// each change.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.changes.first() {
            path.push(&first.from);
        }
        for change in &self.changes {
            path.push(&change.to);
        }
        path
    }

    /// Time between the first and last recorded change.
    ///
    /// Returns `None` if there are no changes.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.changes.first(), self.changes.last()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<&StateChange<S>> {
        self.changes.last()
    }

    pub fn changes(&self) -> &[StateChange<S>] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
