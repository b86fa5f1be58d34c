//! Stateful aggregate scaffolding.
//!
//! Domain entities embed a [`Lifecycle`] and implement [`StatefulAggregate`].
//! The lifecycle stores which state machine governs the entity and where the
//! entity currently is in it. The current state can be read by anyone but is
//! only reassigned by the engine, through `StateMachine::fire` and
//! `StateMachine::goto`.

use super::history::{ChangeCause, StateChange, StateHistory};
use super::state::StateId;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a state machine definition.
///
/// Entities store only this identifier; the machine itself is loaded or
/// cached elsewhere and handed to each transition call.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(String);

impl MachineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MachineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MachineId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identity and state-machine position of a stateful aggregate.
///
/// The initial state is not validated against the machine here; an unknown
/// state simply never matches a sourced transition.
///
/// # Example
///
/// ```rust
/// use stategate::core::{Lifecycle, MachineId};
///
/// let lifecycle = Lifecycle::new(42u64, MachineId::new("orders"), "placed".to_string());
/// assert_eq!(lifecycle.id(), &42);
/// assert_eq!(lifecycle.state_machine_id().as_str(), "orders");
/// assert_eq!(lifecycle.state_id(), "placed");
/// assert!(lifecycle.history().is_empty());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(
    serialize = "Id: Serialize",
    deserialize = "Id: Deserialize<'de>"
))]
pub struct Lifecycle<Id, S: StateId> {
    id: Id,
    state_machine_id: MachineId,
    state_id: S,
    #[serde(default)]
    history: StateHistory<S>,
}

impl<Id, S: StateId> Lifecycle<Id, S> {
    pub fn new(id: Id, state_machine_id: MachineId, state_id: S) -> Self {
        Self {
            id,
            state_machine_id,
            state_id,
            history: StateHistory::new(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn state_machine_id(&self) -> &MachineId {
        &self.state_machine_id
    }

    pub fn state_id(&self) -> &S {
        &self.state_id
    }

    /// Every state change applied to this lifecycle, oldest first.
    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// Move to `to` and record the change.
    pub(crate) fn apply(&mut self, to: S, cause: ChangeCause) {
        let change = StateChange {
            from: self.state_id.clone(),
            to: to.clone(),
            cause,
            timestamp: Utc::now(),
        };
        self.history.push(change);
        self.state_id = to;
    }
}

/// A domain entity whose lifecycle is governed by a state machine.
///
/// Implementors embed a [`Lifecycle`] and expose it; everything else is
/// provided.
///
/// # Example
///
/// ```rust
/// use stategate::core::{Lifecycle, MachineId, StatefulAggregate};
///
/// struct Ticket {
///     lifecycle: Lifecycle<u32, String>,
///     title: String,
/// }
///
/// impl StatefulAggregate for Ticket {
///     type Id = u32;
///     type StateId = String;
///
///     fn lifecycle(&self) -> &Lifecycle<u32, String> {
///         &self.lifecycle
///     }
///
///     fn lifecycle_mut(&mut self) -> &mut Lifecycle<u32, String> {
///         &mut self.lifecycle
///     }
/// }
///
/// let ticket = Ticket {
///     lifecycle: Lifecycle::new(1, MachineId::new("tickets"), "open".to_string()),
///     title: "Broken build".to_string(),
/// };
/// assert_eq!(ticket.state_id(), "open");
/// ```
pub trait StatefulAggregate {
    type Id;
    type StateId: StateId;

    fn lifecycle(&self) -> &Lifecycle<Self::Id, Self::StateId>;

    fn lifecycle_mut(&mut self) -> &mut Lifecycle<Self::Id, Self::StateId>;

    fn id(&self) -> &Self::Id {
        self.lifecycle().id()
    }

    fn state_machine_id(&self) -> &MachineId {
        self.lifecycle().state_machine_id()
    }

    fn state_id(&self) -> &Self::StateId {
        self.lifecycle().state_id()
    }
}
