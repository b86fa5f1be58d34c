//! State identifiers and state definitions.
//!
//! A state machine is parameterized by a single identifier type. Any
//! comparable, hashable, serializable value works: `String`, integers, or a
//! plain enum.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::{Hash, Hasher};

/// Bound satisfied by every type usable as a state identifier.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into transitions and history
/// - `Eq` + `Hash`: identifiers are compared by value
/// - `Debug` + `Display`: identifiers appear in errors and logs
/// - `Serialize` + `DeserializeOwned`: definitions and history are serializable
///
/// # Example
///
/// ```rust
/// use stategate::core::StateId;
/// use serde::{Deserialize, Serialize};
/// use std::fmt;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Draft,
///     Published,
/// }
///
/// impl fmt::Display for Phase {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{:?}", self)
///     }
/// }
///
/// fn assert_state_id<T: StateId>() {}
/// assert_state_id::<Phase>();
/// assert_state_id::<String>();
/// assert_state_id::<u32>();
/// ```
pub trait StateId:
    Clone + Eq + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync
{
}

impl<T> StateId for T where
    T: Clone + Eq + Hash + Debug + Display + Serialize + DeserializeOwned + Send + Sync
{
}

/// A named state of a state machine.
///
/// States are identified by `id` alone: two states with the same id are the
/// same state regardless of their display name.
///
/// # Example
///
/// ```rust
/// use stategate::core::State;
///
/// let placed = State::new("placed".to_string(), "Placed");
/// assert_eq!(placed.id(), "placed");
/// assert_eq!(placed.name(), "Placed");
///
/// let renamed = State::new("placed".to_string(), "Order Placed");
/// assert_eq!(placed, renamed);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct State<Id: StateId> {
    id: Id,
    name: String,
}

impl<Id: StateId> State<Id> {
    /// Create a state with the given identifier and display name.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Display name, used for presentation only.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<Id: StateId> PartialEq for State<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Id: StateId> Eq for State<Id> {}

impl<Id: StateId> Hash for State<Id> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
