//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and the [`state_enum!`](crate::state_enum)
//! macro for creating state machines with minimal boilerplate. Builders
//! only collect input; validation is done by the machine itself.

pub mod machine;
pub mod macros;
pub mod transition;

pub use crate::machine::BuildError;
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{StateId, Trigger};
use crate::machine::Transition;

/// Create a trigger-driven transition with no rules.
///
/// # Example
///
/// ```
/// use stategate::builder::simple_transition;
///
/// let ship = simple_transition("ship", "placed".to_string(), "shipped".to_string(), "MarkAsShipped");
/// assert!(ship.rules().is_empty());
/// ```
pub fn simple_transition<Id: StateId>(
    id: impl Into<String>,
    from: Id,
    to: Id,
    trigger: impl Into<Trigger>,
) -> Transition<Id> {
    Transition::new(id, Some(from), to, Some(trigger.into()), Vec::new())
}

/// Create a rule-less, trigger-less transition from any state.
///
/// Such a transition is reachable only through `goto`.
pub fn goto_transition<Id: StateId>(id: impl Into<String>, to: Id) -> Transition<Id> {
    Transition::new(id, None, to, None, Vec::new())
}
