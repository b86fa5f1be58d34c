//! Core domain types.
//!
//! This module contains the plain data the engine operates on:
//! - State identifiers and named states
//! - Triggers that label transitions
//! - Aggregate lifecycle scaffolding and its change history
//!
//! Nothing here evaluates rules or selects transitions; that lives in
//! [`crate::rules`] and [`crate::machine`].

mod aggregate;
mod history;
mod state;
mod trigger;

pub use aggregate::{Lifecycle, MachineId, StatefulAggregate};
pub use history::{ChangeCause, StateChange, StateHistory};
pub use state::{State, StateId};
pub use trigger::Trigger;
