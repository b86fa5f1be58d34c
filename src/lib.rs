//! Stategate: rule-guarded state machines for domain aggregates
//!
//! A [`StateMachine`] is a validated, immutable table of states and
//! transitions. Entities that carry a [`Lifecycle`] move through it in two
//! ways:
//!
//! - **fire**: an event-driven step. The machine picks the transitions that
//!   react to a [`Trigger`] from the entity's current state, checks their
//!   rules and applies the change. Unrelated triggers are ignored.
//! - **goto**: a direct jump to a target state, guarded by any trigger-less
//!   transition that models it.
//!
//! Transition guards are [`TransitionRule`]s: named expressions evaluated by
//! a pluggable [`RuleEvaluator`]. Every failing rule is reported, not just
//! the first one.
//!
//! # Example
//!
//! ```rust
//! use stategate::builder::{StateMachineBuilder, TransitionBuilder};
//! use stategate::core::{Lifecycle, MachineId, StatefulAggregate, Trigger};
//! use stategate::rules::{EvaluationContext, PredicateEvaluator};
//! use stategate::state_enum;
//!
//! state_enum! {
//!     pub enum DoorState {
//!         Open,
//!         Closed,
//!         Locked,
//!     }
//! }
//!
//! struct Door {
//!     lifecycle: Lifecycle<u32, DoorState>,
//!     has_key: bool,
//! }
//!
//! impl StatefulAggregate for Door {
//!     type Id = u32;
//!     type StateId = DoorState;
//!
//!     fn lifecycle(&self) -> &Lifecycle<u32, DoorState> {
//!         &self.lifecycle
//!     }
//!
//!     fn lifecycle_mut(&mut self) -> &mut Lifecycle<u32, DoorState> {
//!         &mut self.lifecycle
//!     }
//! }
//!
//! let machine = StateMachineBuilder::new()
//!     .id("door")
//!     .states(DoorState::all_states())
//!     .transition(TransitionBuilder::new().from(DoorState::Open).to(DoorState::Closed).on("close"))?
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(DoorState::Closed)
//!             .to(DoorState::Locked)
//!             .on("lock")
//!             .when("A key is required.", "has_key"),
//!     )?
//!     .build()?;
//!
//! let evaluator = PredicateEvaluator::new()
//!     .register("has_key", |ctx: &EvaluationContext<'_, Door>| ctx.entity().has_key);
//!
//! let mut door = Door {
//!     lifecycle: Lifecycle::new(7, MachineId::new("door"), DoorState::Open),
//!     has_key: false,
//! };
//!
//! machine.fire(&Trigger::new("close"), &mut door, &evaluator, None)?;
//! assert_eq!(door.state_id(), &DoorState::Closed);
//!
//! let refused = machine.fire(&Trigger::new("lock"), &mut door, &evaluator, None);
//! assert!(refused.is_err());
//! assert_eq!(door.state_id(), &DoorState::Closed);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod machine;
pub mod rules;

// Re-export commonly used types
pub use builder::{StateMachineBuilder, TransitionBuilder};
pub use core::{Lifecycle, MachineId, State, StateHistory, StateId, StatefulAggregate, Trigger};
pub use definition::{DefinitionError, MachineDefinition};
pub use machine::{
    BuildError, CandidatePolicy, GotoPolicy, MachineSettings, StateMachine, Transition,
    TransitionError,
};
pub use rules::{
    ConditionEvaluator, EvaluationContext, EvaluationSettings, PredicateEvaluator, RuleEvaluator,
    TransitionRule,
};
