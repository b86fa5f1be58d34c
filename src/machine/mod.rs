//! The transition engine.
//!
//! - [`Transition`]: a rule-guarded edge, optionally triggered
//! - [`StateMachine`]: validated states and transitions, with `fire` and `goto`
//! - [`MachineSettings`]: candidate and goto policies
//!
//! # Example
//!
//! ```rust
//! use stategate::core::{Lifecycle, MachineId, State, StatefulAggregate, Trigger};
//! use stategate::machine::{StateMachine, Transition};
//! use stategate::rules::PredicateEvaluator;
//!
//! struct Order {
//!     lifecycle: Lifecycle<u64, String>,
//! }
//!
//! impl StatefulAggregate for Order {
//!     type Id = u64;
//!     type StateId = String;
//!
//!     fn lifecycle(&self) -> &Lifecycle<u64, String> {
//!         &self.lifecycle
//!     }
//!
//!     fn lifecycle_mut(&mut self) -> &mut Lifecycle<u64, String> {
//!         &mut self.lifecycle
//!     }
//! }
//!
//! let machine = StateMachine::new(
//!     "orders",
//!     vec![
//!         State::new("placed".to_string(), "Placed"),
//!         State::new("shipped".to_string(), "Shipped"),
//!     ],
//!     vec![Transition::new(
//!         "placed_to_shipped",
//!         Some("placed".to_string()),
//!         "shipped".to_string(),
//!         Some(Trigger::new("MarkAsShipped")),
//!         vec![],
//!     )],
//! )
//! .unwrap();
//!
//! let mut order = Order {
//!     lifecycle: Lifecycle::new(1, MachineId::new("orders"), "placed".to_string()),
//! };
//! let evaluator = PredicateEvaluator::<Order>::new();
//!
//! machine
//!     .fire(&Trigger::new("MarkAsShipped"), &mut order, &evaluator, None)
//!     .unwrap();
//! assert_eq!(order.state_id(), "shipped");
//! ```

mod error;
#[allow(clippy::module_inception)]
mod machine;
mod settings;
mod transition;

pub use error::{BuildError, EvaluatorError, TransitionError};
pub use machine::StateMachine;
pub use settings::{CandidatePolicy, GotoPolicy, MachineSettings};
pub use transition::Transition;
