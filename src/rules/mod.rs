//! Transition rules and their evaluation.
//!
//! A [`TransitionRule`] is plain data: an id, a name, and an opaque
//! expression. Meaning is supplied by a [`RuleEvaluator`] injected at fire
//! time. Two evaluators ship with the crate:
//!
//! - [`PredicateEvaluator`]: expressions are keys into a registry of Rust
//!   closures
//! - [`ConditionEvaluator`]: expressions are JSON-encoded [`Condition`] trees
//!   evaluated against a serialized snapshot of the entity
//!
//! Rule checks accumulate every failure (see [`check_rules`]) so callers get
//! the full list of violated rules in one pass.
//!
//! # Example
//!
//! ```rust
//! use stategate::rules::{check_rules, EvaluationContext, EvaluationSettings, PredicateEvaluator, TransitionRule};
//!
//! struct Order {
//!     paid: bool,
//! }
//!
//! let evaluator = PredicateEvaluator::new()
//!     .register("is_paid", |ctx: &EvaluationContext<'_, Order>| ctx.entity().paid);
//! let rules = vec![TransitionRule::new("Order must be paid.", "is_paid")];
//!
//! let settings = EvaluationSettings::default();
//! let order = Order { paid: false };
//! let outcome = check_rules(&rules, &evaluator, &EvaluationContext::new(&order, &settings)).unwrap();
//!
//! assert!(outcome.is_failure());
//! ```

pub mod condition;
pub mod context;
pub mod evaluator;
pub mod predicate;
pub mod rule;
pub mod settings;
pub mod violations;

pub use condition::{Comparison, Condition, ConditionError, ConditionEvaluator};
pub use context::EvaluationContext;
pub use evaluator::RuleEvaluator;
pub use predicate::{Predicate, PredicateError, PredicateEvaluator};
pub use rule::TransitionRule;
pub use settings::{EvaluationSettings, DEFAULT_ENTITY_PARAMETER};
pub use violations::{check_rules, RuleEvaluationFailure, RuleViolations};
