//! Rules backed by compiled predicate closures.
//!
//! The expression string of a rule is used as a key into a registry of pure
//! predicates. This is the natural choice when rules are authored in Rust
//! alongside the aggregate.

use crate::rules::context::EvaluationContext;
use crate::rules::evaluator::RuleEvaluator;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors raised by [`PredicateEvaluator`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredicateError {
    #[error("No predicate registered for expression '{expression}'")]
    UnknownExpression { expression: String },
}

/// Pure predicate over an evaluation context.
///
/// # Example
///
/// ```rust
/// use stategate::rules::{EvaluationContext, EvaluationSettings, Predicate};
///
/// struct Parcel {
///     weight: u32,
/// }
///
/// let light = Predicate::new(|ctx: &EvaluationContext<'_, Parcel>| ctx.entity().weight < 30);
/// let settings = EvaluationSettings::default();
///
/// assert!(light.check(&EvaluationContext::new(&Parcel { weight: 5 }, &settings)));
/// assert!(!light.check(&EvaluationContext::new(&Parcel { weight: 50 }, &settings)));
/// ```
pub struct Predicate<E: ?Sized> {
    check: Box<dyn Fn(&EvaluationContext<'_, E>) -> bool + Send + Sync>,
}

impl<E: ?Sized> Predicate<E> {
    /// Create a predicate from a pure function.
    ///
    /// The function must be deterministic and must not mutate anything.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&EvaluationContext<'_, E>) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Box::new(check),
        }
    }

    pub fn check(&self, context: &EvaluationContext<'_, E>) -> bool {
        (self.check)(context)
    }
}

impl<E: ?Sized> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

/// Registry of named predicates, keyed by rule expression.
///
/// # Example
///
/// ```rust
/// use stategate::rules::{EvaluationContext, EvaluationSettings, PredicateEvaluator, RuleEvaluator};
///
/// struct Order {
///     items: Vec<String>,
/// }
///
/// let evaluator = PredicateEvaluator::new()
///     .register("has_items", |ctx: &EvaluationContext<'_, Order>| !ctx.entity().items.is_empty());
///
/// let settings = EvaluationSettings::default();
/// let order = Order { items: vec!["book".to_string()] };
/// let context = EvaluationContext::new(&order, &settings);
///
/// assert_eq!(evaluator.evaluate("has_items", &context), Ok(true));
/// assert!(evaluator.evaluate("is_paid", &context).is_err());
/// ```
pub struct PredicateEvaluator<E: ?Sized> {
    predicates: HashMap<String, Predicate<E>>,
}

impl<E: ?Sized> PredicateEvaluator<E> {
    pub fn new() -> Self {
        Self {
            predicates: HashMap::new(),
        }
    }

    /// Register a predicate under `expression`, replacing any previous one.
    pub fn register<F>(mut self, expression: impl Into<String>, check: F) -> Self
    where
        F: Fn(&EvaluationContext<'_, E>) -> bool + Send + Sync + 'static,
    {
        self.predicates
            .insert(expression.into(), Predicate::new(check));
        self
    }

    pub fn contains(&self, expression: &str) -> bool {
        self.predicates.contains_key(expression)
    }
}

impl<E: ?Sized> Default for PredicateEvaluator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> fmt::Debug for PredicateEvaluator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&String> = self.predicates.keys().collect();
        keys.sort();
        f.debug_struct("PredicateEvaluator")
            .field("expressions", &keys)
            .finish()
    }
}

impl<E: ?Sized> RuleEvaluator<E> for PredicateEvaluator<E> {
    type Error = PredicateError;

    fn evaluate(
        &self,
        expression: &str,
        context: &EvaluationContext<'_, E>,
    ) -> Result<bool, Self::Error> {
        self.predicates
            .get(expression)
            .map(|predicate| predicate.check(context))
            .ok_or_else(|| PredicateError::UnknownExpression {
                expression: expression.to_string(),
            })
    }
}
