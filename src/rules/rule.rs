//! Transition rules: named guard expressions.

use crate::rules::context::EvaluationContext;
use crate::rules::evaluator::RuleEvaluator;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named boolean guard evaluated against an entity before a transition
/// applies.
///
/// The expression is opaque to the engine. Its meaning is defined by
/// whichever [`RuleEvaluator`] the caller injects.
///
/// # Example
///
/// ```rust
/// use stategate::rules::TransitionRule;
///
/// let rule = TransitionRule::new("Order must have items.", "has_items");
/// assert_eq!(rule.name(), "Order must have items.");
/// assert_eq!(rule.expression(), "has_items");
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransitionRule {
    id: Uuid,
    name: String,
    expression: String,
}

impl TransitionRule {
    /// Create a rule with a freshly generated id.
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, expression)
    }

    pub fn with_id(id: Uuid, name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            expression: expression.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluate this rule's expression with the given evaluator.
    ///
    /// Evaluator errors are returned unchanged.
    pub fn evaluate<E, R>(
        &self,
        evaluator: &R,
        context: &EvaluationContext<'_, E>,
    ) -> Result<bool, R::Error>
    where
        E: ?Sized,
        R: RuleEvaluator<E> + ?Sized,
    {
        let passed = evaluator.evaluate(&self.expression, context)?;
        tracing::trace!(rule = %self.name, passed, "Evaluated transition rule");
        Ok(passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{EvaluationSettings, PredicateEvaluator};

    struct Order {
        total: u32,
    }

    #[test]
    fn new_rules_get_distinct_ids() {
        let a = TransitionRule::new("a", "x");
        let b = TransitionRule::new("a", "x");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn with_id_keeps_given_id() {
        let id = Uuid::new_v4();
        let rule = TransitionRule::with_id(id, "name", "expr");
        assert_eq!(rule.id(), id);
    }

    #[test]
    fn evaluate_delegates_to_evaluator() {
        let evaluator = PredicateEvaluator::new()
            .register("positive_total", |ctx: &EvaluationContext<'_, Order>| {
                ctx.entity().total > 0
            });
        let settings = EvaluationSettings::default();
        let rule = TransitionRule::new("Total must be positive", "positive_total");

        let paid = Order { total: 10 };
        let free = Order { total: 0 };

        assert!(rule
            .evaluate(&evaluator, &EvaluationContext::new(&paid, &settings))
            .unwrap());
        assert!(!rule
            .evaluate(&evaluator, &EvaluationContext::new(&free, &settings))
            .unwrap());
    }

    #[test]
    fn rule_serializes_correctly() {
        let rule = TransitionRule::new("Has items", "has_items");
        let json = serde_json::to_string(&rule).unwrap();
        let deserialized: TransitionRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, deserialized);
    }
}
