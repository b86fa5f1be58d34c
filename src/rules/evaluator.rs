//! The rule evaluation capability.

use crate::rules::context::EvaluationContext;

/// Evaluates a rule expression against a context.
///
/// This is the only seam between the engine and whatever expression
/// technology the application uses: compiled closures
/// ([`PredicateEvaluator`](crate::rules::PredicateEvaluator)), a serialized
/// condition tree ([`ConditionEvaluator`](crate::rules::ConditionEvaluator)),
/// or an embedded scripting engine.
///
/// Evaluation must be pure: the same expression against the same entity
/// state yields the same result. Errors (malformed expressions, unknown
/// references) are propagated to the caller of `fire`/`goto` unchanged.
pub trait RuleEvaluator<E: ?Sized> {
    type Error: std::error::Error + Send + Sync + 'static;

    fn evaluate(
        &self,
        expression: &str,
        context: &EvaluationContext<'_, E>,
    ) -> Result<bool, Self::Error>;
}

impl<E: ?Sized, R: RuleEvaluator<E> + ?Sized> RuleEvaluator<E> for &R {
    type Error = R::Error;

    fn evaluate(
        &self,
        expression: &str,
        context: &EvaluationContext<'_, E>,
    ) -> Result<bool, Self::Error> {
        (**self).evaluate(expression, context)
    }
}
