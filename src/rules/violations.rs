//! Accumulating rule checks.
//!
//! Every rule of a transition is evaluated and every failing rule is
//! reported, instead of stopping at the first broken one.

use crate::rules::context::EvaluationContext;
use crate::rules::evaluator::RuleEvaluator;
use crate::rules::rule::TransitionRule;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Names of the rules that evaluated to false, in rule order.
pub type RuleViolations = NonEmptyVec<String>;

/// A rule whose evaluation errored, with the evaluator's error untouched.
#[derive(Debug)]
pub struct RuleEvaluationFailure<Err> {
    pub rule: String,
    pub source: Err,
}

/// Evaluate all `rules`, accumulating the names of the failing ones.
///
/// Returns `Ok(Validation::Success(()))` when every rule passes and
/// `Ok(Validation::Failure(names))` otherwise. Names are reported with any
/// trailing period stripped. An evaluator error aborts immediately and is
/// returned as-is, tagged with the rule's name.
pub fn check_rules<E, R>(
    rules: &[TransitionRule],
    evaluator: &R,
    context: &EvaluationContext<'_, E>,
) -> Result<Validation<(), RuleViolations>, RuleEvaluationFailure<R::Error>>
where
    E: ?Sized,
    R: RuleEvaluator<E> + ?Sized,
{
    let mut checks: Vec<Validation<(), RuleViolations>> = Vec::with_capacity(rules.len());

    for rule in rules {
        let passed =
            rule.evaluate(evaluator, context)
                .map_err(|source| RuleEvaluationFailure {
                    rule: rule.name().to_string(),
                    source,
                })?;
        let check = if passed {
            Validation::success(())
        } else {
            Validation::fail(display_name(rule.name()))
        };
        checks.push(check);
    }

    Ok(Validation::all_vec(checks).map(|_| ()))
}

/// Rule name as shown in violation messages.
pub fn display_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}
