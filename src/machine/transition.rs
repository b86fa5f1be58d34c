//! Rule-guarded edges between states.

use crate::core::{StateId, Trigger};
use crate::machine::error::TransitionError;
use crate::rules::{check_rules, EvaluationContext, EvaluationSettings, RuleEvaluator, TransitionRule};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;

/// A potential state change.
///
/// - `from: None` means the transition applies from any state.
/// - `trigger: None` means the transition is only reachable through `goto`.
/// - Every rule must pass for the transition to apply.
///
/// # Example
///
/// ```rust
/// use stategate::core::Trigger;
/// use stategate::machine::Transition;
///
/// let ship = Transition::new(
///     "placed_to_shipped",
///     Some("placed".to_string()),
///     "shipped".to_string(),
///     Some(Trigger::new("MarkAsShipped")),
///     vec![],
/// );
///
/// assert!(ship.starts_from(&"placed".to_string()));
/// assert!(ship.has_trigger(&Trigger::new("MarkAsShipped")));
/// assert!(ship.can_goto(&"shipped".to_string()));
/// assert!(!ship.starts_from_anywhere());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Transition<Id: StateId> {
    id: String,
    from: Option<Id>,
    to: Id,
    trigger: Option<Trigger>,
    rules: Vec<TransitionRule>,
}

impl<Id: StateId> Transition<Id> {
    pub fn new(
        id: impl Into<String>,
        from: Option<Id>,
        to: Id,
        trigger: Option<Trigger>,
        rules: Vec<TransitionRule>,
    ) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            trigger,
            rules,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from(&self) -> Option<&Id> {
        self.from.as_ref()
    }

    pub fn to(&self) -> &Id {
        &self.to
    }

    pub fn trigger(&self) -> Option<&Trigger> {
        self.trigger.as_ref()
    }

    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    /// True for wildcard-source transitions.
    pub fn starts_from_anywhere(&self) -> bool {
        self.from.is_none()
    }

    /// True if the source is exactly `state`. Wildcards do not match.
    pub fn starts_from(&self, state: &Id) -> bool {
        self.from.as_ref() == Some(state)
    }

    /// True if this transition applies when leaving `state`.
    pub fn applies_from(&self, state: &Id) -> bool {
        self.starts_from_anywhere() || self.starts_from(state)
    }

    pub fn has_trigger(&self, trigger: &Trigger) -> bool {
        self.trigger.as_ref() == Some(trigger)
    }

    /// True if this transition is only reachable through `goto`.
    pub fn has_no_trigger(&self) -> bool {
        self.trigger.is_none()
    }

    pub fn can_goto(&self, state: &Id) -> bool {
        self.to == *state
    }

    /// Evaluate every rule against `entity` and fail if any evaluates false.
    ///
    /// The error lists every failing rule, in rule order. Nothing is
    /// mutated; applying the state change is the caller's job.
    pub fn evaluate_and_check_rules<E, R>(
        &self,
        entity: &E,
        evaluator: &R,
        settings: &EvaluationSettings,
    ) -> Result<(), TransitionError>
    where
        E: ?Sized,
        R: RuleEvaluator<E> + ?Sized,
    {
        let context = EvaluationContext::new(entity, settings);
        let outcome = check_rules(&self.rules, evaluator, &context).map_err(|failure| {
            TransitionError::Evaluation {
                transition: self.id.clone(),
                rule: failure.rule,
                source: Box::new(failure.source),
            }
        })?;

        match outcome {
            Validation::Success(_) => Ok(()),
            Validation::Failure(names) => Err(TransitionError::RulesFailed {
                transition: self.id.clone(),
                rules: names.iter().cloned().collect(),
            }),
        }
    }
}
