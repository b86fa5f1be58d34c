//! Errors raised while building state machines and while applying
//! transitions.

use thiserror::Error;

/// Boxed evaluator error, carried unchanged as the error source.
pub type EvaluatorError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur when constructing state machines and transitions.
///
/// A machine that fails any of these checks is never returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("State machine id not specified. Call .id(id) before .build()")]
    MissingMachineId,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("State '{state}' is defined more than once")]
    DuplicateState { state: String },

    #[error("Transitions contain some invalid states: {}", .states.join(", "))]
    InvalidStates { states: Vec<String> },

    #[error(
        "Transitions '{first}' and '{second}' both respond to trigger '{trigger}' from overlapping states"
    )]
    AmbiguousTransitions {
        trigger: String,
        first: String,
        second: String,
    },
}

/// Errors that can occur while firing a trigger or jumping to a state.
///
/// The entity's state is unchanged whenever one of these is returned.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Transition '{transition}' blocked by failing rules: {}", .rules.join(", "))]
    RulesFailed {
        transition: String,
        rules: Vec<String>,
    },

    #[error("Rule '{rule}' of transition '{transition}' could not be evaluated")]
    Evaluation {
        transition: String,
        rule: String,
        #[source]
        source: EvaluatorError,
    },

    #[error("No transition allows going from '{from}' to '{to}'")]
    NoGotoTransition { from: String, to: String },
}

impl TransitionError {
    /// Names of the failing rules, if this is a rule violation.
    pub fn failing_rules(&self) -> Option<&[String]> {
        match self {
            Self::RulesFailed { rules, .. } => Some(rules),
            _ => None,
        }
    }
}
