//! Policies controlling how a state machine selects and applies transitions.

use serde::{Deserialize, Serialize};

/// How `fire` treats several transitions matching the same trigger and
/// source state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePolicy {
    /// Construction rejects triggered transitions whose trigger is equal and
    /// whose sources overlap (equal, or either one a wildcard). At most one
    /// transition can match a fired trigger.
    #[default]
    Exclusive,

    /// Every matching transition is checked in stored order; the first one
    /// with failing rules aborts the call, otherwise the last one decides
    /// the target state.
    ///
    /// Candidates are selected from the state the entity is in when the call
    /// starts, and every rule sees that unmodified entity. The state is set
    /// once at the end, so transitions never chain: with `a -> b` and
    /// `b -> c` on the same trigger, an entity in `a` ends in `b`.
    LastPassing,
}

/// How `goto` behaves when no trigger-less transition models the jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GotoPolicy {
    /// Jump anyway, without checking any rules (administrative override).
    #[default]
    Unconditional,

    /// Refuse the jump unless a trigger-less transition to the target exists
    /// from the current state (or from anywhere).
    RequireTransition,
}

/// Machine-level configuration, stored with the machine definition.
///
/// # Example
///
/// ```rust
/// use stategate::machine::{CandidatePolicy, GotoPolicy, MachineSettings};
///
/// let settings: MachineSettings =
///     serde_json::from_str(r#"{ "goto_policy": "require_transition" }"#).unwrap();
///
/// assert_eq!(settings.candidate_policy, CandidatePolicy::Exclusive);
/// assert_eq!(settings.goto_policy, GotoPolicy::RequireTransition);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    pub candidate_policy: CandidatePolicy,
    pub goto_policy: GotoPolicy,
}

impl MachineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate_policy(mut self, policy: CandidatePolicy) -> Self {
        self.candidate_policy = policy;
        self
    }

    pub fn goto_policy(mut self, policy: GotoPolicy) -> Self {
        self.goto_policy = policy;
        self
    }
}
