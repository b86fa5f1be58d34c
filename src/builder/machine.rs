//! Builder for constructing state machines.

use crate::builder::transition::TransitionBuilder;
use crate::core::{MachineId, State, StateId};
use crate::machine::{
    BuildError, CandidatePolicy, GotoPolicy, MachineSettings, StateMachine, Transition,
};

/// Builder for constructing state machines with a fluent API.
///
/// All validation happens in [`build`](Self::build), which runs the same
/// checks as [`StateMachine::new`].
pub struct StateMachineBuilder<Id: StateId> {
    id: Option<MachineId>,
    states: Vec<State<Id>>,
    transitions: Vec<Transition<Id>>,
    settings: MachineSettings,
}

impl<Id: StateId> StateMachineBuilder<Id> {
    pub fn new() -> Self {
        Self {
            id: None,
            states: Vec::new(),
            transitions: Vec::new(),
            settings: MachineSettings::default(),
        }
    }

    /// Set the machine id (required).
    pub fn id(mut self, id: impl Into<MachineId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn state(mut self, id: Id, name: impl Into<String>) -> Self {
        self.states.push(State::new(id, name));
        self
    }

    pub fn states(mut self, states: impl IntoIterator<Item = State<Id>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<Id>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<Id>) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn transitions(mut self, transitions: Vec<Transition<Id>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    pub fn settings(mut self, settings: MachineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn candidate_policy(mut self, policy: CandidatePolicy) -> Self {
        self.settings.candidate_policy = policy;
        self
    }

    pub fn goto_policy(mut self, policy: GotoPolicy) -> Self {
        self.settings.goto_policy = policy;
        self
    }

    pub fn build(self) -> Result<StateMachine<Id>, BuildError> {
        let id = self.id.ok_or(BuildError::MissingMachineId)?;
        StateMachine::with_settings(id, self.states, self.transitions, self.settings)
    }
}

impl<Id: StateId> Default for StateMachineBuilder<Id> {
    fn default() -> Self {
        Self::new()
    }
}
