//! Portable machine definitions.
//!
//! A [`MachineDefinition`] is the plain data behind a [`StateMachine`]:
//! states, transitions (with their rules) and settings. It can be stored as
//! JSON or bincode and turned back into a machine, which re-runs every
//! construction check.

use crate::core::{MachineId, State, StateId};
use crate::machine::{MachineSettings, StateMachine, Transition};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::DefinitionError;

/// Version identifier for definition format
pub const DEFINITION_VERSION: u32 = 1;

/// Serializable description of a state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineDefinition<Id: StateId> {
    /// Definition format version
    pub version: u32,

    pub id: MachineId,

    #[serde(default)]
    pub settings: MachineSettings,

    pub states: Vec<State<Id>>,

    pub transitions: Vec<Transition<Id>>,
}

impl<Id: StateId> MachineDefinition<Id> {
    pub fn new(
        id: impl Into<MachineId>,
        states: Vec<State<Id>>,
        transitions: Vec<Transition<Id>>,
    ) -> Self {
        Self {
            version: DEFINITION_VERSION,
            id: id.into(),
            settings: MachineSettings::default(),
            states,
            transitions,
        }
    }

    pub fn with_settings(mut self, settings: MachineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Capture the definition of an existing machine.
    pub fn from_machine(machine: &StateMachine<Id>) -> Self {
        Self {
            version: DEFINITION_VERSION,
            id: machine.id().clone(),
            settings: *machine.settings(),
            states: machine.states().to_vec(),
            transitions: machine.transitions().to_vec(),
        }
    }

    /// Build the machine, running the same checks as [`StateMachine::with_settings`].
    pub fn into_machine(self) -> Result<StateMachine<Id>, DefinitionError> {
        self.check_version()?;
        let machine =
            StateMachine::with_settings(self.id, self.states, self.transitions, self.settings)?;
        Ok(machine)
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DefinitionError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: Self = serde_json::from_str(json)
            .map_err(|e| DefinitionError::DeserializationFailed(e.to_string()))?;
        definition.check_version()?;
        Ok(definition)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, DefinitionError> {
        bincode::serialize(self).map_err(|e| DefinitionError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, DefinitionError> {
        let definition: Self = bincode::deserialize(bytes)
            .map_err(|e| DefinitionError::DeserializationFailed(e.to_string()))?;
        definition.check_version()?;
        Ok(definition)
    }

    fn check_version(&self) -> Result<(), DefinitionError> {
        if self.version > DEFINITION_VERSION {
            return Err(DefinitionError::UnsupportedVersion {
                found: self.version,
                supported: DEFINITION_VERSION,
            });
        }
        Ok(())
    }
}

impl<Id: StateId> From<&StateMachine<Id>> for MachineDefinition<Id> {
    fn from(machine: &StateMachine<Id>) -> Self {
        Self::from_machine(machine)
    }
}
