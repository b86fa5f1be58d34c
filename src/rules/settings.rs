//! Rule evaluation settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Parameter name the entity is exposed under when none is configured.
pub const DEFAULT_ENTITY_PARAMETER: &str = "entity";

/// Configuration handed through to rule evaluators.
///
/// The engine itself never interprets these values beyond building the
/// [`EvaluationContext`](crate::rules::EvaluationContext).
///
/// # Example
///
/// ```rust
/// use stategate::rules::EvaluationSettings;
/// use serde_json::json;
///
/// let settings: EvaluationSettings = serde_json::from_value(json!({
///     "parameters": { "max_weight": 30 }
/// }))
/// .unwrap();
///
/// assert_eq!(settings.entity_parameter, "entity");
/// assert_eq!(settings.parameters["max_weight"], json!(30));
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Name the entity is bound to inside rule expressions
    pub entity_parameter: String,

    /// Auxiliary named parameters visible to rule expressions
    pub parameters: BTreeMap<String, Value>,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            entity_parameter: DEFAULT_ENTITY_PARAMETER.to_string(),
            parameters: BTreeMap::new(),
        }
    }
}

impl EvaluationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an auxiliary parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Bind the entity under a different parameter name.
    pub fn with_entity_parameter(mut self, name: impl Into<String>) -> Self {
        self.entity_parameter = name.into();
        self
    }
}
