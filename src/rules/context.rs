//! Context provided to rule evaluators.

use crate::rules::settings::EvaluationSettings;
use serde_json::Value;
use std::collections::BTreeMap;

/// The entity under transition plus the auxiliary named parameters.
///
/// Canonically the parameter set is `{"entity": <the aggregate>}`; settings
/// may rename the entity binding and add further parameters.
#[derive(Debug)]
pub struct EvaluationContext<'a, E: ?Sized> {
    entity: &'a E,
    settings: &'a EvaluationSettings,
}

impl<'a, E: ?Sized> EvaluationContext<'a, E> {
    pub fn new(entity: &'a E, settings: &'a EvaluationSettings) -> Self {
        Self { entity, settings }
    }

    pub fn entity(&self) -> &'a E {
        self.entity
    }

    /// Name the entity is bound to.
    pub fn entity_parameter(&self) -> &'a str {
        &self.settings.entity_parameter
    }

    /// Look up an auxiliary parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&'a Value> {
        self.settings.parameters.get(name)
    }

    pub fn parameters(&self) -> &'a BTreeMap<String, Value> {
        &self.settings.parameters
    }

    pub fn settings(&self) -> &'a EvaluationSettings {
        self.settings
    }
}

impl<E: ?Sized> Clone for EvaluationContext<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: ?Sized> Copy for EvaluationContext<'_, E> {}
