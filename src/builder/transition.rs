//! Builder for constructing transitions.

use crate::core::{StateId, Trigger};
use crate::machine::{BuildError, Transition};
use crate::rules::TransitionRule;
use uuid::Uuid;

/// Builder for constructing transitions with a fluent API.
///
/// Leaving out `from` (or calling `from_any`) makes a wildcard transition;
/// leaving out `on` makes a goto-only transition.
pub struct TransitionBuilder<Id: StateId> {
    id: Option<String>,
    from: Option<Id>,
    to: Option<Id>,
    trigger: Option<Trigger>,
    rules: Vec<TransitionRule>,
}

impl<Id: StateId> TransitionBuilder<Id> {
    pub fn new() -> Self {
        Self {
            id: None,
            from: None,
            to: None,
            trigger: None,
            rules: Vec::new(),
        }
    }

    /// Set the transition id. A random one is generated otherwise.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn from(mut self, state: Id) -> Self {
        self.from = Some(state);
        self
    }

    /// Apply from every state.
    pub fn from_any(mut self) -> Self {
        self.from = None;
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: Id) -> Self {
        self.to = Some(state);
        self
    }

    /// Require `trigger` to fire this transition.
    pub fn on(mut self, trigger: impl Into<Trigger>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn rule(mut self, rule: TransitionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = TransitionRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Shorthand for `rule(TransitionRule::new(name, expression))`.
    pub fn when(self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.rule(TransitionRule::new(name, expression))
    }

    pub fn build(self) -> Result<Transition<Id>, BuildError> {
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let id = self.id.unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Transition::new(id, self.from, to, self.trigger, self.rules))
    }
}

impl<Id: StateId> Default for TransitionBuilder<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<String>::new()
            .from("placed".to_string())
            .build();

        assert!(matches!(result, Err(BuildError::MissingToState)));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let transition = TransitionBuilder::new()
            .id("placed_to_shipped")
            .from("placed".to_string())
            .to("shipped".to_string())
            .on("MarkAsShipped")
            .when("Order must be paid.", "is_paid")
            .build()
            .unwrap();

        assert_eq!(transition.id(), "placed_to_shipped");
        assert!(transition.starts_from(&"placed".to_string()));
        assert!(transition.can_goto(&"shipped".to_string()));
        assert!(transition.has_trigger(&Trigger::new("MarkAsShipped")));
        assert_eq!(transition.rules().len(), 1);
        assert_eq!(transition.rules()[0].expression(), "is_paid");
    }

    #[test]
    fn defaults_to_wildcard_goto_only_transition() {
        let transition = TransitionBuilder::new()
            .to(3u8)
            .build()
            .unwrap();

        assert!(transition.starts_from_anywhere());
        assert!(transition.has_no_trigger());
        assert!(Uuid::parse_str(transition.id()).is_ok());
    }

    #[test]
    fn from_any_clears_source() {
        let transition = TransitionBuilder::new()
            .from(1u8)
            .from_any()
            .to(2)
            .build()
            .unwrap();

        assert!(transition.starts_from_anywhere());
    }

    #[test]
    fn rules_are_kept_in_order() {
        let transition = TransitionBuilder::new()
            .to(1u8)
            .rules(vec![
                TransitionRule::new("first", "a"),
                TransitionRule::new("second", "b"),
            ])
            .rule(TransitionRule::new("third", "c"))
            .build()
            .unwrap();

        let names: Vec<&str> = transition.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
