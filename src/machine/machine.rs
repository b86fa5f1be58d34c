//! The state machine: construction-time validation plus the `fire` and
//! `goto` algorithms.

use crate::core::{ChangeCause, MachineId, State, StateId, StatefulAggregate, Trigger};
use crate::machine::error::{BuildError, TransitionError};
use crate::machine::settings::{CandidatePolicy, GotoPolicy, MachineSettings};
use crate::machine::transition::Transition;
use crate::rules::{EvaluationSettings, RuleEvaluator};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A validated set of states and the transitions between them.
///
/// A `StateMachine` is immutable once built. `fire` and `goto` read it and
/// mutate only the entity passed in, so one machine can be shared (e.g. in an
/// `Arc`) by many threads driving different entities.
#[derive(Clone, Debug)]
pub struct StateMachine<Id: StateId> {
    id: MachineId,
    states: Vec<State<Id>>,
    transitions: Vec<Transition<Id>>,
    settings: MachineSettings,
}

impl<Id: StateId> StateMachine<Id> {
    /// Build a machine with default settings.
    ///
    /// Fails if a state is defined twice, if any transition references a
    /// state id that is not in `states`, or if triggered transitions overlap
    /// (see [`CandidatePolicy::Exclusive`]).
    pub fn new(
        id: impl Into<MachineId>,
        states: Vec<State<Id>>,
        transitions: Vec<Transition<Id>>,
    ) -> Result<Self, BuildError> {
        Self::with_settings(id, states, transitions, MachineSettings::default())
    }

    pub fn with_settings(
        id: impl Into<MachineId>,
        states: Vec<State<Id>>,
        transitions: Vec<Transition<Id>>,
        settings: MachineSettings,
    ) -> Result<Self, BuildError> {
        let valid = state_ids(&states)?;

        let invalid = invalid_states(&valid, &transitions);
        if !invalid.is_empty() {
            return Err(BuildError::InvalidStates {
                states: invalid.iter().map(ToString::to_string).collect(),
            });
        }

        if settings.candidate_policy == CandidatePolicy::Exclusive {
            check_exclusive(&transitions)?;
        }

        Ok(Self {
            id: id.into(),
            states,
            transitions,
            settings,
        })
    }

    pub fn id(&self) -> &MachineId {
        &self.id
    }

    pub fn states(&self) -> &[State<Id>] {
        &self.states
    }

    pub fn state(&self, id: &Id) -> Option<&State<Id>> {
        self.states.iter().find(|s| s.id() == id)
    }

    pub fn contains_state(&self, id: &Id) -> bool {
        self.state(id).is_some()
    }

    /// Transitions in stored order.
    pub fn transitions(&self) -> &[Transition<Id>] {
        &self.transitions
    }

    pub fn settings(&self) -> &MachineSettings {
        &self.settings
    }

    /// Transitions that apply when leaving `state`, wildcards included.
    pub fn transitions_from<'a>(&'a self, state: &'a Id) -> impl Iterator<Item = &'a Transition<Id>> {
        self.transitions
            .iter()
            .filter(move |t| t.applies_from(state))
    }

    /// Distinct triggers that could fire from `state`, in stored order.
    ///
    /// Rules are not evaluated; a listed trigger may still be rejected.
    pub fn permitted_triggers(&self, state: &Id) -> Vec<&Trigger> {
        let mut triggers: Vec<&Trigger> = Vec::new();
        let available = self
            .transitions
            .iter()
            .filter(|t| t.applies_from(state))
            .filter_map(|t| t.trigger());
        for trigger in available {
            if !triggers.contains(&trigger) {
                triggers.push(trigger);
            }
        }
        triggers
    }

    /// Fire `trigger` on `entity`.
    ///
    /// Candidates are the transitions carrying `trigger` whose source is the
    /// entity's current state or a wildcard. Each candidate's rules are
    /// checked against the unmodified entity, in stored order; the first
    /// failure aborts the call with the entity untouched. When every
    /// candidate passes, the entity moves to the target of the last one.
    ///
    /// If nothing matches, the call is a no-op and succeeds: triggers that do
    /// not concern this machine's current state are ignored.
    pub fn fire<A, R>(
        &self,
        trigger: &Trigger,
        entity: &mut A,
        evaluator: &R,
        settings: Option<&EvaluationSettings>,
    ) -> Result<(), TransitionError>
    where
        A: StatefulAggregate<StateId = Id>,
        R: RuleEvaluator<A> + ?Sized,
    {
        let default_settings = EvaluationSettings::default();
        let settings = settings.unwrap_or(&default_settings);
        let current = entity.state_id().clone();

        let mut target: Option<&Transition<Id>> = None;
        for transition in self
            .transitions
            .iter()
            .filter(|t| t.has_trigger(trigger) && t.applies_from(&current))
        {
            transition.evaluate_and_check_rules(&*entity, evaluator, settings)?;
            target = Some(transition);
        }

        let Some(transition) = target else {
            debug!(
                machine = %self.id,
                trigger = %trigger,
                state = %current,
                "No transition matches trigger; ignoring"
            );
            return Ok(());
        };

        debug!(
            machine = %self.id,
            transition = transition.id(),
            trigger = %trigger,
            from = %current,
            to = %transition.to(),
            "Applying fired transition"
        );
        entity
            .lifecycle_mut()
            .apply(transition.to().clone(), ChangeCause::Fired(trigger.clone()));
        Ok(())
    }

    /// Move `entity` directly to `target`.
    ///
    /// Candidates are the trigger-less transitions into `target` whose source
    /// is the current state or a wildcard; all of their rules must pass. With
    /// [`GotoPolicy::Unconditional`] the jump happens even when there is no
    /// candidate at all, without any rule check. With
    /// [`GotoPolicy::RequireTransition`] that case is an error.
    pub fn goto<A, R>(
        &self,
        target: &Id,
        entity: &mut A,
        evaluator: &R,
        settings: Option<&EvaluationSettings>,
    ) -> Result<(), TransitionError>
    where
        A: StatefulAggregate<StateId = Id>,
        R: RuleEvaluator<A> + ?Sized,
    {
        let default_settings = EvaluationSettings::default();
        let settings = settings.unwrap_or(&default_settings);
        let current = entity.state_id().clone();

        let mut candidates = 0usize;
        for transition in self.transitions.iter().filter(|t| {
            t.can_goto(target) && t.has_no_trigger() && t.applies_from(&current)
        }) {
            transition.evaluate_and_check_rules(&*entity, evaluator, settings)?;
            candidates += 1;
        }

        if candidates == 0 {
            match self.settings.goto_policy {
                GotoPolicy::Unconditional => {
                    warn!(
                        machine = %self.id,
                        from = %current,
                        to = %target,
                        "No transition models this jump; applying goto without rule checks"
                    );
                }
                GotoPolicy::RequireTransition => {
                    return Err(TransitionError::NoGotoTransition {
                        from: current.to_string(),
                        to: target.to_string(),
                    });
                }
            }
        } else {
            debug!(
                machine = %self.id,
                from = %current,
                to = %target,
                candidates,
                "Applying goto"
            );
        }

        entity
            .lifecycle_mut()
            .apply(target.clone(), ChangeCause::Goto);
        Ok(())
    }
}

fn state_ids<Id: StateId>(states: &[State<Id>]) -> Result<HashSet<&Id>, BuildError> {
    let mut ids = HashSet::with_capacity(states.len());
    for state in states {
        if !ids.insert(state.id()) {
            return Err(BuildError::DuplicateState {
                state: state.id().to_string(),
            });
        }
    }
    Ok(ids)
}

/// Referenced ids missing from `valid`, deduplicated in discovery order
/// (each transition's target, then its source).
fn invalid_states<'a, Id: StateId>(
    valid: &HashSet<&Id>,
    transitions: &'a [Transition<Id>],
) -> Vec<&'a Id> {
    let mut invalid: Vec<&Id> = Vec::new();
    let referenced = transitions
        .iter()
        .flat_map(|t| std::iter::once(t.to()).chain(t.from()));
    for id in referenced {
        if !valid.contains(id) && !invalid.contains(&id) {
            invalid.push(id);
        }
    }
    invalid
}

fn check_exclusive<Id: StateId>(transitions: &[Transition<Id>]) -> Result<(), BuildError> {
    let triggered: Vec<&Transition<Id>> =
        transitions.iter().filter(|t| !t.has_no_trigger()).collect();

    for (i, first) in triggered.iter().enumerate() {
        for second in &triggered[i + 1..] {
            let same_trigger = first.trigger() == second.trigger();
            let overlapping = match (first.from(), second.from()) {
                (None, _) | (_, None) => true,
                (Some(a), Some(b)) => a == b,
            };
            if same_trigger && overlapping {
                return Err(BuildError::AmbiguousTransitions {
                    trigger: first
                        .trigger()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                    first: first.id().to_string(),
                    second: second.id().to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Lifecycle;
    use crate::rules::{EvaluationContext, PredicateError, PredicateEvaluator, TransitionRule};
    use pretty_assertions::assert_eq;

    struct Order {
        lifecycle: Lifecycle<u32, String>,
        paid: bool,
    }

    impl Order {
        fn at(state: &str) -> Self {
            Self {
                lifecycle: Lifecycle::new(1, MachineId::new("orders"), state.to_string()),
                paid: true,
            }
        }
    }

    impl StatefulAggregate for Order {
        type Id = u32;
        type StateId = String;

        fn lifecycle(&self) -> &Lifecycle<u32, String> {
            &self.lifecycle
        }

        fn lifecycle_mut(&mut self) -> &mut Lifecycle<u32, String> {
            &mut self.lifecycle
        }
    }

    fn states(ids: &[&str]) -> Vec<State<String>> {
        ids.iter().map(|id| State::new(id.to_string(), *id)).collect()
    }

    fn triggered(id: &str, from: Option<&str>, to: &str, trigger: &str) -> Transition<String> {
        Transition::new(
            id,
            from.map(str::to_string),
            to.to_string(),
            Some(Trigger::new(trigger)),
            vec![],
        )
    }

    fn evaluator() -> PredicateEvaluator<Order> {
        PredicateEvaluator::new()
            .register("is_paid", |ctx: &EvaluationContext<'_, Order>| {
                ctx.entity().paid
            })
            .register("never", |_: &EvaluationContext<'_, Order>| false)
    }

    #[test]
    fn construction_reports_every_dangling_id_once_in_discovery_order() {
        let result = StateMachine::new(
            "orders",
            states(&["placed"]),
            vec![
                triggered("a", Some("placed"), "lost", "x"),
                triggered("b", Some("ghost"), "lost", "y"),
                triggered("c", None, "ghost", "z"),
            ],
        );

        assert_eq!(
            result.unwrap_err(),
            BuildError::InvalidStates {
                states: vec!["lost".to_string(), "ghost".to_string()]
            }
        );
    }

    #[test]
    fn construction_rejects_duplicate_states() {
        let result: Result<StateMachine<String>, _> =
            StateMachine::new("orders", states(&["placed", "placed"]), vec![]);

        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateState {
                state: "placed".to_string()
            }
        );
    }

    #[test]
    fn exclusive_policy_rejects_overlapping_triggers() {
        let result = StateMachine::new(
            "orders",
            states(&["placed", "shipped", "cancelled"]),
            vec![
                triggered("ship", Some("placed"), "shipped", "go"),
                triggered("cancel", None, "cancelled", "go"),
            ],
        );

        assert!(matches!(
            result,
            Err(BuildError::AmbiguousTransitions { ref first, ref second, .. })
                if first == "ship" && second == "cancel"
        ));
    }

    #[test]
    fn exclusive_policy_allows_same_trigger_from_distinct_states() {
        let machine = StateMachine::new(
            "orders",
            states(&["a", "b", "c"]),
            vec![
                triggered("a_b", Some("a"), "b", "next"),
                triggered("b_c", Some("b"), "c", "next"),
            ],
        );

        assert!(machine.is_ok());
    }

    #[test]
    fn fire_moves_entity_and_records_history() {
        let machine = StateMachine::new(
            "orders",
            states(&["placed", "shipped"]),
            vec![triggered("ship", Some("placed"), "shipped", "MarkAsShipped")],
        )
        .unwrap();
        let mut order = Order::at("placed");

        machine
            .fire(&Trigger::new("MarkAsShipped"), &mut order, &evaluator(), None)
            .unwrap();

        assert_eq!(order.state_id(), "shipped");
        let change = order.lifecycle().history().last().unwrap();
        assert_eq!(
            change.cause,
            ChangeCause::Fired(Trigger::new("MarkAsShipped"))
        );
    }

    #[test]
    fn fire_does_not_chain_through_the_new_state() {
        let machine = StateMachine::new(
            "steps",
            states(&["a", "b", "c"]),
            vec![
                triggered("a_b", Some("a"), "b", "next"),
                triggered("b_c", Some("b"), "c", "next"),
            ],
        )
        .unwrap();
        let mut order = Order::at("a");

        machine
            .fire(&Trigger::new("next"), &mut order, &evaluator(), None)
            .unwrap();

        assert_eq!(order.state_id(), "b");
    }

    #[test]
    fn fire_without_candidates_is_a_no_op() {
        let machine = StateMachine::new(
            "orders",
            states(&["placed", "shipped"]),
            vec![triggered("ship", Some("placed"), "shipped", "MarkAsShipped")],
        )
        .unwrap();
        let mut order = Order::at("shipped");

        let result = machine.fire(&Trigger::new("MarkAsShipped"), &mut order, &evaluator(), None);

        assert!(result.is_ok());
        assert_eq!(order.state_id(), "shipped");
        assert!(order.lifecycle().history().is_empty());
    }

    #[test]
    fn last_passing_policy_applies_last_candidate() {
        let machine = StateMachine::with_settings(
            "orders",
            states(&["placed", "shipped", "archived"]),
            vec![
                triggered("ship", Some("placed"), "shipped", "go"),
                triggered("archive", None, "archived", "go"),
            ],
            MachineSettings::new().candidate_policy(CandidatePolicy::LastPassing),
        )
        .unwrap();
        let mut order = Order::at("placed");

        machine
            .fire(&Trigger::new("go"), &mut order, &evaluator(), None)
            .unwrap();

        assert_eq!(order.state_id(), "archived");
        assert_eq!(order.lifecycle().history().changes().len(), 1);
    }

    #[test]
    fn last_passing_policy_fails_fast_without_mutation() {
        let machine = StateMachine::with_settings(
            "orders",
            states(&["placed", "shipped", "archived"]),
            vec![
                triggered("ship", Some("placed"), "shipped", "go"),
                Transition::new(
                    "archive",
                    None,
                    "archived".to_string(),
                    Some(Trigger::new("go")),
                    vec![TransitionRule::new("Never allowed.", "never")],
                ),
            ],
            MachineSettings::new().candidate_policy(CandidatePolicy::LastPassing),
        )
        .unwrap();
        let mut order = Order::at("placed");

        let error = machine
            .fire(&Trigger::new("go"), &mut order, &evaluator(), None)
            .unwrap_err();

        assert_eq!(error.failing_rules(), Some(&["Never allowed".to_string()][..]));
        assert_eq!(order.state_id(), "placed");
    }

    #[test]
    fn last_passing_policy_does_not_chain() {
        let machine = StateMachine::with_settings(
            "steps",
            states(&["a", "b", "c"]),
            vec![
                triggered("a_b", Some("a"), "b", "go"),
                triggered("b_c", Some("b"), "c", "go"),
            ],
            MachineSettings::new().candidate_policy(CandidatePolicy::LastPassing),
        )
        .unwrap();
        let mut entity = Order::at("a");

        machine
            .fire(&Trigger::new("go"), &mut entity, &evaluator(), None)
            .unwrap();

        assert_eq!(entity.state_id(), "b");
        assert_eq!(entity.lifecycle().history().get_path(), vec!["a", "b"]);
    }

    #[test]
    fn goto_bypasses_when_no_transition_targets_state() {
        let machine: StateMachine<String> =
            StateMachine::new("orders", states(&["placed", "cancelled"]), vec![]).unwrap();
        let mut order = Order::at("placed");

        machine
            .goto(&"cancelled".to_string(), &mut order, &evaluator(), None)
            .unwrap();

        assert_eq!(order.state_id(), "cancelled");
        assert_eq!(
            order.lifecycle().history().last().unwrap().cause,
            ChangeCause::Goto
        );
    }

    #[test]
    fn goto_checks_rules_of_matching_trigger_less_transitions() {
        let machine = StateMachine::new(
            "orders",
            states(&["placed", "refunded"]),
            vec![Transition::new(
                "refund",
                Some("placed".to_string()),
                "refunded".to_string(),
                None,
                vec![TransitionRule::new("Order must be paid.", "is_paid")],
            )],
        )
        .unwrap();
        let mut order = Order::at("placed");
        order.paid = false;

        let error = machine
            .goto(&"refunded".to_string(), &mut order, &evaluator(), None)
            .unwrap_err();

        assert!(matches!(error, TransitionError::RulesFailed { .. }));
        assert_eq!(order.state_id(), "placed");

        order.paid = true;
        machine
            .goto(&"refunded".to_string(), &mut order, &evaluator(), None)
            .unwrap();
        assert_eq!(order.state_id(), "refunded");
    }

    #[test]
    fn goto_surfaces_evaluator_errors_without_mutation() {
        let machine = StateMachine::new(
            "orders",
            states(&["placed", "refunded"]),
            vec![Transition::new(
                "refund",
                Some("placed".to_string()),
                "refunded".to_string(),
                None,
                vec![TransitionRule::new("Unregistered", "not_registered")],
            )],
        )
        .unwrap();
        let mut order = Order::at("placed");

        let error = machine
            .goto(&"refunded".to_string(), &mut order, &evaluator(), None)
            .unwrap_err();

        match &error {
            TransitionError::Evaluation {
                transition,
                rule,
                source,
            } => {
                assert_eq!(transition, "refund");
                assert_eq!(rule, "Unregistered");
                assert_eq!(
                    source.downcast_ref::<PredicateError>(),
                    Some(&PredicateError::UnknownExpression {
                        expression: "not_registered".to_string()
                    })
                );
            }
            other => panic!("Expected Evaluation, got {other:?}"),
        }
        assert_eq!(order.state_id(), "placed");
        assert!(order.lifecycle().history().is_empty());
    }

    #[test]
    fn goto_checks_wildcard_trigger_less_transitions() {
        let machine = StateMachine::new(
            "orders",
            states(&["placed", "shipped", "cancelled"]),
            vec![Transition::new(
                "cancel",
                None,
                "cancelled".to_string(),
                None,
                vec![TransitionRule::new("Cancellation is never allowed.", "never")],
            )],
        )
        .unwrap();
        let mut order = Order::at("shipped");

        let error = machine
            .goto(&"cancelled".to_string(), &mut order, &evaluator(), None)
            .unwrap_err();

        match &error {
            TransitionError::RulesFailed { transition, rules } => {
                assert_eq!(transition, "cancel");
                assert_eq!(rules, &vec!["Cancellation is never allowed".to_string()]);
            }
            other => panic!("Expected RulesFailed, got {other:?}"),
        }
        assert_eq!(order.state_id(), "shipped");
        assert!(order.lifecycle().history().is_empty());
    }

    #[test]
    fn goto_ignores_triggered_transitions() {
        let machine = StateMachine::new(
            "orders",
            states(&["placed", "shipped"]),
            vec![Transition::new(
                "ship",
                Some("placed".to_string()),
                "shipped".to_string(),
                Some(Trigger::new("ship")),
                vec![TransitionRule::new("Never", "never")],
            )],
        )
        .unwrap();
        let mut order = Order::at("placed");

        machine
            .goto(&"shipped".to_string(), &mut order, &evaluator(), None)
            .unwrap();

        assert_eq!(order.state_id(), "shipped");
    }

    #[test]
    fn require_transition_policy_rejects_unmodelled_goto() {
        let machine: StateMachine<String> = StateMachine::with_settings(
            "orders",
            states(&["placed", "cancelled"]),
            vec![],
            MachineSettings::new().goto_policy(GotoPolicy::RequireTransition),
        )
        .unwrap();
        let mut order = Order::at("placed");

        let error = machine
            .goto(&"cancelled".to_string(), &mut order, &evaluator(), None)
            .unwrap_err();

        assert!(matches!(error, TransitionError::NoGotoTransition { .. }));
        assert_eq!(order.state_id(), "placed");
    }

    #[test]
    fn permitted_triggers_lists_distinct_triggers_from_state() {
        let machine = StateMachine::with_settings(
            "orders",
            states(&["placed", "shipped", "cancelled"]),
            vec![
                triggered("ship", Some("placed"), "shipped", "ship"),
                triggered("cancel", None, "cancelled", "cancel"),
                triggered("cancel_again", Some("placed"), "cancelled", "cancel"),
                Transition::new("reset", None, "placed".to_string(), None, vec![]),
            ],
            MachineSettings::new().candidate_policy(CandidatePolicy::LastPassing),
        )
        .unwrap();

        let from_placed: Vec<&str> = machine
            .permitted_triggers(&"placed".to_string())
            .into_iter()
            .map(Trigger::name)
            .collect();
        let from_shipped: Vec<&str> = machine
            .permitted_triggers(&"shipped".to_string())
            .into_iter()
            .map(Trigger::name)
            .collect();

        assert_eq!(from_placed, vec!["ship", "cancel"]);
        assert_eq!(from_shipped, vec!["cancel"]);
    }

    #[test]
    fn transitions_from_includes_wildcards() {
        let machine = StateMachine::new(
            "orders",
            states(&["placed", "shipped", "cancelled"]),
            vec![
                triggered("ship", Some("placed"), "shipped", "ship"),
                triggered("cancel", None, "cancelled", "cancel"),
            ],
        )
        .unwrap();
        let shipped = "shipped".to_string();

        let ids: Vec<&str> = machine.transitions_from(&shipped).map(Transition::id).collect();

        assert_eq!(ids, vec!["cancel"]);
    }

    #[test]
    fn state_lookup_by_id() {
        let machine: StateMachine<String> =
            StateMachine::new("orders", states(&["placed"]), vec![]).unwrap();

        assert_eq!(machine.id().as_str(), "orders");
        assert!(machine.contains_state(&"placed".to_string()));
        assert!(!machine.contains_state(&"shipped".to_string()));
        assert_eq!(machine.state(&"placed".to_string()).map(State::name), Some("placed"));
    }
}
