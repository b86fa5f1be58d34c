//! Rules expressed as serialized condition trees.
//!
//! A rule expression is a JSON-encoded [`Condition`]. It is evaluated
//! against a JSON snapshot of the context: the entity bound under its
//! parameter name plus every auxiliary parameter. Paths are dotted and may
//! index into arrays:
//!
//! ```json
//! { "all": [
//!     { "gt": { "path": "entity.total", "value": 0 } },
//!     { "exists": "entity.shipping_address" },
//!     { "lte": { "path": "entity.lines.0.qty", "value": 10 } }
//! ] }
//! ```
//!
//! Missing paths resolve to `null`.

use crate::rules::context::EvaluationContext;
use crate::rules::evaluator::RuleEvaluator;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised by [`ConditionEvaluator`].
#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("Malformed condition expression: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Condition could not be encoded: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Entity could not be snapshotted: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("Values at '{path}' cannot be ordered against {value}")]
    NotComparable { path: String, value: Value },
}

/// A path and the literal it is compared with.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Comparison {
    pub path: String,
    pub value: Value,
}

impl Comparison {
    pub fn new(path: impl Into<String>, value: Value) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }
}

/// Boolean expression tree.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Every child holds (true when empty)
    All(Vec<Condition>),
    /// At least one child holds (false when empty)
    Any(Vec<Condition>),
    Not(Box<Condition>),
    Eq(Comparison),
    Ne(Comparison),
    Gt(Comparison),
    Gte(Comparison),
    Lt(Comparison),
    Lte(Comparison),
    /// The path resolves to a non-null value
    Exists(String),
    /// The path resolves to a truthy value: `true`, a non-zero number, or a
    /// non-empty string, array or object
    Truthy(String),
}

impl Condition {
    /// Parse a JSON-encoded condition.
    pub fn parse(expression: &str) -> Result<Self, ConditionError> {
        serde_json::from_str(expression).map_err(ConditionError::Malformed)
    }

    /// Encode this condition as a rule expression.
    pub fn to_expression(&self) -> Result<String, ConditionError> {
        serde_json::to_string(self).map_err(ConditionError::Encoding)
    }

    /// Evaluate against a JSON snapshot.
    pub fn evaluate(&self, snapshot: &Value) -> Result<bool, ConditionError> {
        match self {
            Self::All(children) => {
                for child in children {
                    if !child.evaluate(snapshot)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any(children) => {
                for child in children {
                    if child.evaluate(snapshot)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(child) => Ok(!child.evaluate(snapshot)?),
            Self::Eq(cmp) => Ok(values_equal(resolve(snapshot, &cmp.path), &cmp.value)),
            Self::Ne(cmp) => Ok(!values_equal(resolve(snapshot, &cmp.path), &cmp.value)),
            Self::Gt(cmp) => Ok(order(snapshot, cmp)? == Ordering::Greater),
            Self::Gte(cmp) => Ok(order(snapshot, cmp)? != Ordering::Less),
            Self::Lt(cmp) => Ok(order(snapshot, cmp)? == Ordering::Less),
            Self::Lte(cmp) => Ok(order(snapshot, cmp)? != Ordering::Greater),
            Self::Exists(path) => Ok(!resolve(snapshot, path).is_null()),
            Self::Truthy(path) => Ok(is_truthy(resolve(snapshot, path))),
        }
    }
}

static NULL: Value = Value::Null;

fn resolve<'v>(snapshot: &'v Value, path: &str) -> &'v Value {
    let mut current = snapshot;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return &NULL,
        }
    }
    current
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => compare_numbers(l, r) == Some(Ordering::Equal),
        _ => left == right,
    }
}

/// Integers compare exactly; `f64` is used only when either side is a float.
fn compare_numbers(left: &Number, right: &Number) -> Option<Ordering> {
    fn integer(n: &Number) -> Option<i128> {
        n.as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
    }

    match (integer(left), integer(right)) {
        (Some(l), Some(r)) => Some(l.cmp(&r)),
        _ => left
            .as_f64()
            .zip(right.as_f64())
            .and_then(|(l, r)| l.partial_cmp(&r)),
    }
}

fn order(snapshot: &Value, cmp: &Comparison) -> Result<Ordering, ConditionError> {
    let actual = resolve(snapshot, &cmp.path);
    let ordering = match (actual, &cmp.value) {
        (Value::Number(l), Value::Number(r)) => compare_numbers(l, r),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => None,
    };
    ordering.ok_or_else(|| ConditionError::NotComparable {
        path: cmp.path.clone(),
        value: cmp.value.clone(),
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Evaluates JSON-encoded [`Condition`] expressions.
///
/// The entity must be `Serialize`; it is snapshotted once per rule.
///
/// # Example
///
/// ```rust
/// use stategate::rules::{ConditionEvaluator, EvaluationContext, EvaluationSettings, RuleEvaluator};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Order {
///     total: f64,
/// }
///
/// let settings = EvaluationSettings::default();
/// let order = Order { total: 12.5 };
/// let context = EvaluationContext::new(&order, &settings);
///
/// let positive = r#"{ "gt": { "path": "entity.total", "value": 0 } }"#;
/// assert!(ConditionEvaluator.evaluate(positive, &context).unwrap());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Build the JSON document conditions are evaluated against.
    pub fn snapshot<E>(context: &EvaluationContext<'_, E>) -> Result<Value, ConditionError>
    where
        E: Serialize + ?Sized,
    {
        let mut root = Map::new();
        for (name, value) in context.parameters() {
            root.insert(name.clone(), value.clone());
        }
        let entity = serde_json::to_value(context.entity()).map_err(ConditionError::Snapshot)?;
        root.insert(context.entity_parameter().to_string(), entity);
        Ok(Value::Object(root))
    }
}

impl<E: Serialize + ?Sized> RuleEvaluator<E> for ConditionEvaluator {
    type Error = ConditionError;

    fn evaluate(
        &self,
        expression: &str,
        context: &EvaluationContext<'_, E>,
    ) -> Result<bool, Self::Error> {
        let condition = Condition::parse(expression)?;
        let snapshot = Self::snapshot(context)?;
        condition.evaluate(&snapshot)
    }
}
