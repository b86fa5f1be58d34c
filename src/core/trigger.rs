//! Triggers: named events that cause transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named event that can initiate a state transition.
///
/// Triggers are value objects: two triggers with the same name are equal.
/// They serialize as a bare string.
///
/// # Example
///
/// ```rust
/// use stategate::core::Trigger;
///
/// let shipped = Trigger::new("MarkAsShipped");
/// assert_eq!(shipped, Trigger::new("MarkAsShipped"));
/// assert_ne!(shipped, Trigger::new("Cancel"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trigger {
    name: String,
}

impl Trigger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Trigger {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Trigger {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
