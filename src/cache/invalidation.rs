//! Invalidation Policy Module
//!
//! Declares which namespaces become stale when another namespace is written.

use std::collections::HashMap;

use crate::cache::{DISTANCE_NAMESPACE, HISTORY_NAMESPACE};

// == Invalidation Policy ==
/// Table of "a write to X clears Y" rules.
///
/// Rules are one-directional and always clear the whole dependent namespace;
/// there is no per-key tracking of staleness.
#[derive(Debug, Clone, Default)]
pub struct InvalidationPolicy {
    dependents: HashMap<String, Vec<String>>,
}

impl InvalidationPolicy {
    /// Creates a policy with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a rule: every write to `written` clears `dependent`.
    ///
    /// Self-dependencies and duplicate rules are ignored.
    pub fn with_rule(mut self, written: &str, dependent: &str) -> Self {
        if written == dependent {
            return self;
        }
        let targets = self.dependents.entry(written.to_string()).or_default();
        if !targets.iter().any(|t| t == dependent) {
            targets.push(dependent.to_string());
        }
        self
    }

    /// Namespaces to clear after a write to `written`.
    pub fn dependents_of(&self, written: &str) -> &[String] {
        self.dependents
            .get(written)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// New distance results change every history page, so they clear history.
    pub fn distance_history() -> Self {
        Self::empty().with_rule(DISTANCE_NAMESPACE, HISTORY_NAMESPACE)
    }
}
