//! Strategy collections and the default-pointer invariants.
//!
//! A collection is an ordered sequence of named strategies plus the name of
//! the default member. Invariants:
//!
//! - **I1**: a non-empty collection's `default_name` names some member.
//! - **I2**: no two members share a case-insensitive name.
//! - **I3** (hybrids): at least 2 members, no nested hybrids (enforced at
//!   the type level by `LeafRetrievalConfig`).

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::name::names_equal;

/// Which of a database's two strategy collections an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Embedding,
    Retrieval,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedding => write!(f, "embedding"),
            Self::Retrieval => write!(f, "retrieval"),
        }
    }
}

/// Anything addressable by a unique name within a collection.
pub trait Named {
    fn name(&self) -> &str;
}

/// Ordered strategy collection with its default pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyCollection<S> {
    #[serde(default = "Vec::new")]
    pub strategies: Vec<S>,
    /// Name of the default member. `None` only when the collection is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_name: Option<String>,
}

impl<S> Default for StrategyCollection<S> {
    fn default() -> Self {
        Self {
            strategies: Vec::new(),
            default_name: None,
        }
    }
}

impl<S: Named> StrategyCollection<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Case-insensitive member lookup.
    pub fn find(&self, name: &str) -> Option<&S> {
        self.strategies.iter().find(|s| names_equal(s.name(), name))
    }

    /// Case-insensitive member position.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.strategies
            .iter()
            .position(|s| names_equal(s.name(), name))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Whether the named member is the current default.
    pub fn is_default(&self, name: &str) -> bool {
        self.default_name
            .as_deref()
            .map(|d| names_equal(d, name))
            .unwrap_or(false)
    }

    /// Member names in collection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }

    /// Audit the collection against invariants I1 and I2. Returns every
    /// violation found; empty means the collection is structurally sound.
    ///
    /// This is the re-validation hook for callers bolting on optimistic
    /// concurrency: audit the latest snapshot before accepting a write.
    pub fn audit(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (i, s) in self.strategies.iter().enumerate() {
            for other in &self.strategies[i + 1..] {
                if names_equal(s.name(), other.name()) {
                    errors.push(ValidationError::Name(format!(
                        "duplicate strategy name \"{}\"",
                        s.name()
                    )));
                }
            }
        }

        match &self.default_name {
            Some(default) if !self.contains_name(default) => {
                errors.push(ValidationError::Structural(format!(
                    "default strategy \"{}\" is not a member of the collection",
                    default
                )));
            }
            None if !self.is_empty() => {
                errors.push(ValidationError::Structural(
                    "non-empty collection has no default strategy".to_string(),
                ));
            }
            _ => {}
        }

        errors
    }
}

/// The persistence payload emitted after a committed operation: the full
/// new collection state plus the edited strategy's previous name (when
/// renaming), so the persistence collaborator can rewrite references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionUpdate<S> {
    /// Previous name of the affected strategy, when the operation renamed it.
    pub old_name: Option<String>,
    pub collection: StrategyCollection<S>,
}

impl<S: Clone> CollectionUpdate<S> {
    pub fn new(collection: &StrategyCollection<S>) -> Self {
        Self {
            old_name: None,
            collection: collection.clone(),
        }
    }

    pub fn renamed_from(collection: &StrategyCollection<S>, old_name: &str) -> Self {
        Self {
            old_name: Some(old_name.to_string()),
            collection: collection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Fake(String);

    impl Named for Fake {
        fn name(&self) -> &str {
            &self.0
        }
    }

    fn collection(names: &[&str], default: Option<&str>) -> StrategyCollection<Fake> {
        StrategyCollection {
            strategies: names.iter().map(|n| Fake(n.to_string())).collect(),
            default_name: default.map(String::from),
        }
    }

    #[test]
    fn test_empty_collection() {
        let c: StrategyCollection<Fake> = StrategyCollection::new();
        assert!(c.is_empty());
        assert_eq!(c.len(), 0);
        assert!(c.audit().is_empty());
    }

    #[test]
    fn test_find_case_insensitive() {
        let c = collection(&["Alpha", "beta"], Some("Alpha"));
        assert!(c.find("alpha").is_some());
        assert_eq!(c.position("BETA"), Some(1));
        assert!(c.contains_name("ALPHA"));
        assert!(!c.contains_name("gamma"));
    }

    #[test]
    fn test_is_default_case_insensitive() {
        let c = collection(&["Alpha", "beta"], Some("Alpha"));
        assert!(c.is_default("alpha"));
        assert!(!c.is_default("beta"));
    }

    #[test]
    fn test_audit_clean_collection() {
        let c = collection(&["a", "b"], Some("a"));
        assert!(c.audit().is_empty());
    }

    #[test]
    fn test_audit_flags_duplicate_names() {
        let c = collection(&["alpha", "ALPHA"], Some("alpha"));
        let errors = c.audit();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("duplicate"));
    }

    #[test]
    fn test_audit_flags_dangling_default() {
        let c = collection(&["a", "b"], Some("gone"));
        let errors = c.audit();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("not a member"));
    }

    #[test]
    fn test_audit_flags_missing_default() {
        let c = collection(&["a"], None);
        let errors = c.audit();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("no default"));
    }

    #[test]
    fn test_audit_accumulates_multiple_violations() {
        let c = collection(&["x", "X"], Some("gone"));
        assert_eq!(c.audit().len(), 2);
    }

    #[test]
    fn test_strategy_kind_display() {
        assert_eq!(StrategyKind::Embedding.to_string(), "embedding");
        assert_eq!(StrategyKind::Retrieval.to_string(), "retrieval");
    }

    #[test]
    fn test_collection_update_renamed() {
        let c = collection(&["new-name"], Some("new-name"));
        let update = CollectionUpdate::renamed_from(&c, "old-name");
        assert_eq!(update.old_name.as_deref(), Some("old-name"));
        assert_eq!(update.collection.len(), 1);
    }
}
