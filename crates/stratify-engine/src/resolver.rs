//! Default-strategy assignment.
//!
//! Pure state machine: given the *post-operation* member list, the current
//! default pointer, and the operation that just happened, compute the new
//! default. A post-condition check runs last on every path and force-assigns
//! the first member whenever the pointer would dangle, so invariant I1 (a
//! non-empty collection always has a valid default) holds even if an
//! upstream step has a latent bug.
//!
//! "First" always means first in collection order — never insertion time,
//! never alphabetical — so resolution is reproducible from order alone.

use tracing::{debug, warn};

use stratify_core::{names_equal, Named};

/// The operation whose effect on the default pointer is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultOp<'a> {
    /// A strategy was appended to the collection.
    Added { name: &'a str, make_default: bool },
    /// A strategy changed name. The pointer is a name reference, so the
    /// default follows its strategy through a rename.
    Renamed { old_name: &'a str, new_name: &'a str },
    /// The user explicitly marked a strategy as default.
    SetDefault { name: &'a str },
    /// The user unchecked default status on a strategy.
    ClearDefault { name: &'a str },
    /// A strategy was removed from the collection.
    Deleted { name: &'a str },
}

/// Compute the new default pointer.
///
/// `strategies` is the collection *after* the operation was applied;
/// `current` is the pointer from before.
pub fn resolve_default<S: Named>(
    strategies: &[S],
    current: Option<&str>,
    op: DefaultOp<'_>,
) -> Option<String> {
    let candidate: Option<String> = match op {
        DefaultOp::Added { name, make_default } => {
            if make_default {
                Some(name.to_string())
            } else {
                current.map(String::from)
            }
        }
        DefaultOp::Renamed { old_name, new_name } => match current {
            Some(cur) if names_equal(cur, old_name) => {
                debug!(old_name, new_name, "default pointer follows rename");
                Some(new_name.to_string())
            }
            other => other.map(String::from),
        },
        DefaultOp::SetDefault { name } => Some(name.to_string()),
        DefaultOp::ClearDefault { name } => match current {
            Some(cur) if names_equal(cur, name) => {
                // First member with a different name, in collection order.
                // With no alternative the pointer stays put: invariant I1
                // outranks the user's preference.
                strategies
                    .iter()
                    .map(Named::name)
                    .find(|n| !names_equal(n, name))
                    .or(Some(name))
                    .map(String::from)
            }
            other => other.map(String::from),
        },
        DefaultOp::Deleted { name } => match current {
            Some(cur) if names_equal(cur, name) => {
                strategies.first().map(|s| s.name().to_string())
            }
            other => other.map(String::from),
        },
    };

    enforce_invariant(strategies, candidate)
}

/// Post-condition safety net: a non-empty collection whose default names
/// no member gets its first member as default.
fn enforce_invariant<S: Named>(strategies: &[S], candidate: Option<String>) -> Option<String> {
    if strategies.is_empty() {
        return None;
    }
    match candidate {
        Some(name) if strategies.iter().any(|s| names_equal(s.name(), &name)) => Some(name),
        stale => {
            let first = strategies[0].name().to_string();
            if let Some(stale) = stale {
                warn!(
                    stale_default = %stale,
                    new_default = %first,
                    "default pointer named no member; force-assigned first"
                );
            }
            Some(first)
        }
    }
}
