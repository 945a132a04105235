//! Strategy name validation.
//!
//! Two layers:
//! 1. Syntax: charset, length, non-emptiness.
//! 2. Uniqueness: case-insensitive collision check against the owning
//!    collection, with a rename exemption for the strategy's own name.
//!
//! Both layers are pure; uniqueness takes the current member names as input.

use crate::defaults::NAME_MAX_LEN;
use crate::error::ValidationError;

/// Which characters a name may contain. Callers pick per context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCharset {
    /// Machine-facing identifiers: letters, digits, hyphen, underscore.
    Identifier,
    /// Human-readable display names: identifier charset plus spaces.
    Display,
}

impl NameCharset {
    fn allows(self, c: char) -> bool {
        match self {
            Self::Identifier => c.is_ascii_alphanumeric() || c == '-' || c == '_',
            Self::Display => c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ',
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Identifier => "letters, digits, hyphens, and underscores",
            Self::Display => "letters, digits, hyphens, underscores, and spaces",
        }
    }
}

/// Case-insensitive name equality. The charset is ASCII-only, so ASCII
/// folding is exact.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Validate name syntax against the given charset. Errors are accumulated.
pub fn validate_name(name: &str, charset: NameCharset) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(ValidationError::Name("name must not be empty".to_string()));
        return errors;
    }

    if name.chars().count() > NAME_MAX_LEN {
        errors.push(ValidationError::Name(format!(
            "name must be at most {} characters",
            NAME_MAX_LEN
        )));
    }

    let illegal: Vec<char> = name.chars().filter(|c| !charset.allows(*c)).collect();
    if !illegal.is_empty() {
        errors.push(ValidationError::Name(format!(
            "name may only contain {} (found {:?})",
            charset.description(),
            illegal[0]
        )));
    }

    errors
}

/// Check a proposed name against existing member names, case-insensitively.
///
/// `original` is the strategy's current name when validating a rename; the
/// member matching it is excluded, so renaming a strategy to its own name
/// (or a re-cased form of it) is not a collision.
pub fn check_collision<'a>(
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
    original: Option<&str>,
) -> Option<ValidationError> {
    for member in existing {
        if let Some(orig) = original {
            if names_equal(member, orig) {
                continue;
            }
        }
        if names_equal(member, name) {
            return Some(ValidationError::Name(format!(
                "a strategy named \"{}\" already exists",
                member
            )));
        }
    }
    None
}
