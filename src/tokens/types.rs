// Token types - the stored mapping, request shapes, and validation errors

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+$").expect("token name pattern is a valid regex")
});

/// Stored data for a single token; the name is the mapping key
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenData {
    /// Human-readable display name
    #[serde(default)]
    pub label: String,
    /// Text substituted for the shortcode
    #[serde(default)]
    pub value: String,
}

impl TokenData {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The whole token set, keyed by name as cased when last written.
///
/// Iteration order is insertion order, which is also the export order.
/// No two keys may be equal when compared case-insensitively.
pub type TokenMap = IndexMap<String, TokenData>;

/// A token as exchanged with the outside world (forms, import and export files)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl Token {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            value: value.into(),
        }
    }

    /// Split into the mapping key and stored data
    pub fn into_entry(self) -> (String, TokenData) {
        (
            self.name,
            TokenData {
                label: self.label,
                value: self.value,
            },
        )
    }
}

/// Flatten a mapping into tokens, in store order
pub fn to_tokens(tokens: &TokenMap) -> Vec<Token> {
    tokens
        .iter()
        .map(|(name, data)| Token::new(name.as_str(), data.label.as_str(), data.value.as_str()))
        .collect()
}

/// Rejections from the reconciliation engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Name missing after sanitizing
    #[error("Token name cannot be empty")]
    EmptyName,
    /// Name contains characters outside [A-Za-z0-9_]
    #[error("Invalid token name '{0}': use only letters, numbers, and underscores")]
    InvalidName(String),
    /// Label missing after sanitizing
    #[error("Token label cannot be empty")]
    EmptyLabel,
    /// A token with this name exists (compared case-insensitively)
    #[error("A token named '{0}' already exists")]
    Duplicate(String),
}

impl TokenError {
    /// True for malformed input, false for collisions
    pub fn is_validation(&self) -> bool {
        !matches!(self, TokenError::Duplicate(_))
    }
}

/// Check a (sanitized) token name against the allowed pattern
pub fn validate_name(name: &str) -> Result<(), TokenError> {
    if name.is_empty() {
        return Err(TokenError::EmptyName);
    }
    if !NAME_PATTERN.is_match(name) {
        return Err(TokenError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Case-folded form used for uniqueness comparisons
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

/// Find the stored key that collides with `name`, ignoring case
pub fn find_colliding<'a>(tokens: &'a TokenMap, name: &str) -> Option<&'a str> {
    let folded = fold_name(name);
    tokens
        .keys()
        .find(|key| fold_name(key) == folded)
        .map(String::as_str)
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
