// Reconciliation engine - merges add/remove/import/save requests into a
// snapshot of the token mapping and returns the next snapshot
//
// Every function here is pure: it never touches storage. Callers persist the
// returned mapping with a single TokenStore::save.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::sanitize::sanitize_text;
use super::types::{
    find_colliding, fold_name, validate_name, Token, TokenData, TokenError, TokenMap,
};

/// A bulk import request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportRequest {
    pub tokens: Vec<Token>,
    /// Replace stored tokens that collide (case-insensitively) with imported ones
    #[serde(default)]
    pub replace_existing: bool,
}

/// Counts describing how an import batch was merged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    /// New names inserted
    pub added: usize,
    /// Colliding names overwritten (replace mode only)
    pub replaced: usize,
    /// Colliding names left untouched (keep mode only)
    pub skipped: usize,
    /// Entries dropped by validation
    pub invalid: usize,
}

/// Result of merging an import batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub tokens: TokenMap,
    pub summary: ImportSummary,
}

/// Sanitize and validate a single incoming token
pub fn clean_token(token: &Token) -> Result<Token, TokenError> {
    let name = sanitize_text(&token.name);
    validate_name(&name)?;

    let label = sanitize_text(&token.label);
    if label.is_empty() {
        return Err(TokenError::EmptyLabel);
    }

    Ok(Token {
        name,
        label,
        value: sanitize_text(&token.value),
    })
}

/// Add a single token.
///
/// Fails on a malformed name, an empty label, or a name that already exists
/// in any casing. On success the new token is appended after all prior entries.
pub fn add_token(current: &TokenMap, request: &Token) -> Result<TokenMap, TokenError> {
    let token = clean_token(request)?;

    if let Some(existing) = find_colliding(current, &token.name) {
        crate::debug!("Rejecting token '{}': collides with '{}'", token.name, existing);
        return Err(TokenError::Duplicate(token.name));
    }

    let mut next = current.clone();
    let (name, data) = token.into_entry();
    next.insert(name, data);
    Ok(next)
}

/// Remove a token by its exact, case-sensitive name.
///
/// An empty name or an unknown name leaves the mapping unchanged. Unlike
/// add_token this does not fold case, so "promo" will not remove "PROMO".
pub fn remove_token(current: &TokenMap, name: &str) -> TokenMap {
    let name = sanitize_text(name);
    let mut next = current.clone();
    if name.is_empty() {
        return next;
    }

    if next.shift_remove(&name).is_none() {
        if let Some(other_case) = find_colliding(current, &name) {
            crate::debug!(
                "No token named '{}' to remove (a token named '{}' exists)",
                name,
                other_case
            );
        }
    }
    next
}

/// Merge an import batch into the mapping, one token at a time in list order.
///
/// Invalid entries are dropped. A token whose name collides case-insensitively
/// with a stored one (or an earlier one in the same batch) either replaces it,
/// taking the imported casing and moving to the end, or is discarded, depending
/// on `replace_existing`.
pub fn import_tokens(current: &TokenMap, request: &ImportRequest) -> ImportOutcome {
    let mut next = current.clone();
    let mut summary = ImportSummary::default();

    // folded name -> name as currently stored
    let mut lookup: HashMap<String, String> = current
        .keys()
        .map(|name| (fold_name(name), name.clone()))
        .collect();

    for incoming in &request.tokens {
        let token = match clean_token(incoming) {
            Ok(token) => token,
            Err(e) => {
                crate::trace!("Dropping imported token '{}': {}", incoming.name, e);
                summary.invalid += 1;
                continue;
            }
        };

        let folded = fold_name(&token.name);
        match lookup.get(&folded).cloned() {
            Some(stored) if request.replace_existing => {
                next.shift_remove(&stored);
                lookup.insert(folded, token.name.clone());
                let (name, data) = token.into_entry();
                next.insert(name, data);
                summary.replaced += 1;
            }
            Some(_) => {
                summary.skipped += 1;
            }
            None => {
                lookup.insert(folded, token.name.clone());
                let (name, data) = token.into_entry();
                next.insert(name, data);
                summary.added += 1;
            }
        }
    }

    ImportOutcome {
        tokens: next,
        summary,
    }
}

/// Replace the mapping with a bulk submission of every token's label and value.
///
/// Entries with malformed names or empty labels are dropped, as is any entry
/// colliding case-insensitively with an earlier one in the submission. Tokens
/// absent from the submission are not carried over.
pub fn save_token_values<'a, I>(submitted: I) -> TokenMap
where
    I: IntoIterator<Item = (&'a String, &'a TokenData)>,
{
    let mut next = TokenMap::new();
    for (name, data) in submitted {
        let candidate = Token::new(name.as_str(), data.label.as_str(), data.value.as_str());
        let token = match clean_token(&candidate) {
            Ok(token) => token,
            Err(e) => {
                crate::debug!("Dropping submitted token '{}': {}", name, e);
                continue;
            }
        };
        if let Some(existing) = find_colliding(&next, &token.name) {
            crate::debug!(
                "Dropping submitted token '{}': collides with '{}'",
                token.name,
                existing
            );
            continue;
        }
        let (name, data) = token.into_entry();
        next.insert(name, data);
    }
    next
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
