// Shortcode renderer - replaces [NAME] placeholders in content with the
// value registered for NAME

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::types::TokenMap;

// [[NAME ...]] escapes, [NAME], [NAME attr="x"], [NAME /]
static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\[?)([A-Za-z0-9_]+)((?:\s[^\[\]]*?)?)(/?)\](\]?)")
        .expect("shortcode pattern is a valid regex")
});

/// Substitution function producing a shortcode's output
pub type ShortcodeHandler = Box<dyn Fn() -> String + Send + Sync>;

/// Registry of shortcode handlers keyed by exact (case-sensitive) name
#[derive(Default)]
pub struct ShortcodeRegistry {
    handlers: HashMap<String, ShortcodeHandler>,
}

impl ShortcodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a handler is registered for `name`
    pub fn exists(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Register `handler` for `name`, replacing any previous handler
    pub fn add(&mut self, name: impl Into<String>, handler: ShortcodeHandler) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Replace every registered shortcode in `content`.
    ///
    /// Unregistered shortcodes are left as written. A doubled bracket
    /// (`[[NAME]]`) renders as the literal `[NAME]`.
    pub fn render(&self, content: &str) -> String {
        if self.handlers.is_empty() || !content.contains('[') {
            return content.to_string();
        }

        SHORTCODE
            .replace_all(content, |caps: &Captures| {
                let whole = &caps[0];
                let Some(handler) = self.handlers.get(&caps[2]) else {
                    return whole.to_string();
                };
                if !caps[1].is_empty() && !caps[5].is_empty() {
                    return whole[1..whole.len() - 1].to_string();
                }
                // Keep a lone outer bracket from a half-escaped form
                format!("{}{}{}", &caps[1], handler(), &caps[5])
            })
            .into_owned()
    }
}

/// Register a shortcode for every token in the mapping.
///
/// Names that already have a handler are skipped, so calling this again is
/// harmless. Returns the number of handlers added.
pub fn register_tokens(registry: &mut ShortcodeRegistry, tokens: &TokenMap) -> usize {
    let mut added = 0;
    for (name, data) in tokens {
        if registry.exists(name) {
            continue;
        }
        let value = data.value.clone();
        registry.add(name.clone(), Box::new(move || value.clone()));
        added += 1;
    }
    crate::debug!("Registered {} token shortcodes", added);
    added
}

#[cfg(test)]
#[path = "renderer_test.rs"]
mod tests;
