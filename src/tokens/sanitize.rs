// Text field sanitizer - cleans user-supplied names, labels and values
// before they are validated or stored

use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)>")
        .expect("script/style pattern is a valid regex")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

static OCTET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("octet pattern is a valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern is a valid regex"));

/// Sanitize a single-line text field.
///
/// Strips HTML tags (dropping `<script>`/`<style>` bodies entirely), drops
/// control characters other than line breaks and tabs, removes percent-encoded
/// octets, collapses whitespace runs to one space and trims the result.
/// Sanitizing an already sanitized string leaves it unchanged.
pub fn sanitize_text(input: &str) -> String {
    let without_scripts = SCRIPT_STYLE.replace_all(input, "");
    let without_tags = TAG.replace_all(&without_scripts, "");

    // Control characters go before octets: dropping one can join "%" to hex digits
    let mut text: String = without_tags
        .chars()
        .filter(|c| !c.is_control() || matches!(*c, '\r' | '\n' | '\t'))
        .collect();

    // Removing one octet can expose another ("%%4141"), so loop to a fixed point
    while OCTET.is_match(&text) {
        text = OCTET.replace_all(&text, "").into_owned();
    }

    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod tests;
