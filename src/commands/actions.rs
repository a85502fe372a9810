// Admin actions - typed requests handed to TokenService::handle

use indexmap::IndexMap;

use super::messages::{AdminPage, Message};
use crate::tokens::{ImportSummary, Token, TokenMap, DEFAULT_OPTION_NAME};

/// Posted form fields in submission order
pub type FormFields = IndexMap<String, String>;

/// A single admin action with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenAction {
    /// Add one token
    AddToken(Token),
    /// Remove a token by exact name
    RemoveToken { name: String },
    /// Import a JSON document; `replace_existing` overrides the document's flag
    ImportTokens {
        payload: String,
        replace_existing: Option<bool>,
    },
    /// Import CSV text
    ImportCsv {
        text: String,
        replace_existing: bool,
    },
    /// Replace every token's label and value from the management form
    SaveValues(TokenMap),
}

impl TokenAction {
    /// Page the admin returns to after the action
    pub fn page(&self) -> AdminPage {
        match self {
            TokenAction::ImportTokens { .. } | TokenAction::ImportCsv { .. } => {
                AdminPage::ImportExport
            }
            _ => AdminPage::Tokens,
        }
    }

    /// Short name used in events and logs
    pub fn name(&self) -> &'static str {
        match self {
            TokenAction::AddToken(_) => "add",
            TokenAction::RemoveToken { .. } => "remove",
            TokenAction::ImportTokens { .. } | TokenAction::ImportCsv { .. } => "import",
            TokenAction::SaveValues(_) => "save",
        }
    }

    /// Build an action from a posted action name and flat form fields.
    ///
    /// Recognises `add_token` (`name`, `label`, `value`, or the
    /// `new_token[...]` forms), `remove_token` (`remove_token_name`),
    /// `import_tokens` and `import_csv` (`import_tokens_data`,
    /// `replace_existing`) and `save_values`/`update` (the management form's
    /// `custom_tokens_data[NAME][label|value]` fields). Returns `None` for
    /// unknown actions.
    pub fn from_form(action: &str, fields: &FormFields) -> Option<Self> {
        let field = |names: &[&str]| -> String {
            names
                .iter()
                .find_map(|name| fields.get(*name))
                .cloned()
                .unwrap_or_default()
        };
        let replace_flag = fields.get("replace_existing").map(|v| form_flag(v));

        match normalize_action(action).as_str() {
            "add_token" => Some(TokenAction::AddToken(Token {
                name: field(&["name", "new_token[name]"]),
                label: field(&["label", "new_token[label]"]),
                value: field(&["value", "new_token[value]"]),
            })),
            "remove_token" => Some(TokenAction::RemoveToken {
                name: field(&["remove_token_name"]),
            }),
            "import_tokens" => Some(TokenAction::ImportTokens {
                payload: field(&["import_tokens_data"]),
                replace_existing: replace_flag,
            }),
            "import_csv" => Some(TokenAction::ImportCsv {
                text: field(&["import_tokens_data"]),
                replace_existing: replace_flag.unwrap_or(false),
            }),
            "save_values" | "update" => Some(TokenAction::SaveValues(token_fields(fields))),
            _ => None,
        }
    }
}

/// Result of handling an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub message: Message,
    pub page: AdminPage,
    /// Merge counts, present for successful imports
    pub import_summary: Option<ImportSummary>,
}

impl ActionResponse {
    pub fn new(message: Message, page: AdminPage) -> Self {
        Self {
            message,
            page,
            import_summary: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.message.is_error()
    }

    pub fn redirect_path(&self) -> String {
        self.page.redirect_path(self.message)
    }
}

/// Collect `custom_tokens_data[NAME][label]` / `[value]` fields, keeping the
/// order in which names first appear. Other fields are ignored.
fn token_fields(fields: &FormFields) -> TokenMap {
    let mut tokens = TokenMap::new();
    for (key, text) in fields {
        let Some((name, part)) = split_token_field(key) else {
            continue;
        };
        let entry = tokens.entry(name.to_string()).or_default();
        match part {
            "label" => entry.label = text.clone(),
            _ => entry.value = text.clone(),
        }
    }
    tokens
}

/// `custom_tokens_data[NAME][part]` -> (NAME, part) for part `label` or `value`
fn split_token_field(key: &str) -> Option<(&str, &str)> {
    let rest = key.strip_prefix(DEFAULT_OPTION_NAME)?.strip_prefix('[')?;
    let (name, part) = rest.strip_suffix(']')?.split_once("][")?;
    matches!(part, "label" | "value").then_some((name, part))
}

/// Lowercase and keep only [a-z0-9_-]
fn normalize_action(action: &str) -> String {
    action
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Checkbox-style flag: anything but "", "0", "false", "off" is set
fn form_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("off"))
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
