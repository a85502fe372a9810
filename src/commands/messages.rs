// User-facing result messages and the admin pages actions return to

use std::fmt;

/// Text shown for message keys that are not recognised
pub const UNKNOWN_MESSAGE: &str = "An unknown action occurred.";

/// Outcome message for an admin action, identified by a stable key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    AddSuccess,
    RemoveSuccess,
    ImportSuccess,
    ValuesSaved,
    AddErrorDuplicate,
    AddErrorInvalidName,
    AddErrorEmptyLabel,
    ImportErrorParse,
    ErrorStorage,
}

impl Message {
    const ALL: [Message; 9] = [
        Message::AddSuccess,
        Message::RemoveSuccess,
        Message::ImportSuccess,
        Message::ValuesSaved,
        Message::AddErrorDuplicate,
        Message::AddErrorInvalidName,
        Message::AddErrorEmptyLabel,
        Message::ImportErrorParse,
        Message::ErrorStorage,
    ];

    /// Key carried in redirect URLs
    pub fn key(self) -> &'static str {
        match self {
            Message::AddSuccess => "add_success",
            Message::RemoveSuccess => "remove_success",
            Message::ImportSuccess => "import_success",
            Message::ValuesSaved => "values_saved",
            Message::AddErrorDuplicate => "add_error_duplicate",
            Message::AddErrorInvalidName => "add_error_invalid_name",
            Message::AddErrorEmptyLabel => "add_error_empty_label",
            Message::ImportErrorParse => "import_error_parse",
            Message::ErrorStorage => "error_storage",
        }
    }

    /// Display text for the admin notice
    pub fn text(self) -> &'static str {
        match self {
            Message::AddSuccess => "Token added successfully.",
            Message::RemoveSuccess => "Token removed successfully.",
            Message::ImportSuccess => "Tokens imported successfully.",
            Message::ValuesSaved => "Token values saved.",
            Message::AddErrorDuplicate => {
                "Error: A token with that name already exists. Token names must be unique."
            }
            Message::AddErrorInvalidName => {
                "Error: Invalid token name format. Please use only letters, numbers, and underscores."
            }
            Message::AddErrorEmptyLabel => "Error: Please provide a Token Label.",
            Message::ImportErrorParse => {
                "Error: The import file could not be parsed. Use a JSON file with a \"tokens\" array or a name,label,value CSV file."
            }
            Message::ErrorStorage => "Error: Tokens could not be saved. Please try again.",
        }
    }

    /// Error notices are styled differently from success notices
    pub fn is_error(self) -> bool {
        self.key().contains("error")
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|message| message.key() == key)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Display text for a raw message key, falling back for unknown keys
pub fn message_text(key: &str) -> &'static str {
    Message::from_key(key).map_or(UNKNOWN_MESSAGE, Message::text)
}

/// Admin page an action returns to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminPage {
    /// Token management page
    Tokens,
    /// Import/export page
    ImportExport,
}

impl AdminPage {
    pub fn slug(self) -> &'static str {
        match self {
            AdminPage::Tokens => "custom-tokens",
            AdminPage::ImportExport => "custom-tokens-import-export",
        }
    }

    /// Relative redirect target carrying the message key
    pub fn redirect_path(self, message: Message) -> String {
        format!("admin.php?page={}&message={}", self.slug(), message.key())
    }
}

#[cfg(test)]
#[path = "messages_test.rs"]
mod tests;
