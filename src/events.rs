// Token events for observers of the token set
// Defines event payloads and emission trait for testability

use serde::Serialize;

/// Token-related event names
pub mod token_events {
    pub const TOKENS_UPDATED: &str = "tokens_updated";

    /// Payload for tokens_updated event
    #[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct TokensUpdatedPayload {
        /// Type of mutation: "add", "remove", "import", or "save"
        pub action: String,
        /// Name of the affected token (add and remove only)
        pub token_name: Option<String>,
        /// Number of tokens in the store after the mutation
        pub count: usize,
    }
}

pub use token_events::TokensUpdatedPayload;

/// Trait for emitting token events
/// Allows mocking in tests while production code logs or forwards events
pub trait TokenEventEmitter: Send + Sync {
    /// Emit tokens_updated event
    fn emit_tokens_updated(&self, payload: TokensUpdatedPayload);
}

/// Emitter that writes events to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventEmitter;

impl TokenEventEmitter for LogEventEmitter {
    fn emit_tokens_updated(&self, payload: TokensUpdatedPayload) {
        match to_event_json(&payload) {
            Ok(json) => crate::info!("{}: {}", token_events::TOKENS_UPDATED, json),
            Err(e) => crate::warn!(
                "Failed to serialize {} event: {}",
                token_events::TOKENS_UPDATED,
                e
            ),
        }
    }
}

/// Serialize a payload for transports that forward events as JSON
pub fn to_event_json<T: Serialize>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(payload)
}

#[cfg(test)]
#[path = "events_test.rs"]
mod tests;
