// Token service - runs each admin action as one read-modify-write cycle
// against the token store and notifies observers of successful mutations

use std::sync::Arc;

use super::actions::{ActionResponse, TokenAction};
use super::messages::Message;
use crate::events::{LogEventEmitter, TokenEventEmitter, TokensUpdatedPayload};
use crate::storage::OptionStorage;
use crate::tokens::{
    add_token, import_tokens, register_tokens, remove_token, save_token_values, to_tokens,
    ImportRequest, ImportSummary, ShortcodeRegistry, StoreError, Token, TokenError, TokenMap,
    TokenStore,
};
use crate::transfer::{
    export_csv, export_json, parse_import_csv, parse_import_json, TransferError, TransferFormat,
};

/// Errors surfaced by TokenService
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl ServiceError {
    /// Map an error to the message shown to the admin
    pub fn to_message(&self) -> Message {
        match self {
            ServiceError::Token(TokenError::Duplicate(_)) => Message::AddErrorDuplicate,
            ServiceError::Token(TokenError::EmptyLabel) => Message::AddErrorEmptyLabel,
            ServiceError::Token(TokenError::EmptyName | TokenError::InvalidName(_)) => {
                Message::AddErrorInvalidName
            }
            ServiceError::Transfer(_) => Message::ImportErrorParse,
            ServiceError::Store(_) => Message::ErrorStorage,
        }
    }
}

/// Service owning the token store.
///
/// Constructed with its store (and the store with its storage backend), so it
/// can be driven by any front end or by tests without a running host.
pub struct TokenService<S: OptionStorage> {
    store: TokenStore<S>,
    emitter: Arc<dyn TokenEventEmitter>,
}

impl<S: OptionStorage> TokenService<S> {
    /// Create a service that reports mutations to the log
    pub fn new(store: TokenStore<S>) -> Self {
        Self::with_emitter(store, Arc::new(LogEventEmitter))
    }

    pub fn with_emitter(store: TokenStore<S>, emitter: Arc<dyn TokenEventEmitter>) -> Self {
        Self { store, emitter }
    }

    pub fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    /// Current mapping
    pub fn tokens(&self) -> Result<TokenMap, ServiceError> {
        Ok(self.store.load()?)
    }

    /// Current tokens in store order
    pub fn list(&self) -> Result<Vec<Token>, ServiceError> {
        Ok(to_tokens(&self.store.load()?))
    }

    /// Add a token, returning it as stored (sanitized)
    #[must_use = "this returns a Result that should be handled"]
    pub fn add(&self, request: &Token) -> Result<Token, ServiceError> {
        let current = self.store.load()?;
        let next = add_token(&current, request)?;

        // add_token appends the new entry last
        let (name, data) = next.last().ok_or(TokenError::EmptyName)?;
        let token = Token::new(name.as_str(), data.label.as_str(), data.value.as_str());
        self.store.save(&next)?;

        crate::info!("Added token: {} -> {}", token.name, token.value);
        self.notify("add", Some(token.name.clone()), next.len());
        Ok(token)
    }

    /// Remove a token by exact name; unknown names are not an error
    #[must_use = "this returns a Result that should be handled"]
    pub fn remove(&self, name: &str) -> Result<(), ServiceError> {
        let current = self.store.load()?;
        let next = remove_token(&current, name);
        let Some(removed) = current.keys().find(|key| !next.contains_key(*key)).cloned() else {
            crate::debug!("Remove of '{}' changed nothing", name);
            return Ok(());
        };
        self.store.save(&next)?;

        crate::info!("Removed token: {}", removed);
        self.notify("remove", Some(removed), next.len());
        Ok(())
    }

    /// Merge an import batch
    #[must_use = "this returns a Result that should be handled"]
    pub fn import(&self, request: &ImportRequest) -> Result<ImportSummary, ServiceError> {
        let current = self.store.load()?;
        let outcome = import_tokens(&current, request);
        // A replace can reorder without changing any entry, so decide from the counts
        if outcome.summary.added + outcome.summary.replaced > 0 {
            self.store.save(&outcome.tokens)?;
            self.notify("import", None, outcome.tokens.len());
        }

        let summary = outcome.summary;
        crate::info!(
            "Imported tokens: {} added, {} replaced, {} skipped, {} invalid",
            summary.added,
            summary.replaced,
            summary.skipped,
            summary.invalid
        );
        Ok(summary)
    }

    /// Import a JSON document; a structurally invalid document imports nothing
    #[must_use = "this returns a Result that should be handled"]
    pub fn import_json(
        &self,
        payload: &str,
        replace_existing: Option<bool>,
    ) -> Result<ImportSummary, ServiceError> {
        let mut request = parse_import_json(payload).inspect_err(|e| {
            crate::warn!("Rejected import payload: {}", e);
        })?;
        if let Some(replace) = replace_existing {
            request.replace_existing = replace;
        }
        self.import(&request)
    }

    /// Import CSV text
    #[must_use = "this returns a Result that should be handled"]
    pub fn import_csv(
        &self,
        text: &str,
        replace_existing: bool,
    ) -> Result<ImportSummary, ServiceError> {
        let request = parse_import_csv(text, replace_existing).inspect_err(|e| {
            crate::warn!("Rejected CSV import: {}", e);
        })?;
        self.import(&request)
    }

    /// Replace the mapping with the management form's submission
    #[must_use = "this returns a Result that should be handled"]
    pub fn save_values(&self, submitted: &TokenMap) -> Result<usize, ServiceError> {
        let next = save_token_values(submitted);
        self.store.save(&next)?;

        crate::info!("Saved values for {} tokens", next.len());
        self.notify("save", None, next.len());
        Ok(next.len())
    }

    /// Export the current tokens
    pub fn export(&self, format: TransferFormat) -> Result<String, ServiceError> {
        let tokens = self.store.load()?;
        let output = match format {
            TransferFormat::Json => export_json(&tokens)?,
            TransferFormat::Csv => export_csv(&tokens)?,
        };
        Ok(output)
    }

    /// Register a shortcode for every stored token (existing names are skipped)
    pub fn register_shortcodes(
        &self,
        registry: &mut ShortcodeRegistry,
    ) -> Result<usize, ServiceError> {
        let tokens = self.store.load()?;
        Ok(register_tokens(registry, &tokens))
    }

    /// Render content against the current tokens
    pub fn render(&self, content: &str) -> Result<String, ServiceError> {
        let mut registry = ShortcodeRegistry::new();
        self.register_shortcodes(&mut registry)?;
        Ok(registry.render(content))
    }

    /// Run an action and describe the outcome for the admin
    pub fn handle(&self, action: TokenAction) -> ActionResponse {
        let page = action.page();
        let action_name = action.name();

        let result = match action {
            TokenAction::AddToken(token) => self.add(&token).map(|_| (Message::AddSuccess, None)),
            TokenAction::RemoveToken { name } => {
                self.remove(&name).map(|_| (Message::RemoveSuccess, None))
            }
            TokenAction::ImportTokens {
                payload,
                replace_existing,
            } => self
                .import_json(&payload, replace_existing)
                .map(|summary| (Message::ImportSuccess, Some(summary))),
            TokenAction::ImportCsv {
                text,
                replace_existing,
            } => self
                .import_csv(&text, replace_existing)
                .map(|summary| (Message::ImportSuccess, Some(summary))),
            TokenAction::SaveValues(submitted) => {
                self.save_values(&submitted).map(|_| (Message::ValuesSaved, None))
            }
        };

        match result {
            Ok((message, import_summary)) => ActionResponse {
                message,
                page,
                import_summary,
            },
            Err(e) => {
                match &e {
                    ServiceError::Store(_) => {
                        crate::error!("Token action '{}' failed: {}", action_name, e);
                    }
                    ServiceError::Token(token_error) if token_error.is_validation() => {
                        crate::debug!("Token action '{}' got invalid input: {}", action_name, e);
                    }
                    _ => {
                        crate::info!("Token action '{}' rejected: {}", action_name, e);
                    }
                }
                ActionResponse::new(e.to_message(), page)
            }
        }
    }

    fn notify(&self, action: &str, token_name: Option<String>, count: usize) {
        self.emitter.emit_tokens_updated(TokensUpdatedPayload {
            action: action.to_string(),
            token_name,
            count,
        });
    }
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
