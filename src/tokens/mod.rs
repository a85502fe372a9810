// Tokens module - the token mapping, its store, the reconciliation rules for
// add/remove/import, and the shortcode renderer

mod reconcile;
mod renderer;
mod sanitize;
mod store;
mod types;

pub use reconcile::{
    add_token, clean_token, import_tokens, remove_token, save_token_values, ImportOutcome,
    ImportRequest, ImportSummary,
};
pub use renderer::{register_tokens, ShortcodeHandler, ShortcodeRegistry};
pub use sanitize::sanitize_text;
pub use store::{StoreError, TokenStore, DEFAULT_OPTION_NAME};
pub use types::{
    find_colliding, fold_name, to_tokens, validate_name, Token, TokenData, TokenError, TokenMap,
};
