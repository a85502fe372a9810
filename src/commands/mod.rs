//! Admin actions over the token store.
//!
//! - `actions`: typed actions and form-field decoding
//! - `messages`: result message keys/text and return pages
//! - `service`: TokenService, which runs actions against a TokenStore

mod actions;
mod messages;
mod service;

pub use actions::{ActionResponse, FormFields, TokenAction};
pub use messages::{message_text, AdminPage, Message, UNKNOWN_MESSAGE};
pub use service::{ServiceError, TokenService};
