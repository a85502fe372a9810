//! Storage backends for the token store.
//!
//! The token store treats its backend as a get/set blob store. Two backends
//! are provided:
//! - `MemoryStorage`: in-process map, for tests and embedding
//! - `FileStorage`: one JSON file per key, written atomically
//!
//! ## Usage
//!
//! ```ignore
//! use custom_tokens::storage::{FileStorage, OptionStorage};
//!
//! let storage = FileStorage::new("/var/lib/custom-tokens");
//! storage.set("custom_tokens_data", "{}")?;
//! ```

mod file;
mod memory;
mod traits;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use traits::{OptionStorage, StorageError};
