//! Mood Journal Storage
//!
//! Keeps classified journal entries in one JSON file:
//! - `persist` appends an entry with the next id and the current UTC time
//! - `recent` returns the newest entries first
//! - a missing, empty or corrupt file reads as an empty journal
//!
//! Writers within one process are serialized; every write goes to a
//! temporary file that is then renamed over the journal.

pub mod config;
pub mod entry;
pub mod store;

pub use config::StorageConfig;
pub use entry::JournalEntry;
pub use store::JournalStore;
