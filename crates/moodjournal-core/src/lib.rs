//! Mood Journal Core
//!
//! Types and error handling shared by every mood journal crate.
//!
//! This crate provides:
//! - The two label spaces (`MoodLabel`, `EnergyLabel`)
//! - The `ClassificationResult` pair returned by the classifier
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassificationResult, EnergyLabel, MoodLabel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassificationResult, EnergyLabel, MoodLabel};
}
