// src/types/mod.rs
//! Small domain types shared across the crate: validated identifiers,
//! credentials, and the validation failure vocabulary.

mod domain_types;
mod ids;

pub use domain_types::{ApiKey, ValidatedUrl};
pub use ids::NotionId;

use thiserror::Error;

/// Validation failures for domain newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid ID: {0}")]
    InvalidId(String),

    #[error("Invalid API key: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
