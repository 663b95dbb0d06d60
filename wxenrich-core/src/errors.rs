//! Error taxonomy for message enrichment
//!
//! Every failure here is recovered locally by the caller: the message is
//! logged and dropped, no partial record is produced, and nothing is fatal
//! to the process. Formula-domain failures are a separate, milder outcome
//! ([`crate::formulas::FormulaError`]) that only omits a single field.

use thiserror::Error;

/// Result type for enrichment operations
pub type EnrichResult<T> = Result<T, EnrichError>;

/// Reasons a raw message produces no enriched record
#[derive(Error, Debug)]
pub enum EnrichError {
    /// Input is not a JSON object, or its `model` field is missing or not a
    /// string
    #[error("malformed message: {reason}")]
    MalformedMessage {
        /// What was wrong with the message shape
        reason: &'static str,
    },

    /// The `model` string is not one this core knows how to decode
    #[error("unsupported model: {0}")]
    UnsupportedModel(String),

    /// Model recognized, but required model-specific fields are missing or
    /// mistyped
    #[error("failed to decode {model} message: {source}")]
    Decode {
        /// The model whose decoder rejected the message
        model: &'static str,
        /// The underlying deserialization failure
        #[source]
        source: serde_json::Error,
    },
}
