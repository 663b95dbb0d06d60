//! Per-model decoders and the model dispatcher
//!
//! Each supported sensor model gets one decoder module with a strongly-typed
//! reading struct. The dispatcher inspects the raw message's `model` string
//! and routes to the matching decoder; the set of supported models is a
//! closed match, so adding a model is a compile-checked change here rather
//! than a string table somewhere else.
//!
//! Dispatch, decode, and enrichment are pure functions of the one input
//! message: no shared state, no I/O, safe to run for any number of messages
//! concurrently.

pub mod acurite6045m;
pub mod vevor7in1;

pub use acurite6045m::Acurite6045mReading;
pub use vevor7in1::Vevor7in1Reading;

use crate::errors::{EnrichError, EnrichResult};
use crate::record::EnrichedRecord;

/// Model identifier emitted by rtl_433 for the Acurite 6045M lightning sensor
pub const MODEL_ACURITE_6045M: &str = "Acurite-6045M";

/// Model identifier emitted by rtl_433 for the Vevor 7-in-1 weather station
pub const MODEL_VEVOR_7IN1: &str = "Vevor-7in1";

/// A decoded reading from any supported sensor model
#[derive(Debug, Clone, PartialEq)]
pub enum SensorReading {
    /// Acurite 6045M temperature/humidity/lightning sensor
    Acurite6045m(Acurite6045mReading),
    /// Vevor 7-in-1 weather station
    Vevor7in1(Vevor7in1Reading),
}

impl SensorReading {
    /// Decode a raw message whose model has already been classified
    ///
    /// Fails with [`EnrichError::UnsupportedModel`] for unknown model
    /// strings (exact, case-sensitive match) and [`EnrichError::Decode`]
    /// when required model-specific fields are missing or mistyped. The
    /// decode is all-or-nothing.
    pub fn decode(model: &str, raw: &serde_json::Value) -> EnrichResult<Self> {
        match model {
            MODEL_ACURITE_6045M => Acurite6045mReading::decode(raw).map(Self::Acurite6045m),
            MODEL_VEVOR_7IN1 => Vevor7in1Reading::decode(raw).map(Self::Vevor7in1),
            other => Err(EnrichError::UnsupportedModel(other.to_owned())),
        }
    }

    /// Assemble the flat enriched record for this reading
    ///
    /// Total over well-formed readings: formula-domain failures degrade to
    /// omission of the affected field, never to an error.
    pub fn enrich(&self) -> EnrichedRecord {
        match self {
            Self::Acurite6045m(r) => r.enrich(),
            Self::Vevor7in1(r) => r.enrich(),
        }
    }
}

/// Classify, decode, and enrich one raw message
///
/// The single entry point the transport layer calls per delivery. The raw
/// value is only read; nothing is retained across calls.
pub fn enrich_message(raw: &serde_json::Value) -> EnrichResult<EnrichedRecord> {
    let obj = raw.as_object().ok_or(EnrichError::MalformedMessage {
        reason: "message is not a JSON object",
    })?;
    let model = obj
        .get("model")
        .ok_or(EnrichError::MalformedMessage {
            reason: "missing 'model' field",
        })?
        .as_str()
        .ok_or(EnrichError::MalformedMessage {
            reason: "'model' field is not a string",
        })?;

    Ok(SensorReading::decode(model, raw)?.enrich())
}
