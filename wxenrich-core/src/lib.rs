//! Weather-sensor message enrichment core
//!
//! Takes one raw JSON telemetry message from an RF-decoding upstream
//! (rtl_433), classifies which physical sensor produced it, decodes the
//! model-specific fields, and computes a flat record of derived
//! meteorological quantities: unit conversions, dew point, heat index, wind
//! chill, wet bulb, storm distance.
//!
//! Everything in this crate is a pure, stateless function of one input
//! message: no I/O, no shared mutable state, nothing retained between
//! calls. The transport that feeds messages in and publishes records out
//! lives in `wxenrich-mqtt`.
//!
//! ```
//! use serde_json::json;
//! use wxenrich_core::enrich_message;
//!
//! let raw = json!({
//!     "time": "2024-01-01T00:00:00Z", "model": "Vevor-7in1", "id": 42,
//!     "temperature_C": 20.0, "humidity": 50, "rain_mm": 5.0, "uv": 3,
//!     "wind_avg_km_h": 10.0, "wind_dir_deg": 180, "wind_max_km_h": 15.0,
//! });
//! let record = enrich_message(&raw).unwrap();
//! assert_eq!(record.get("f_temp_f").unwrap().as_f64(), Some(68.0));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod decoders;
pub mod errors;
pub mod formulas;
pub mod record;
pub mod storm;
pub mod units;

// Public API
pub use decoders::{enrich_message, SensorReading};
pub use errors::{EnrichError, EnrichResult};
pub use record::{EnrichedRecord, Value};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
