//! Typed unit wrappers and exact conversions
//!
//! Each physical quantity gets its own newtype over `f64`, so a Fahrenheit
//! temperature cannot be handed to a function expecting Celsius without an
//! explicit conversion. Conversions are exact total functions with no
//! validity domain.
//!
//! Conversion factors:
//!
//! ```text
//! C  = (F − 32) × 5/9
//! F  = C × 9/5 + 32
//! mph = km/h × 0.621371
//! kt  = km/h × 0.539957
//! km  = mi × 1.609344
//! ```

use serde::{Deserialize, Serialize};

/// km/h → mph
pub const KMH_TO_MPH: f64 = 0.621371;

/// km/h → knots
pub const KMH_TO_KNOTS: f64 = 0.539957;

/// statute miles → kilometers (exact by definition)
pub const MILES_TO_KM: f64 = 1.609344;

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempF(pub f64);

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempC(pub f64);

/// Wind speed in kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedKmH(pub f64);

/// Wind speed in statute miles per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedMph(pub f64);

/// Wind speed in knots
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedKnots(pub f64);

/// Distance in statute miles
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mile(pub f64);

/// Distance in kilometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Km(pub f64);

/// Relative humidity as a percentage
///
/// Carried exactly as the sensor supplied it; the core does not clamp or
/// reject values outside [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelHumidity(pub f64);

impl TempF {
    /// Convert to Celsius
    pub fn c(self) -> TempC {
        TempC((self.0 - 32.0) * 5.0 / 9.0)
    }
}

impl TempC {
    /// Convert to Fahrenheit
    pub fn f(self) -> TempF {
        TempF(self.0 * 9.0 / 5.0 + 32.0)
    }
}

impl SpeedKmH {
    /// Convert to miles per hour
    pub fn mph(self) -> SpeedMph {
        SpeedMph(self.0 * KMH_TO_MPH)
    }

    /// Convert to knots
    pub fn knots(self) -> SpeedKnots {
        SpeedKnots(self.0 * KMH_TO_KNOTS)
    }
}

impl Mile {
    /// Convert to kilometers
    pub fn km(self) -> Km {
        Km(self.0 * MILES_TO_KM)
    }
}
