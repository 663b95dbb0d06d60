//! Derived meteorological quantities
//!
//! Every formula here is a pure function of one reading's values. Formulas
//! with a bounded validity domain return `Result<_, FormulaError>`; a
//! domain failure means "not applicable for this reading", and callers omit
//! the corresponding output field rather than failing the whole record.
//!
//! The Fahrenheit and Celsius entry points are evaluated and validated
//! independently, so one scale may produce a value while the other does not.
//!
//! ## Formula background
//!
//! ### Dew point (Magnus approximation)
//!
//! ```text
//! γ(T,RH) = ln(RH/100) + (b × T)/(c + T)
//! Td = (c × γ)/(b − γ)
//!
//! b = 17.62, c = 243.12 °C   (Sonntag 1990)
//! ```
//!
//! Total over physically sensible inputs; RH = 0 degenerates to −∞, which
//! real sensors never report.
//!
//! ### Heat index (Rothfusz regression)
//!
//! NWS regression of apparent temperature against temperature and humidity.
//! Only defined for warm, humid air: T ≥ 80 °F and RH ≥ 40 %.
//!
//! ### Wind chill (NWS 2001)
//!
//! ```text
//! WC = 35.74 + 0.6215·T − 35.75·V^0.16 + 0.4275·T·V^0.16
//! ```
//!
//! T in °F, V in mph. Only defined for cold, windy air: T ≤ 50 °F and
//! V > 3 mph.
//!
//! ### Wet-bulb temperature (Stull 2011)
//!
//! Closed-form approximation to the psychrometric wet-bulb temperature,
//! accurate to ~0.3 °C inside its published domain of RH 5–99 % and
//! T −20…50 °C.

use thiserror::Error;

use crate::units::{RelHumidity, SpeedMph, TempC, TempF};

/// Result type for formula evaluations with a bounded validity domain
pub type FormulaResult<T> = Result<T, FormulaError>;

/// A formula input fell outside the formula's validity domain
///
/// This is the "not applicable" outcome: the reading is fine, the derived
/// quantity simply is not defined for it.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FormulaError {
    /// Input outside the range the formula is defined over
    #[error("input {value} outside valid range [{min}, {max}]")]
    OutOfRange {
        /// The offending input value
        value: f64,
        /// Lower bound of the validity domain
        min: f64,
        /// Upper bound of the validity domain
        max: f64,
    },
}

// Magnus constants (Sonntag 1990)
const MAGNUS_B: f64 = 17.62;
const MAGNUS_C: f64 = 243.12;

/// Heat index is undefined below this temperature (°F)
pub const HEAT_INDEX_MIN_TEMP_F: f64 = 80.0;

/// Heat index is undefined below this relative humidity (%)
pub const HEAT_INDEX_MIN_RH: f64 = 40.0;

/// Wind chill is undefined above this temperature (°F)
pub const WIND_CHILL_MAX_TEMP_F: f64 = 50.0;

/// Wind chill is undefined at or below this wind speed (mph)
pub const WIND_CHILL_MIN_WIND_MPH: f64 = 3.0;

/// Stull wet-bulb domain bounds
const WET_BULB_MIN_TEMP_C: f64 = -20.0;
const WET_BULB_MAX_TEMP_C: f64 = 50.0;
const WET_BULB_MIN_RH: f64 = 5.0;
const WET_BULB_MAX_RH: f64 = 99.0;

/// Dew point in Celsius via the Magnus approximation
pub fn dew_point_c(temp: TempC, rh: RelHumidity) -> TempC {
    let gamma = (rh.0 / 100.0).ln() + (MAGNUS_B * temp.0) / (MAGNUS_C + temp.0);
    TempC((MAGNUS_C * gamma) / (MAGNUS_B - gamma))
}

/// Dew point in Fahrenheit via the Magnus approximation
pub fn dew_point_f(temp: TempF, rh: RelHumidity) -> TempF {
    dew_point_c(temp.c(), rh).f()
}

/// Recommended maximum indoor relative humidity for a given outdoor
/// temperature
///
/// Step function per standard condensation-avoidance guidance: the colder it
/// is outside, the less moisture indoor air can carry before condensing on
/// windows and exterior walls. Total over all temperatures.
pub fn indoor_humidity_recommendation_f(outdoor: TempF) -> RelHumidity {
    let pct = if outdoor.0 >= 50.0 {
        50.0
    } else if outdoor.0 >= 40.0 {
        45.0
    } else if outdoor.0 >= 30.0 {
        40.0
    } else if outdoor.0 >= 20.0 {
        35.0
    } else if outdoor.0 >= 10.0 {
        30.0
    } else if outdoor.0 >= 0.0 {
        25.0
    } else if outdoor.0 >= -10.0 {
        20.0
    } else {
        15.0
    };
    RelHumidity(pct)
}

/// Recommended maximum indoor relative humidity, Celsius entry point
pub fn indoor_humidity_recommendation_c(outdoor: TempC) -> RelHumidity {
    indoor_humidity_recommendation_f(outdoor.f())
}

/// Wet-bulb temperature in Celsius (Stull 2011 approximation)
pub fn wet_bulb_c(temp: TempC, rh: RelHumidity) -> FormulaResult<TempC> {
    check_range(temp.0, WET_BULB_MIN_TEMP_C, WET_BULB_MAX_TEMP_C)?;
    check_range(rh.0, WET_BULB_MIN_RH, WET_BULB_MAX_RH)?;

    let t = temp.0;
    let h = rh.0;
    let tw = t * (0.151977 * (h + 8.313659).sqrt()).atan() + (t + h).atan()
        - (h - 1.676331).atan()
        + 0.00391838 * h.powf(1.5) * (0.023101 * h).atan()
        - 4.686035;
    Ok(TempC(tw))
}

/// Wet-bulb temperature in Fahrenheit (Stull 2011 approximation)
///
/// Validated against the same underlying Celsius domain.
pub fn wet_bulb_f(temp: TempF, rh: RelHumidity) -> FormulaResult<TempF> {
    wet_bulb_c(temp.c(), rh).map(TempC::f)
}

/// Heat index in Fahrenheit (Rothfusz regression)
pub fn heat_index_f(temp: TempF, rh: RelHumidity) -> FormulaResult<TempF> {
    if temp.0 < HEAT_INDEX_MIN_TEMP_F {
        return Err(FormulaError::OutOfRange {
            value: temp.0,
            min: HEAT_INDEX_MIN_TEMP_F,
            max: f64::INFINITY,
        });
    }
    if rh.0 < HEAT_INDEX_MIN_RH {
        return Err(FormulaError::OutOfRange {
            value: rh.0,
            min: HEAT_INDEX_MIN_RH,
            max: 100.0,
        });
    }

    let t = temp.0;
    let h = rh.0;
    let hi = -42.379 + 2.04901523 * t + 10.14333127 * h
        - 0.22475541 * t * h
        - 6.83783e-3 * t * t
        - 5.481717e-2 * h * h
        + 1.22874e-3 * t * t * h
        + 8.5282e-4 * t * h * h
        - 1.99e-6 * t * t * h * h;
    Ok(TempF(hi))
}

/// Heat index in Celsius
///
/// Evaluated through the Fahrenheit regression and converted back.
pub fn heat_index_c(temp: TempC, rh: RelHumidity) -> FormulaResult<TempC> {
    heat_index_f(temp.f(), rh).map(TempF::c)
}

/// Wind chill in Fahrenheit (NWS 2001 formula)
pub fn wind_chill_f(temp: TempF, wind: SpeedMph) -> FormulaResult<TempF> {
    if temp.0 > WIND_CHILL_MAX_TEMP_F {
        return Err(FormulaError::OutOfRange {
            value: temp.0,
            min: f64::NEG_INFINITY,
            max: WIND_CHILL_MAX_TEMP_F,
        });
    }
    if wind.0 <= WIND_CHILL_MIN_WIND_MPH {
        return Err(FormulaError::OutOfRange {
            value: wind.0,
            min: WIND_CHILL_MIN_WIND_MPH,
            max: f64::INFINITY,
        });
    }

    let t = temp.0;
    let v = wind.0.powf(0.16);
    Ok(TempF(35.74 + 0.6215 * t - 35.75 * v + 0.4275 * t * v))
}

/// Wind chill in Celsius
///
/// Evaluated through the Fahrenheit formula and converted back; wind speed
/// stays in mph.
pub fn wind_chill_c(temp: TempC, wind: SpeedMph) -> FormulaResult<TempC> {
    wind_chill_f(temp.f(), wind).map(TempF::c)
}

fn check_range(value: f64, min: f64, max: f64) -> FormulaResult<()> {
    if value < min || value > max {
        Err(FormulaError::OutOfRange { value, min, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dew_point_known_values() {
        // 20°C at 50% RH gives a dew point near 9.3°C
        let dp = dew_point_c(TempC(20.0), RelHumidity(50.0));
        assert!((dp.0 - 9.26).abs() < 0.1, "got {}", dp.0);

        // Saturated air: dew point equals air temperature
        let dp = dew_point_c(TempC(15.0), RelHumidity(100.0));
        assert!((dp.0 - 15.0).abs() < 1e-9);
    }

    #[test]
    fn dew_point_scales_agree() {
        let f = dew_point_f(TempF(68.0), RelHumidity(50.0));
        let c = dew_point_c(TempC(20.0), RelHumidity(50.0));
        assert!((f.c().0 - c.0).abs() < 1e-9);
    }

    #[test]
    fn heat_index_inside_domain() {
        // 86°F at 70% RH is oppressively humid; HI should exceed air temp
        let hi = heat_index_f(TempF(86.0), RelHumidity(70.0)).unwrap();
        assert!(hi.0 > 86.0);
        assert!((hi.0 - 94.6).abs() < 1.5, "got {}", hi.0);
    }

    #[test]
    fn heat_index_below_thresholds() {
        assert!(heat_index_f(TempF(79.9), RelHumidity(80.0)).is_err());
        assert!(heat_index_f(TempF(90.0), RelHumidity(39.9)).is_err());
        // Boundary values are inside the domain
        assert!(heat_index_f(TempF(80.0), RelHumidity(40.0)).is_ok());
    }

    #[test]
    fn heat_index_celsius_path() {
        let c = heat_index_c(TempC(30.0), RelHumidity(70.0)).unwrap();
        let f = heat_index_f(TempC(30.0).f(), RelHumidity(70.0)).unwrap();
        assert!((c.f().0 - f.0).abs() < 1e-9);
        // 20°C is 68°F, well below the 80°F floor
        assert!(heat_index_c(TempC(20.0), RelHumidity(50.0)).is_err());
    }

    #[test]
    fn wind_chill_inside_domain() {
        // NWS reference point: 30°F with 10 mph wind is about 21°F
        let wc = wind_chill_f(TempF(30.0), SpeedMph(10.0)).unwrap();
        assert!((wc.0 - 21.2).abs() < 0.5, "got {}", wc.0);
        assert!(wc.0 < 30.0);
    }

    #[test]
    fn wind_chill_outside_domain() {
        // Too warm
        assert!(wind_chill_f(TempF(50.1), SpeedMph(10.0)).is_err());
        // Calm air, including the 3 mph boundary itself
        assert!(wind_chill_f(TempF(30.0), SpeedMph(3.0)).is_err());
        assert!(wind_chill_f(TempF(30.0), SpeedMph(0.0)).is_err());
        // 50°F exactly is still defined
        assert!(wind_chill_f(TempF(50.0), SpeedMph(10.0)).is_ok());
    }

    #[test]
    fn wet_bulb_known_value() {
        // 20°C at 50% RH: Stull gives roughly 13.7°C
        let wb = wet_bulb_c(TempC(20.0), RelHumidity(50.0)).unwrap();
        assert!((wb.0 - 13.7).abs() < 0.5, "got {}", wb.0);
        // Wet bulb never exceeds dry bulb
        assert!(wb.0 < 20.0);
    }

    #[test]
    fn wet_bulb_domain_bounds() {
        assert!(wet_bulb_c(TempC(-25.0), RelHumidity(50.0)).is_err());
        assert!(wet_bulb_c(TempC(55.0), RelHumidity(50.0)).is_err());
        assert!(wet_bulb_c(TempC(20.0), RelHumidity(4.0)).is_err());
        assert!(wet_bulb_c(TempC(20.0), RelHumidity(99.5)).is_err());
        assert!(wet_bulb_c(TempC(-20.0), RelHumidity(5.0)).is_ok());
        assert!(wet_bulb_c(TempC(50.0), RelHumidity(99.0)).is_ok());
    }

    #[test]
    fn indoor_humidity_steps() {
        assert_eq!(indoor_humidity_recommendation_f(TempF(60.0)).0, 50.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(50.0)).0, 50.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(45.0)).0, 45.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(35.0)).0, 40.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(25.0)).0, 35.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(15.0)).0, 30.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(5.0)).0, 25.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(-5.0)).0, 20.0);
        assert_eq!(indoor_humidity_recommendation_f(TempF(-30.0)).0, 15.0);
    }

    #[test]
    fn indoor_humidity_monotone_in_temperature() {
        let mut prev = 0.0;
        for t in -40..=70 {
            let r = indoor_humidity_recommendation_f(TempF(t as f64)).0;
            assert!(r >= prev, "recommendation decreased at {t}°F");
            prev = r;
        }
    }
}
