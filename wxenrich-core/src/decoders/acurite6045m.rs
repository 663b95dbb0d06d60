//! Acurite 6045M temperature/humidity/lightning sensor
//!
//! Messages arrive as rtl_433 JSON (`-F json -M time:iso:utc:tz`). Only the
//! fields enrichment needs are decoded; everything else in the message is
//! ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::{EnrichError, EnrichResult};
use crate::formulas;
use crate::record::{EnrichedRecord, Value};
use crate::storm::{self, OUT_OF_RANGE_MI};
use crate::units::{RelHumidity, TempF};

use super::MODEL_ACURITE_6045M;

/// Decoded Acurite 6045M reading
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Acurite6045mReading {
    /// Relative humidity, percent, as supplied by the sensor
    pub humidity: f64,
    /// Lightning-strike distance bucket code, sensor-native
    #[serde(rename = "storm_distance")]
    pub storm_distance: i64,
    /// Temperature in Fahrenheit
    #[serde(rename = "temperature_F")]
    pub temperature_f: f64,
    /// Message timestamp, passed through unmodified
    pub time: DateTime<Utc>,
    /// Model identifier, carried as a classification tag
    pub model: String,
    /// Numeric sensor ID, carried as a classification tag
    pub id: i64,
}

impl Acurite6045mReading {
    /// All-or-nothing decode of a raw rtl_433 message
    pub fn decode(raw: &serde_json::Value) -> EnrichResult<Self> {
        serde_json::from_value(raw.clone()).map_err(|source| EnrichError::Decode {
            model: MODEL_ACURITE_6045M,
            source,
        })
    }

    /// Build the enriched record for this reading
    pub fn enrich(&self) -> EnrichedRecord {
        let temp_f = TempF(self.temperature_f);
        let temp_c = temp_f.c();
        let rh = RelHumidity(self.humidity);

        let mut rec = EnrichedRecord::new();
        rec.set_time(self.time);
        rec.set_tag("t_model", Value::Str(self.model.clone()));
        rec.set_tag("t_id", Value::Int(self.id));

        let dist_mi = storm::storm_distance_mi(self.storm_distance);
        // The sentinel must not be converted: -1 mi stays -1 km
        let dist_km = if dist_mi.0 == OUT_OF_RANGE_MI {
            OUT_OF_RANGE_MI
        } else {
            dist_mi.km().0
        };
        rec.set_field("f_storm_distance_mi", dist_mi.0);
        rec.set_field("f_storm_distance_km", dist_km);

        rec.set_field("f_temp_f", temp_f.0);
        rec.set_field("f_temp_c", temp_c.0);
        rec.set_field("f_rel_humidity", self.humidity);
        rec.set_field("f_dew_point_f", formulas::dew_point_f(temp_f, rh).0);
        rec.set_field("f_dew_point_c", formulas::dew_point_c(temp_c, rh).0);
        rec.set_field(
            "f_recommended_max_indoor_humidity",
            formulas::indoor_humidity_recommendation_f(temp_f).0,
        );

        if let Ok(wb) = formulas::wet_bulb_f(temp_f, rh) {
            rec.set_field("f_wet_bulb_f", wb.0);
        }
        if let Ok(wb) = formulas::wet_bulb_c(temp_c, rh) {
            rec.set_field("f_wet_bulb_c", wb.0);
        }
        if let Ok(hi) = formulas::heat_index_f(temp_f, rh) {
            rec.set_field("f_heat_index_f", hi.0);
        }
        if let Ok(hi) = formulas::heat_index_c(temp_c, rh) {
            rec.set_field("f_heat_index_c", hi.0);
        }

        rec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(storm_distance: i64) -> serde_json::Value {
        json!({
            "time": "2024-06-15T18:30:00Z",
            "model": "Acurite-6045M",
            "id": 1234,
            "humidity": 55.0,
            "storm_distance": storm_distance,
            "temperature_F": 72.5,
            "battery_ok": 1,
            "strike_count": 3
        })
    }

    #[test]
    fn decodes_and_ignores_extra_fields() {
        let reading = Acurite6045mReading::decode(&sample(13)).unwrap();
        assert_eq!(reading.id, 1234);
        assert_eq!(reading.storm_distance, 13);
        assert_eq!(reading.temperature_f, 72.5);
    }

    #[test]
    fn missing_field_fails_whole_decode() {
        let mut raw = sample(13);
        raw.as_object_mut().unwrap().remove("temperature_F");
        assert!(Acurite6045mReading::decode(&raw).is_err());
    }

    #[test]
    fn mistyped_field_fails_whole_decode() {
        let mut raw = sample(13);
        raw["storm_distance"] = json!("near");
        assert!(Acurite6045mReading::decode(&raw).is_err());
    }

    #[test]
    fn storm_distance_both_units() {
        let rec = Acurite6045mReading::decode(&sample(13)).unwrap().enrich();
        assert_eq!(rec.get("f_storm_distance_mi").unwrap().as_f64(), Some(9.67));
        let km = rec.get("f_storm_distance_km").unwrap().as_f64().unwrap();
        assert!((km - 9.67 * 1.609344).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_storm_distance_uses_sentinel_in_both_units() {
        let rec = Acurite6045mReading::decode(&sample(31)).unwrap().enrich();
        assert_eq!(rec.get("f_storm_distance_mi").unwrap().as_f64(), Some(-1.0));
        assert_eq!(rec.get("f_storm_distance_km").unwrap().as_f64(), Some(-1.0));
    }

    #[test]
    fn mild_reading_omits_heat_index_but_keeps_wet_bulb() {
        // 72.5°F is below the 80°F heat-index floor
        let rec = Acurite6045mReading::decode(&sample(13)).unwrap().enrich();
        assert!(!rec.contains("f_heat_index_f"));
        assert!(!rec.contains("f_heat_index_c"));
        assert!(rec.contains("f_wet_bulb_f"));
        assert!(rec.contains("f_wet_bulb_c"));
        assert!(rec.contains("f_dew_point_f"));
        assert_eq!(
            rec.get("f_recommended_max_indoor_humidity").unwrap().as_f64(),
            Some(50.0)
        );
    }

    #[test]
    fn tags_pass_through() {
        let rec = Acurite6045mReading::decode(&sample(0)).unwrap().enrich();
        assert_eq!(
            rec.get("t_model"),
            Some(&Value::Str("Acurite-6045M".into()))
        );
        assert_eq!(rec.get("t_id"), Some(&Value::Int(1234)));
    }
}
