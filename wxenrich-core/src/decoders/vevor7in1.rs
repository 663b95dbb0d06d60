//! Vevor 7-in-1 weather station
//!
//! Messages arrive as rtl_433 JSON (`-F json -M time:iso:utc:tz`). Only the
//! fields enrichment needs are decoded. The station's barometric pressure
//! sensor lives in the indoor display unit and never appears in these
//! messages.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::{EnrichError, EnrichResult};
use crate::formulas;
use crate::record::{EnrichedRecord, Value};
use crate::units::{RelHumidity, SpeedKmH, TempC};

use super::MODEL_VEVOR_7IN1;

/// Decoded Vevor 7-in-1 reading
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vevor7in1Reading {
    /// Relative humidity, percent, as supplied by the sensor
    pub humidity: f64,
    /// Accumulated rain in millimeters
    pub rain_mm: f64,
    /// Temperature in Celsius
    #[serde(rename = "temperature_C")]
    pub temperature_c: f64,
    /// UV index
    pub uv: i64,
    /// Average wind speed in km/h
    pub wind_avg_km_h: f64,
    /// Wind direction in degrees, 0–360
    pub wind_dir_deg: f64,
    /// Max (gust) wind speed in km/h
    pub wind_max_km_h: f64,
    /// Message timestamp, passed through unmodified
    pub time: DateTime<Utc>,
    /// Model identifier, carried as a classification tag
    pub model: String,
    /// Numeric sensor ID, carried as a classification tag
    pub id: i64,
}

impl Vevor7in1Reading {
    /// All-or-nothing decode of a raw rtl_433 message
    pub fn decode(raw: &serde_json::Value) -> EnrichResult<Self> {
        serde_json::from_value(raw.clone()).map_err(|source| EnrichError::Decode {
            model: MODEL_VEVOR_7IN1,
            source,
        })
    }

    /// Build the enriched record for this reading
    pub fn enrich(&self) -> EnrichedRecord {
        let temp_c = TempC(self.temperature_c);
        let temp_f = temp_c.f();
        let rh = RelHumidity(self.humidity);
        let wind_avg = SpeedKmH(self.wind_avg_km_h);
        let wind_max = SpeedKmH(self.wind_max_km_h);

        let mut rec = EnrichedRecord::new();
        rec.set_time(self.time);
        rec.set_tag("t_model", Value::Str(self.model.clone()));
        rec.set_tag("t_id", Value::Int(self.id));

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

        rec.set_field("f_rain_cm", self.rain_mm / 10.0);
        rec.set_field("f_rain_in", self.rain_mm / 25.4);

        rec.set_field("f_wind_bearing", self.wind_dir_deg);
        rec.set_field("f_wind_speed_mph", wind_avg.mph().0);
        rec.set_field("f_wind_speed_kmh", wind_avg.0);
        rec.set_field("f_wind_speed_kt", wind_avg.knots().0);
        rec.set_field("f_wind_gust_mph", wind_max.mph().0);
        rec.set_field("f_wind_gust_kmh", wind_max.0);
        rec.set_field("f_wind_gust_kt", wind_max.knots().0);

        if let Ok(wc) = formulas::wind_chill_f(temp_f, wind_avg.mph()) {
            rec.set_field("f_wind_chill_f", wc.0);
        }
        if let Ok(wc) = formulas::wind_chill_c(temp_c, wind_avg.mph()) {
            rec.set_field("f_wind_chill_c", wc.0);
        }

        rec
    }
}
