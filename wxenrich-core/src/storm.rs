//! Storm-distance lookup for the Acurite 6045M lightning sensor
//!
//! The sensor reports lightning-strike distance as a bucket code 0–30 rather
//! than a physical distance. The AS3935 detector behind it bands strikes
//! into fixed distance estimates; this table maps each code to the distance
//! in statute miles the vendor documents for that band.
//!
//! The mapping is monotonically non-decreasing in the code. Codes outside
//! [0, 30] (the sensor emits 31 for "out of range") map to a −1 sentinel
//! rather than an error: the lookup is total with no failure mode.

use crate::units::Mile;

/// Sentinel distance for codes outside the table
pub const OUT_OF_RANGE_MI: f64 = -1.0;

/// Distance in miles per bucket code, codes 0 through 30
const STORM_DISTANCE_MI: [f64; 31] = [
    1.0,   // 0
    1.5,   // 1
    2.0,   // 2
    2.5,   // 3
    3.0,   // 4
    4.0,   // 5
    4.5,   // 6
    5.0,   // 7
    6.0,   // 8
    6.5,   // 9
    7.0,   // 10
    8.0,   // 11
    9.0,   // 12
    9.67,  // 13
    10.34, // 14
    11.0,  // 15
    11.5,  // 16
    12.0,  // 17
    13.0,  // 18
    14.0,  // 19
    15.0,  // 20
    16.0,  // 21
    17.0,  // 22
    18.0,  // 23
    19.0,  // 24
    20.0,  // 25
    21.0,  // 26
    22.0,  // 27
    23.0,  // 28
    24.0,  // 29
    25.0,  // 30
];

/// Map a storm-distance bucket code to statute miles
///
/// Returns [`OUT_OF_RANGE_MI`] for any code outside [0, 30], including
/// negative codes.
pub fn storm_distance_mi(code: i64) -> Mile {
    if !(0..=30).contains(&code) {
        return Mile(OUT_OF_RANGE_MI);
    }
    Mile(STORM_DISTANCE_MI[code as usize])
}
