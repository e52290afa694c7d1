//! Field normalizers.
//!
//! Each normalizer is a pure function over one cell:
//!
//! - [`normalize_timestamp()`]: `06/15/23 02:30:00 PM` (Pacific) → `2023-06-15T17:30:00-04:00` (Eastern)
//! - [`normalize_zip()`]: `501` → `00501`
//! - [`normalize_name()`]: `jane doe` → `JANE DOE`
//! - [`normalize_duration()`]: `01:02:03.5` → `3723.5`
//!
//! Zip and name normalization are idempotent. Timestamp and duration normalization are not:
//! their output is a different format from their input.

pub mod duration;
pub mod name;
pub mod timestamp;
pub mod zip;

pub use duration::normalize_duration;
pub use name::normalize_name;
pub use timestamp::{
    normalize_timestamp, normalize_timestamp_default, AmbiguityPolicy, TimeZoneRules, SOURCE_ZONE, TARGET_ZONE,
    TIMESTAMP_FORMAT,
};
pub use zip::{normalize_zip, ZIP_WIDTH};

/// Render a seconds value the way the output stream carries it.
///
/// Whole numbers keep a trailing `.0` (`90.0`), everything else uses the shortest
/// representation that reads back to the same value. Values below `1e-4` or from `1e16` up
/// use an exponent with an explicit sign and at least two digits (`1e-05`, `1.5e+16`).
pub fn format_seconds(value: f64) -> String {
    let shortest = format!("{value:?}");
    let Some((mantissa, exponent)) = shortest.split_once('e') else {
        return shortest;
    };
    match exponent.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        Err(_) => shortest,
    }
}
