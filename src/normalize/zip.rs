//! Zip code validation and zero-padding.

use crate::error::{NormalizeError, NormalizeResult};

/// Width of a normalized zip code.
pub const ZIP_WIDTH: usize = 5;

/// Validate a zip code and left-pad it with `0` to [`ZIP_WIDTH`] characters.
///
/// Rules:
///
/// - at most 5 characters, all ASCII digits
/// - nonzero when read as an integer, so `""`, `"0"` and `"00000"` are rejected
pub fn normalize_zip(raw: &str) -> NormalizeResult<String> {
    let invalid = |reason: &str| NormalizeError::Validation {
        column: "ZIP",
        raw: raw.to_owned(),
        reason: reason.to_owned(),
    };

    if raw.len() > ZIP_WIDTH {
        return Err(invalid("longer than 5 characters"));
    }
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("expected digits only"));
    }
    // All-zero codes are rejected along with everything that is not a positive integer.
    if raw.bytes().all(|b| b == b'0') {
        return Err(invalid("zip code is zero"));
    }

    Ok(format!("{raw:0>ZIP_WIDTH$}"))
}
