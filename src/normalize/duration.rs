//! Duration parsing: `HH:MM:SS.ms` to seconds.

use crate::error::{NormalizeError, NormalizeResult};

/// Parse a colon-separated duration into seconds.
///
/// The input must have exactly three components. Hours and minutes are integers, seconds
/// may carry a fractional part. Surrounding whitespace within a component is ignored.
///
/// ```
/// use csv_normalizer::normalize::normalize_duration;
///
/// assert_eq!(normalize_duration("01:02:03.5").unwrap(), 3723.5);
/// ```
pub fn normalize_duration(raw: &str) -> NormalizeResult<f64> {
    let format_err = |message: String| NormalizeError::Format {
        what: "duration",
        raw: raw.to_owned(),
        message,
    };

    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(format_err(format!(
            "expected HH:MM:SS.ms, found {} component(s)",
            parts.len()
        )));
    };

    let hours: i64 = hours
        .parse()
        .map_err(|e| format_err(format!("hours: {e}")))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|e| format_err(format!("minutes: {e}")))?;
    let seconds: f64 = seconds
        .parse()
        .map_err(|e| format_err(format!("seconds: {e}")))?;

    let total = seconds + (minutes as f64) * 60.0 + (hours as f64) * 3600.0;
    if !total.is_finite() {
        return Err(format_err("duration is not a finite number".to_string()));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::normalize_duration;
    use crate::error::NormalizeError;

    #[test]
    fn sums_components() {
        assert_eq!(normalize_duration("01:02:03.5").unwrap(), 3723.5);
        assert_eq!(normalize_duration("00:00:00.0").unwrap(), 0.0);
        assert_eq!(normalize_duration("2:00:00.25").unwrap(), 7200.25);
    }

    #[test]
    fn accepts_whole_seconds_and_large_hours() {
        assert_eq!(normalize_duration("00:01:30").unwrap(), 90.0);
        assert_eq!(normalize_duration("111:00:00.000").unwrap(), 399_600.0);
    }

    #[test]
    fn rejects_wrong_component_count() {
        for raw in ["", "01:02", "01:02:03:04", "3723.5"] {
            let err = normalize_duration(raw).unwrap_err();
            assert!(
                matches!(err, NormalizeError::Format { what: "duration", .. }),
                "{raw:?}: {err}"
            );
        }
    }

    #[test]
    fn rejects_unparseable_components() {
        for raw in ["aa:02:03.5", "01:2.5:03", "01:02:zz", "01:02:inf"] {
            assert!(normalize_duration(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn output_is_not_valid_input() {
        let once = normalize_duration("01:02:03.5").unwrap();
        assert!(normalize_duration(&format!("{once:?}")).is_err());
    }
}
