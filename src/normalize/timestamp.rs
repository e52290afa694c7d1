//! Timestamp normalization: local 12-hour timestamps re-expressed in another civil time zone.

use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, SecondsFormat, TimeDelta, TimeZone, Timelike};
use chrono_tz::{OffsetComponents, Tz, TzOffset};
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, NormalizeResult, TimeAnomaly};

/// Accepted input shape: `month/day/year hour:minute:second AM|PM`, two-digit year.
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%y %I:%M:%S %p";

/// Zone the input wall-clock times were recorded in.
pub const SOURCE_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Zone the output timestamps are expressed in.
pub const TARGET_ZONE: Tz = chrono_tz::America::New_York;

/// How to resolve a source-zone wall-clock time that maps to zero or two instants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Overlaps resolve to the daylight-saving instant; gaps are read with the daylight offset.
    #[default]
    PreferDaylight,
    /// Overlaps resolve to the standard-time instant; gaps are read with the standard offset.
    PreferStandard,
    /// Overlaps and gaps fail with [`NormalizeError::UnresolvableTime`].
    Reject,
}

/// Source/target zones plus the disambiguation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeZoneRules {
    pub source: Tz,
    pub target: Tz,
    pub ambiguity: AmbiguityPolicy,
}

impl Default for TimeZoneRules {
    fn default() -> Self {
        Self {
            source: SOURCE_ZONE,
            target: TARGET_ZONE,
            ambiguity: AmbiguityPolicy::default(),
        }
    }
}

/// Parse `raw` as a source-zone wall-clock time and format it as RFC 3339 in the target zone.
///
/// The output has whole seconds and a numeric offset, e.g. `2023-06-15T17:30:00-04:00`.
/// The output is not accepted back as input.
pub fn normalize_timestamp(raw: &str, rules: &TimeZoneRules) -> NormalizeResult<String> {
    let naive = parse_local(raw)?;
    let local = localize(raw, naive, rules.source, rules.ambiguity)?;
    Ok(local
        .with_timezone(&rules.target)
        .to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// [`normalize_timestamp`] with the default zones and policy.
pub fn normalize_timestamp_default(raw: &str) -> NormalizeResult<String> {
    normalize_timestamp(raw, &TimeZoneRules::default())
}

/// Parse `raw` with [`TIMESTAMP_FORMAT`], stricter than chrono alone.
///
/// The three parts must be separated by whitespace and contain none themselves (chrono lets a
/// format space match nothing and skips blanks before numbers). Leap seconds are rejected.
fn parse_local(raw: &str) -> NormalizeResult<NaiveDateTime> {
    let format_err = |message: String| NormalizeError::Format {
        what: "timestamp",
        raw: raw.to_owned(),
        message,
    };

    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [date, time, marker] = parts.as_slice() else {
        return Err(format_err(format!(
            "expected date, time and AM/PM separated by whitespace, found {} part(s)",
            parts.len()
        )));
    };
    if raw.trim() != raw {
        return Err(format_err("leading or trailing whitespace".to_string()));
    }

    let naive = NaiveDateTime::parse_from_str(&format!("{date} {time} {marker}"), TIMESTAMP_FORMAT)
        .map_err(|e| format_err(e.to_string()))?;
    if naive.nanosecond() >= 1_000_000_000 {
        return Err(format_err("second must be in 0..59".to_string()));
    }
    Ok(naive)
}

fn localize(raw: &str, naive: NaiveDateTime, zone: Tz, policy: AmbiguityPolicy) -> NormalizeResult<DateTime<Tz>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(a, b) => {
            let (daylight, standard) = if is_daylight(a.offset()) { (a, b) } else { (b, a) };
            match policy {
                AmbiguityPolicy::PreferDaylight => Ok(daylight),
                AmbiguityPolicy::PreferStandard => Ok(standard),
                AmbiguityPolicy::Reject => Err(unresolvable(raw, zone, TimeAnomaly::Ambiguous)),
            }
        }
        LocalResult::None => {
            let want_daylight = match policy {
                AmbiguityPolicy::PreferDaylight => true,
                AmbiguityPolicy::PreferStandard => false,
                AmbiguityPolicy::Reject => return Err(unresolvable(raw, zone, TimeAnomaly::Nonexistent)),
            };

            // Offsets in effect on either side of the gap.
            let before = zone.offset_from_utc_datetime(&(naive - TimeDelta::days(1)));
            let after = zone.offset_from_utc_datetime(&(naive + TimeDelta::days(1)));
            let offset = if is_daylight(&before) == want_daylight { before } else { after };

            let utc = naive - TimeDelta::seconds(i64::from(offset.fix().local_minus_utc()));
            Ok(zone.from_utc_datetime(&utc))
        }
    }
}

fn is_daylight(offset: &TzOffset) -> bool {
    !offset.dst_offset().is_zero()
}

fn unresolvable(raw: &str, zone: Tz, kind: TimeAnomaly) -> NormalizeError {
    NormalizeError::UnresolvableTime {
        raw: raw.to_owned(),
        zone: zone.name().to_owned(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_timestamp, normalize_timestamp_default, AmbiguityPolicy, TimeZoneRules};
    use crate::error::{NormalizeError, TimeAnomaly};

    fn with_policy(ambiguity: AmbiguityPolicy) -> TimeZoneRules {
        TimeZoneRules {
            ambiguity,
            ..TimeZoneRules::default()
        }
    }

    #[test]
    fn summer_pacific_to_eastern() {
        assert_eq!(
            normalize_timestamp_default("06/15/23 02:30:00 PM").unwrap(),
            "2023-06-15T17:30:00-04:00"
        );
    }

    #[test]
    fn winter_pacific_to_eastern() {
        assert_eq!(
            normalize_timestamp_default("01/15/23 09:00:00 AM").unwrap(),
            "2023-01-15T12:00:00-05:00"
        );
    }

    #[test]
    fn conversion_can_cross_midnight_and_year() {
        assert_eq!(
            normalize_timestamp_default("12/31/22 11:59:59 PM").unwrap(),
            "2023-01-01T02:59:59-05:00"
        );
        assert_eq!(
            normalize_timestamp_default("07/04/23 12:00:00 AM").unwrap(),
            "2023-07-04T03:00:00-04:00"
        );
    }

    #[test]
    fn fall_back_overlap_follows_policy() {
        let raw = "11/05/23 01:30:00 AM";
        assert_eq!(
            normalize_timestamp(raw, &with_policy(AmbiguityPolicy::PreferDaylight)).unwrap(),
            "2023-11-05T03:30:00-05:00"
        );
        assert_eq!(
            normalize_timestamp(raw, &with_policy(AmbiguityPolicy::PreferStandard)).unwrap(),
            "2023-11-05T04:30:00-05:00"
        );
        let err = normalize_timestamp(raw, &with_policy(AmbiguityPolicy::Reject)).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::UnresolvableTime { kind: TimeAnomaly::Ambiguous, .. }
        ));
    }

    #[test]
    fn spring_forward_gap_follows_policy() {
        let raw = "03/12/23 02:30:00 AM";
        assert_eq!(
            normalize_timestamp(raw, &with_policy(AmbiguityPolicy::PreferDaylight)).unwrap(),
            "2023-03-12T05:30:00-04:00"
        );
        assert_eq!(
            normalize_timestamp(raw, &with_policy(AmbiguityPolicy::PreferStandard)).unwrap(),
            "2023-03-12T06:30:00-04:00"
        );
        let err = normalize_timestamp(raw, &with_policy(AmbiguityPolicy::Reject)).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::UnresolvableTime { kind: TimeAnomaly::Nonexistent, .. }
        ));
    }

    #[test]
    fn zones_are_configurable() {
        let rules = TimeZoneRules {
            source: chrono_tz::Etc::UTC,
            target: chrono_tz::Asia::Tokyo,
            ambiguity: AmbiguityPolicy::Reject,
        };
        assert_eq!(
            normalize_timestamp("06/15/23 02:30:00 PM", &rules).unwrap(),
            "2023-06-15T23:30:00+09:00"
        );
    }

    #[test]
    fn rejects_other_shapes() {
        for raw in [
            "",
            "2023-06-15 14:30:00",
            "06/15/23 14:30:00 PM",
            "06/15/23 02:30:00",
            "13/15/23 02:30:00 PM",
            "06/15/23 02:30 PM",
            "06/15/23 02:30:60 PM",
            "06/15/23 02:30:61 PM",
            "06/15/2302:30:00PM",
            "06/15/2302:30:00 PM",
            "06/15/23 02:30:00PM",
            "06/ 15/23 02:30:00 PM",
            " 06/15/23 02:30:00 PM",
            "06/15/23 02:30:00 PM ",
        ] {
            let err = normalize_timestamp_default(raw).unwrap_err();
            assert!(
                matches!(err, NormalizeError::Format { what: "timestamp", .. }),
                "expected format error for {raw:?}, got {err}"
            );
        }
    }

    #[test]
    fn any_whitespace_run_separates_parts() {
        assert_eq!(
            normalize_timestamp_default("06/15/23  02:30:00\tPM").unwrap(),
            "2023-06-15T17:30:00-04:00"
        );
    }

    #[test]
    fn last_valid_second_is_accepted() {
        assert_eq!(
            normalize_timestamp_default("06/15/23 02:30:59 PM").unwrap(),
            "2023-06-15T17:30:59-04:00"
        );
    }

    #[test]
    fn output_is_not_valid_input() {
        let once = normalize_timestamp_default("06/15/23 02:30:00 PM").unwrap();
        assert!(normalize_timestamp_default(&once).is_err());
    }
}
