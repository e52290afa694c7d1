use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::normalize::TimeZoneRules;
use crate::types::DuplicateHeaderPolicy;

use super::observability::NormalizeObserver;

/// Text written before the original row on the diagnostic channel.
pub const DROP_DIAGNOSTIC_PREFIX: &str = "Dropped the following row due to error: ";

/// Header names of the columns the pipeline rewrites.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub timestamp: String,
    pub zip: String,
    pub full_name: String,
    pub foo_duration: String,
    pub bar_duration: String,
    /// Receives `foo_duration + bar_duration`.
    pub total_duration: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            timestamp: "Timestamp".to_string(),
            zip: "ZIP".to_string(),
            full_name: "FullName".to_string(),
            foo_duration: "FooDuration".to_string(),
            bar_duration: "BarDuration".to_string(),
            total_duration: "TotalDuration".to_string(),
        }
    }
}

/// Options controlling a normalization run.
///
/// [`Default`] reproduces the standard behavior: Pacific → Eastern timestamps resolved toward
/// daylight time, the standard column names, last-wins duplicate headers, and drop
/// diagnostics on stderr.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Source/target zones and the ambiguous-time policy.
    pub time_zones: TimeZoneRules,
    /// Which header names to normalize.
    pub columns: ColumnNames,
    /// What to do when the header repeats a name.
    pub duplicate_headers: DuplicateHeaderPolicy,
    /// Prefix of every drop diagnostic line.
    pub diagnostic_prefix: String,
    /// Receives drop diagnostics and run events. If `None`, a
    /// [`super::observability::StdErrObserver`] is used.
    #[serde(skip)]
    pub observer: Option<Arc<dyn NormalizeObserver>>,
}

impl fmt::Debug for NormalizeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizeOptions")
            .field("time_zones", &self.time_zones)
            .field("columns", &self.columns)
            .field("duplicate_headers", &self.duplicate_headers)
            .field("diagnostic_prefix", &self.diagnostic_prefix)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            time_zones: TimeZoneRules::default(),
            columns: ColumnNames::default(),
            duplicate_headers: DuplicateHeaderPolicy::default(),
            diagnostic_prefix: DROP_DIAGNOSTIC_PREFIX.to_string(),
            observer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NormalizeOptions, DROP_DIAGNOSTIC_PREFIX};
    use crate::normalize::{AmbiguityPolicy, SOURCE_ZONE, TARGET_ZONE};
    use crate::types::DuplicateHeaderPolicy;

    #[test]
    fn defaults_match_standard_behavior() {
        let opts = NormalizeOptions::default();
        assert_eq!(opts.time_zones.source, SOURCE_ZONE);
        assert_eq!(opts.time_zones.target, TARGET_ZONE);
        assert_eq!(opts.time_zones.ambiguity, AmbiguityPolicy::PreferDaylight);
        assert_eq!(opts.columns.zip, "ZIP");
        assert_eq!(opts.duplicate_headers, DuplicateHeaderPolicy::LastWins);
        assert_eq!(opts.diagnostic_prefix, DROP_DIAGNOSTIC_PREFIX);
        assert!(opts.observer.is_none());
    }

    #[test]
    fn debug_hides_observer() {
        let rendered = format!("{:?}", NormalizeOptions::default());
        assert!(rendered.contains("observer_set: false"));
    }
}
