use thiserror::Error;

/// Convenience result type for normalization operations.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// How far an error reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Only the current record is discarded; the run continues.
    Row,
    /// The run cannot continue (stream failures, rejected header).
    Run,
}

/// Which local-time anomaly made a timestamp unresolvable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeAnomaly {
    /// The wall-clock time occurs twice (clocks fall back).
    Ambiguous,
    /// The wall-clock time never occurs (clocks spring forward).
    Nonexistent,
}

/// Error type returned by the normalizers and the row pipeline.
///
/// A single enum covers both row-level failures (which only drop the offending record) and
/// stream-level failures (which end the run). Use [`NormalizeError::severity`] to tell them
/// apart.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Underlying I/O error while reading input or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A timestamp or duration does not have the expected shape.
    #[error("invalid {what} '{raw}': {message}")]
    Format {
        what: &'static str,
        raw: String,
        message: String,
    },

    /// A local time that cannot be mapped to a single instant under the configured policy.
    #[error("{kind:?} local time '{raw}' in zone {zone}")]
    UnresolvableTime {
        raw: String,
        zone: String,
        kind: TimeAnomaly,
    },

    /// A value has the right shape but fails a content rule (e.g. zip codes).
    #[error("{column} value '{raw}' is not valid: {reason}")]
    Validation {
        column: &'static str,
        raw: String,
        reason: String,
    },

    /// A required column name is absent from the header.
    #[error("missing required column '{column}'. headers={headers:?}")]
    MissingColumn { column: String, headers: Vec<String> },

    /// The record is shorter than the header position of a required column.
    #[error("record has {len} fields, column '{column}' expects index {index}")]
    MissingField {
        column: String,
        index: usize,
        len: usize,
    },

    /// A header name occurs more than once and duplicates are rejected.
    #[error("duplicate header '{column}' at positions {first} and {second}")]
    DuplicateHeader {
        column: String,
        first: usize,
        second: usize,
    },
}

impl NormalizeError {
    /// Classify this error as row-fatal or run-fatal.
    pub fn severity(&self) -> Severity {
        match self {
            NormalizeError::Io(_) | NormalizeError::Csv(_) | NormalizeError::DuplicateHeader { .. } => {
                Severity::Run
            }
            NormalizeError::Format { .. }
            | NormalizeError::UnresolvableTime { .. }
            | NormalizeError::Validation { .. }
            | NormalizeError::MissingColumn { .. }
            | NormalizeError::MissingField { .. } => Severity::Row,
        }
    }

    /// Returns `true` if only the current record should be dropped.
    pub fn is_row_fatal(&self) -> bool {
        self.severity() == Severity::Row
    }
}
