//! Core data model types for the row pipeline.
//!
//! A run builds one [`HeaderMap`] from the first record, turns every following record into a
//! [`RowOutcome`], and accumulates [`RunStats`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{NormalizeError, NormalizeResult};

/// What to do when the header names the same column twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateHeaderPolicy {
    /// The later position wins (lookups by that name resolve to the last occurrence).
    #[default]
    LastWins,
    /// Fail the run with [`NormalizeError::DuplicateHeader`].
    Reject,
}

/// Column name → zero-based position, built once from the header record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build a header map from the cells of the first record.
    pub fn from_record(cells: &[String], policy: DuplicateHeaderPolicy) -> NormalizeResult<Self> {
        let mut index = HashMap::with_capacity(cells.len());
        for (pos, name) in cells.iter().enumerate() {
            if let Some(first) = index.insert(name.clone(), pos) {
                match policy {
                    DuplicateHeaderPolicy::Reject => {
                        return Err(NormalizeError::DuplicateHeader {
                            column: name.clone(),
                            first,
                            second: pos,
                        });
                    }
                    DuplicateHeaderPolicy::LastWins => {
                        warn!(column = %name, first, second = pos, "duplicate header; using last position");
                    }
                }
            }
        }

        Ok(Self {
            names: cells.to_vec(),
            index,
        })
    }

    /// Position of `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Position of `name`, or [`NormalizeError::MissingColumn`].
    pub fn require(&self, name: &str) -> NormalizeResult<usize> {
        self.index_of(name).ok_or_else(|| NormalizeError::MissingColumn {
            column: name.to_owned(),
            headers: self.names.clone(),
        })
    }

    /// Header names in input order (duplicates included).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of header cells.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the header record had no cells.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A record that failed normalization, with the cells exactly as they were read.
#[derive(Debug)]
pub struct DroppedRow {
    /// 1-based record number in the input (the header is record 1).
    pub record: u64,
    /// Unmodified input cells.
    pub original: Vec<String>,
    /// First error hit while normalizing.
    pub error: NormalizeError,
}

/// Result of normalizing one data record.
#[derive(Debug)]
pub enum RowOutcome {
    /// All fields normalized; write these cells.
    Normalized(Vec<String>),
    /// The record is discarded and reported on the diagnostic channel.
    Dropped(DroppedRow),
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Records read, header included.
    pub records_read: u64,
    /// Data rows written to the primary output (header excluded).
    pub rows_written: u64,
    /// Data rows discarded.
    pub rows_dropped: u64,
    /// Fields that contained invalid UTF-8 and were decoded with replacement characters.
    pub decode_substitutions: u64,
}

#[cfg(test)]
mod tests {
    use super::{DuplicateHeaderPolicy, HeaderMap};
    use crate::error::NormalizeError;

    fn cells(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn header_map_indexes_by_position() {
        let h = HeaderMap::from_record(&cells(&["ZIP", "Timestamp", "FullName"]), DuplicateHeaderPolicy::LastWins)
            .unwrap();
        assert_eq!(h.index_of("Timestamp"), Some(1));
        assert_eq!(h.index_of("ZIP"), Some(0));
        assert_eq!(h.index_of("Address"), None);
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn duplicate_headers_collapse_to_last_position_by_default() {
        let h = HeaderMap::from_record(&cells(&["ZIP", "Notes", "ZIP"]), DuplicateHeaderPolicy::default())
            .unwrap();
        assert_eq!(h.index_of("ZIP"), Some(2));
        assert_eq!(h.names().len(), 3);
    }

    #[test]
    fn duplicate_headers_can_be_rejected() {
        let err = HeaderMap::from_record(&cells(&["ZIP", "Notes", "ZIP"]), DuplicateHeaderPolicy::Reject)
            .unwrap_err();
        match err {
            NormalizeError::DuplicateHeader { column, first, second } => {
                assert_eq!(column, "ZIP");
                assert_eq!((first, second), (0, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn require_reports_missing_column_with_headers() {
        let h = HeaderMap::from_record(&cells(&["ZIP"]), DuplicateHeaderPolicy::LastWins).unwrap();
        let msg = h.require("FullName").unwrap_err().to_string();
        assert!(msg.contains("missing required column 'FullName'"));
        assert!(msg.contains("ZIP"));
    }
}
