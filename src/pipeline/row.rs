//! Per-record normalization, independent of stream I/O.

use crate::error::{NormalizeError, NormalizeResult};
use crate::normalize::{
    format_seconds, normalize_duration, normalize_name, normalize_timestamp, normalize_zip, TimeZoneRules,
};
use crate::types::{DroppedRow, HeaderMap, RowOutcome};

use super::options::{ColumnNames, NormalizeOptions};

/// Applies the field normalizers to data records using a fixed header.
///
/// Column lookups happen per record, so a header that lacks a required column drops every
/// data row instead of failing the run.
#[derive(Debug, Clone, Copy)]
pub struct RowProcessor<'a> {
    header: &'a HeaderMap,
    columns: &'a ColumnNames,
    time_zones: &'a TimeZoneRules,
}

impl<'a> RowProcessor<'a> {
    pub fn new(header: &'a HeaderMap, options: &'a NormalizeOptions) -> Self {
        Self {
            header,
            columns: &options.columns,
            time_zones: &options.time_zones,
        }
    }

    /// Normalize one record. `record` is its 1-based position in the input.
    ///
    /// On failure the untouched cells are returned inside [`RowOutcome::Dropped`].
    pub fn process(&self, record: u64, row: Vec<String>) -> RowOutcome {
        match self.normalize(&row) {
            Ok(cells) => RowOutcome::Normalized(cells),
            Err(error) => RowOutcome::Dropped(DroppedRow {
                record,
                original: row,
                error,
            }),
        }
    }

    fn normalize(&self, row: &[String]) -> NormalizeResult<Vec<String>> {
        let cols = self.columns;
        let mut out = row.to_vec();

        let ts = self.locate(row, &cols.timestamp)?;
        out[ts] = normalize_timestamp(&row[ts], self.time_zones)?;

        let zip = self.locate(row, &cols.zip)?;
        out[zip] = normalize_zip(&row[zip])?;

        let name = self.locate(row, &cols.full_name)?;
        out[name] = normalize_name(&row[name]);

        let foo_idx = self.locate(row, &cols.foo_duration)?;
        let bar_idx = self.locate(row, &cols.bar_duration)?;
        let foo = normalize_duration(&row[foo_idx])?;
        let bar = normalize_duration(&row[bar_idx])?;
        out[foo_idx] = format_seconds(foo);
        out[bar_idx] = format_seconds(bar);

        let total = self.locate(row, &cols.total_duration)?;
        out[total] = format_seconds(foo + bar);

        Ok(out)
    }

    fn locate(&self, row: &[String], column: &str) -> NormalizeResult<usize> {
        let index = self.header.require(column)?;
        if index >= row.len() {
            return Err(NormalizeError::MissingField {
                column: column.to_owned(),
                index,
                len: row.len(),
            });
        }
        Ok(index)
    }
}
