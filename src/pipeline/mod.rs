//! Row pipeline: header mapping, per-row normalization and the drop policy.
//!
//! Most callers should use [`normalize_reader_to_writer`], which:
//!
//! - reads comma-separated input, decoding invalid UTF-8 with replacement characters
//! - writes the header through and builds a [`crate::types::HeaderMap`] from it
//! - normalizes each data row with a [`RowProcessor`], or drops it and reports it to a
//!   [`NormalizeObserver`] (stderr by default)
//! - writes every field quoted
//!
//! [`RowProcessor`] can also be used on its own; it performs no I/O and returns a
//! [`crate::types::RowOutcome`] per record.

mod decode;
pub mod observability;
pub mod options;
pub mod row;
pub mod stream;

pub use observability::{
    format_drop_diagnostic, CompositeObserver, DecodeFault, FileObserver, NormalizeObserver, StdErrObserver,
};
pub use options::{ColumnNames, NormalizeOptions, DROP_DIAGNOSTIC_PREFIX};
pub use row::RowProcessor;
pub use stream::{csv_reader_builder, csv_writer_builder, normalize_reader_to_writer, normalize_stream};
