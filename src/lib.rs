//! `csv-normalizer` cleans a comma-separated record stream one row at a time.
//!
//! The first record is the header. For every data record the columns `Timestamp`, `ZIP`,
//! `FullName`, `FooDuration` and `BarDuration` are normalized in place and `TotalDuration` is
//! set to the sum of the two durations. A record that fails any step is not written; instead
//! one diagnostic line with the original cells goes to a separate channel (stderr by default)
//! and the run continues.
//!
//! ## Normalization rules
//!
//! | Column | Input | Output |
//! |---|---|---|
//! | `Timestamp` | `06/15/23 02:30:00 PM`, US Pacific | RFC 3339 in US Eastern, `2023-06-15T17:30:00-04:00` |
//! | `ZIP` | up to 5 digits, not all zero | zero-padded to 5, `00501` |
//! | `FullName` | any text | upper-cased |
//! | `FooDuration`, `BarDuration` | `HH:MM:SS.ms` | seconds, `3723.5` |
//! | `TotalDuration` | ignored | `FooDuration + BarDuration` in seconds |
//!
//! ## Quick example
//!
//! ```rust
//! use csv_normalizer::pipeline::{normalize_reader_to_writer, NormalizeOptions};
//!
//! # fn main() -> Result<(), csv_normalizer::NormalizeError> {
//! let input = "\
//! Timestamp,ZIP,FullName,FooDuration,BarDuration,TotalDuration
//! 06/15/23 02:30:00 PM,501,jane doe,01:02:03.5,00:00:01.5,x
//! ";
//! let mut out = Vec::new();
//! let stats = normalize_reader_to_writer(input.as_bytes(), &mut out, &NormalizeOptions::default())?;
//! assert_eq!(stats.rows_written, 1);
//!
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.ends_with(
//!     "\"2023-06-15T17:30:00-04:00\",\"00501\",\"JANE DOE\",\"3723.5\",\"1.5\",\"3725.0\"\r\n"
//! ));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`normalize`]: the four field normalizers
//! - [`pipeline`]: the record loop, options and observers for the diagnostic channel
//! - [`types`]: header mapping, per-row outcomes and run statistics
//! - [`error`]: error type shared by all of the above

pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod types;

pub use error::{NormalizeError, NormalizeResult, Severity};
