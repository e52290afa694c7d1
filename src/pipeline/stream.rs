//! The record loop: header first, then one data row at a time.

use std::io::{Read, Write};

use csv::{ByteRecord, QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::error::NormalizeResult;
use crate::types::{HeaderMap, RowOutcome, RunStats};

use super::decode::decode_record;
use super::observability::{DecodeFault, NormalizeObserver, StdErrObserver};
use super::options::NormalizeOptions;
use super::row::RowProcessor;

/// Reader configuration for normalizer input: comma-separated, header handled by the
/// pipeline, records of any length.
pub fn csv_reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}

/// Writer configuration for normalizer output: every field quoted, CRLF record terminator.
pub fn csv_writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .flexible(true);
    builder
}

/// Normalize a byte stream into another using the standard CSV dialect.
///
/// ```
/// use csv_normalizer::pipeline::{normalize_reader_to_writer, NormalizeOptions};
///
/// let input = "FullName,ZIP\nada,501\n";
/// let mut out = Vec::new();
/// let stats = normalize_reader_to_writer(input.as_bytes(), &mut out, &NormalizeOptions::default()).unwrap();
/// assert_eq!(stats.records_read, 2);
/// ```
pub fn normalize_reader_to_writer<R: Read, W: Write>(
    input: R,
    output: W,
    options: &NormalizeOptions,
) -> NormalizeResult<RunStats> {
    let mut reader = csv_reader_builder().from_reader(input);
    let mut writer = csv_writer_builder().from_writer(output);
    normalize_stream(&mut reader, &mut writer, options)
}

/// Run the pipeline over an existing CSV reader and writer.
///
/// The first record is the header: it is written unchanged and fixes the column positions
/// for the rest of the run. Every following record is normalized and written, or dropped
/// and reported to the observer. Only stream failures and a rejected header end the run
/// early.
pub fn normalize_stream<R: Read, W: Write>(
    reader: &mut csv::Reader<R>,
    writer: &mut csv::Writer<W>,
    options: &NormalizeOptions,
) -> NormalizeResult<RunStats> {
    let fallback = StdErrObserver;
    let observer: &dyn NormalizeObserver = options.observer.as_deref().unwrap_or(&fallback);

    let mut stats = RunStats::default();
    let mut record = ByteRecord::new();

    if !reader.read_byte_record(&mut record)? {
        writer.flush()?;
        observer.on_complete(stats);
        return Ok(stats);
    }
    let header_cells = read_cells(&record, &mut stats, observer);
    let header = HeaderMap::from_record(&header_cells, options.duplicate_headers)?;
    writer.write_record(&header_cells)?;

    let processor = RowProcessor::new(&header, options);
    while reader.read_byte_record(&mut record)? {
        let cells = read_cells(&record, &mut stats, observer);
        match processor.process(stats.records_read, cells) {
            RowOutcome::Normalized(out) => {
                writer.write_record(&out)?;
                stats.rows_written += 1;
            }
            RowOutcome::Dropped(dropped) => {
                debug!(record = dropped.record, error = %dropped.error, "dropping row");
                observer.on_row_dropped(&dropped, &options.diagnostic_prefix);
                stats.rows_dropped += 1;
            }
        }
    }

    writer.flush()?;
    info!(
        records = stats.records_read,
        written = stats.rows_written,
        dropped = stats.rows_dropped,
        decode_substitutions = stats.decode_substitutions,
        "normalization finished"
    );
    observer.on_complete(stats);
    Ok(stats)
}

fn read_cells(record: &ByteRecord, stats: &mut RunStats, observer: &dyn NormalizeObserver) -> Vec<String> {
    stats.records_read += 1;
    let (cells, substituted) = decode_record(record);
    for field in substituted {
        debug!(record = stats.records_read, field, "replaced invalid utf-8");
        stats.decode_substitutions += 1;
        observer.on_decode_fault(&DecodeFault {
            record: stats.records_read,
            field,
        });
    }
    cells
}
