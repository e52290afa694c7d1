//! Lossy UTF-8 decoding of raw CSV records.

use std::borrow::Cow;

use csv::ByteRecord;

/// Decode every field of `record`, replacing invalid UTF-8 with U+FFFD.
///
/// Returns the decoded cells and the positions of the fields that needed replacement.
pub(crate) fn decode_record(record: &ByteRecord) -> (Vec<String>, Vec<usize>) {
    let mut cells = Vec::with_capacity(record.len());
    let mut substituted = Vec::new();
    for (idx, field) in record.iter().enumerate() {
        match String::from_utf8_lossy(field) {
            Cow::Borrowed(s) => cells.push(s.to_owned()),
            Cow::Owned(s) => {
                substituted.push(idx);
                cells.push(s);
            }
        }
    }
    (cells, substituted)
}
