use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::types::{DroppedRow, RunStats};

/// A field whose bytes were not valid UTF-8 and were decoded with replacement characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeFault {
    /// 1-based record number (the header is record 1).
    pub record: u64,
    /// Zero-based field position within the record.
    pub field: usize,
}

/// Observer interface for run events.
///
/// Implementors own the diagnostic channel: every dropped row is reported exactly once through
/// [`Self::on_row_dropped`].
pub trait NormalizeObserver: Send + Sync {
    /// Called once per discarded data row. `prefix` is the configured diagnostic prefix.
    fn on_row_dropped(&self, _row: &DroppedRow, _prefix: &str) {}

    /// Called for every field that needed replacement characters.
    fn on_decode_fault(&self, _fault: &DecodeFault) {}

    /// Called when the input is exhausted and the output flushed.
    fn on_complete(&self, _stats: RunStats) {}
}

/// Render one diagnostic line (without the trailing newline).
///
/// ```
/// use csv_normalizer::pipeline::format_drop_diagnostic;
///
/// let row = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(format_drop_diagnostic("Dropped: ", &row), r#"Dropped: ["a", "b"]"#);
/// ```
pub fn format_drop_diagnostic(prefix: &str, original: &[String]) -> String {
    format!("{prefix}{original:?}")
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn NormalizeObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn NormalizeObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl NormalizeObserver for CompositeObserver {
    fn on_row_dropped(&self, row: &DroppedRow, prefix: &str) {
        for o in &self.observers {
            o.on_row_dropped(row, prefix);
        }
    }

    fn on_decode_fault(&self, fault: &DecodeFault) {
        for o in &self.observers {
            o.on_decode_fault(fault);
        }
    }

    fn on_complete(&self, stats: RunStats) {
        for o in &self.observers {
            o.on_complete(stats);
        }
    }
}

/// Writes drop diagnostics to stderr. This is the default diagnostic channel.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl NormalizeObserver for StdErrObserver {
    fn on_row_dropped(&self, row: &DroppedRow, prefix: &str) {
        eprintln!("{}", format_drop_diagnostic(prefix, &row.original));
    }
}

/// Appends drop diagnostics to a local file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends diagnostic lines to `path`.
    ///
    /// Writes are best-effort; failures to open/write the file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl NormalizeObserver for FileObserver {
    fn on_row_dropped(&self, row: &DroppedRow, prefix: &str) {
        self.append_line(&format_drop_diagnostic(prefix, &row.original));
    }
}
