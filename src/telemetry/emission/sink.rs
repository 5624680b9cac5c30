//! Shared line sink. Each write holds the lock for exactly one full line.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

/// Cloneable handle to a caller-owned writer.
///
/// The sink is never flushed or closed here; buffering writers must be
/// flushed by whoever owns them.
///
/// A line is handed to the writer in one `write_all`, so lines never
/// interleave. Whether a failed write leaves a partial line behind is up to
/// the writer: an unbuffered writer that accepts some bytes and then errors
/// keeps those bytes. Wrap such writers in a `BufWriter` (or write to an
/// append-mode file, where one `write` per line is the norm) if readers
/// must never see a truncated line.
#[derive(Clone)]
pub struct LineSink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LineSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Process stdout, where the ingestion pipeline collects server events.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Append to a file, creating it if needed.
    pub fn append_file(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    /// Write `line` plus a newline in a single call. On error, the bytes the
    /// writer already accepted are not rolled back.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        let mut writer = self.writer.lock();
        writer.write_all(&buf)
    }
}

impl fmt::Debug for LineSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSink").finish_non_exhaustive()
    }
}
