//! Output sink abstraction for streamed console output.
//!
//! The streaming reader writes answer tokens as they arrive and must
//! flush after every write so a human watching sees token-by-token
//! arrival. The trait seam keeps the reader testable without a console.

use std::io::{self, Write};

/// Destination for the reader's interleaved console output.
pub trait OutputSink {
    /// Write a text fragment without any trailing newline.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Flush buffered output to the underlying device.
    fn flush(&mut self) -> io::Result<()>;

    /// Write a full line and flush.
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write_str(text)?;
        self.write_str("\n")?;
        self.flush()
    }
}

/// Production sink writing to stdout.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl OutputSink for StdoutSink {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        io::stdout().write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

/// In-memory sink used by tests to observe what the reader emitted.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffer: String,
    flushes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Number of flush calls observed.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl OutputSink for MemorySink {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
