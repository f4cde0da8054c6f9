//! `sink`
//!
//! Scoped ownership of the output the document is written to.

use std::io::{self, BufWriter, Write};

/// Owns an output sink for the length of one export.
///
/// Writes are buffered. The sink is flushed by [`SinkGuard::finish`] on success.
/// On any other path the guard is dropped without flushing: whatever is still
/// buffered is thrown away and the sink itself is dropped (closing files and
/// sockets), so nothing more reaches it after a failure.
pub(crate) struct SinkGuard<W: Write> {
    /// The buffered sink, until the guard is dropped.
    writer: Option<BufWriter<W>>,
}

impl<W: Write> SinkGuard<W> {
    /// Takes ownership of a sink.
    ///
    /// # Arguments
    /// * `sink`: Where the bytes end up.
    ///
    /// # Returns
    /// A new guard around `sink`.
    pub(crate) fn new(sink: W) -> Self {
        SinkGuard {
            writer: Some(BufWriter::new(sink)),
        }
    }

    /// Flushes everything written so far down to the sink.
    ///
    /// # Errors
    /// The error reported by the sink, if flushing failed.
    pub(crate) fn finish(mut self) -> io::Result<()> {
        self.writer()?.flush()
    }

    /// Gets the buffered sink.
    ///
    /// # Errors
    /// If the sink was already released.
    fn writer(&mut self) -> io::Result<&mut BufWriter<W>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::other("DXF output already released"))
    }
}

impl<W: Write> Write for SinkGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer()?.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl<W: Write> Drop for SinkGuard<W> {
    fn drop(&mut self) {
        // `BufWriter` flushes when dropped, `into_parts` does not.
        if let Some(writer) = self.writer.take() {
            let (_sink, _unwritten) = writer.into_parts();
        }
    }
}
