//! Write destinations for rendered output.
//!
//! Replaces the write/close callback pair with a trait object — the
//! trait object *is* the opaque state the callback pair used to carry.

use std::fs::File;
use std::io::{self, Write};

/// A destination for rendered bytes.
pub trait Sink {
    /// Write a chunk of rendered output.
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Flush and release any held resources. Called at most once, when
    /// the owning handle is dropped and `CLOSE_FP` is set.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write> Sink for W {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        Write::write_all(self, buf)
    }

    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Writes to an in-memory buffer instead of an external destination.
///
/// `io::Write`'s blanket [`Sink`] impl already covers `Vec<u8>` directly;
/// this wrapper exists for callers who want to retrieve the buffer back
/// out through a named type rather than downcasting a boxed `Sink`.
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Vec<u8>,
}

impl MemorySink {
    /// An empty memory sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// The bytes written so far, as `str`.
    ///
    /// # Panics
    /// Panics if the sink has received non-UTF-8 bytes, which should
    /// never happen — every renderer in this crate only ever writes
    /// UTF-8 text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf).expect("sink received non-UTF-8 bytes")
    }

    /// Consume the sink, returning the accumulated bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Sink for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.buf.extend_from_slice(buf);
        Ok(())
    }
}

/// Opens (or wraps) a file as a sink.
pub fn file_sink(file: File) -> impl Sink {
    file
}

/// A [`MemorySink`] behind shared ownership, so a test can hold a handle
/// to the accumulated bytes while the sink itself is moved into a
/// [`crate::handle::Handle`].
#[derive(Debug, Clone, Default)]
pub struct SharedSink(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

impl SharedSink {
    /// A new, empty shared sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the bytes written so far, as a `String`.
    ///
    /// # Panics
    /// Panics if non-UTF-8 bytes were written, which no renderer in this
    /// crate does.
    #[must_use]
    pub fn as_str(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("sink received non-UTF-8 bytes")
    }
}

impl Sink for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_accumulates_writes() {
        let mut sink = MemorySink::new();
        sink.write(b"hello ").unwrap();
        sink.write(b"world").unwrap();
        assert_eq!(sink.as_str(), "hello world");
    }

    #[test]
    fn vec_u8_is_a_sink_via_blanket_impl() {
        let mut buf: Vec<u8> = Vec::new();
        Sink::write(&mut buf, b"via io::Write").unwrap();
        assert_eq!(buf, b"via io::Write");
    }
}
