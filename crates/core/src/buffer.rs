//! An append-only, amortized-growth byte buffer.
//!
//! A handle keeps two of these: one accumulates the composite format
//! template for the call in progress, the other accumulates the final
//! rendered bytes after host-format substitution, before they are flushed
//! to the sink.

const GROW_INCREMENT: usize = 8 * 1024;

/// An append-only buffer over `Vec<u8>`.
///
/// Growth is amortized in 8 KiB increments, mirroring the reserve-then-write
/// discipline of the design this is modeled on. Unlike that design,
/// `ensure` cannot fail here: allocation failure in `Vec` aborts the
/// process rather than returning an error, so there is no "insufficient
/// memory, skip this append" path to model in safe Rust.
#[derive(Debug, Default)]
pub struct GrowBuffer {
    bytes: Vec<u8>,
}

impl GrowBuffer {
    /// Create a buffer with an initial 8 KiB capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(GROW_INCREMENT),
        }
    }

    /// Ensure at least `additional` free bytes of capacity, growing in
    /// 8 KiB increments.
    pub fn ensure(&mut self, additional: usize) {
        let needed = self.bytes.len() + additional;
        if self.bytes.capacity() < needed {
            let short = needed - self.bytes.capacity();
            let increments = short.div_ceil(GROW_INCREMENT);
            self.bytes.reserve(increments * GROW_INCREMENT);
        }
    }

    /// Append raw bytes, growing first if necessary.
    pub fn append(&mut self, data: &[u8]) {
        self.ensure(data.len());
        self.bytes.extend_from_slice(data);
    }

    /// Append a UTF-8 string.
    pub fn push_str(&mut self, s: &str) {
        self.append(s.as_bytes());
    }

    /// Reset the insertion point to the start without freeing capacity.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Number of bytes currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow the stored bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Borrow the stored bytes as `str`.
    ///
    /// # Panics
    /// Panics if the buffer does not hold valid UTF-8. Every renderer in
    /// this crate only ever appends UTF-8 text, so this should never fire
    /// outside of a bug in that invariant.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes).expect("GrowBuffer must contain valid UTF-8")
    }
}
