//! Output style and the per-handle flag set.

use bitflags::bitflags;

/// The closed set of rendering styles a handle may be fixed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Human-readable plain text.
    Text,
    /// XML elements.
    Xml,
    /// JSON objects/arrays/values.
    Json,
    /// HTML `<div>` structure with informational attributes.
    Html,
}

bitflags! {
    /// Per-handle behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FlagSet: u16 {
        /// Insert newlines and indentation in structured output.
        const PRETTY   = 1 << 0;
        /// Emit diagnostics (stack misuse, malformed directives) to the
        /// installed warning sink.
        const WARN     = 1 << 1;
        /// Reserved: behaves identically to `WARN` in this rendition
        /// (see DESIGN.md for why it is not given separate semantics).
        const WARN_XML = 1 << 2;
        /// HTML only: emit a `data-xpath` attribute on each field.
        const XPATH    = 1 << 3;
        /// HTML only: emit `data-type`/`data-help` attributes when an
        /// `InfoTable` entry exists for the field.
        const INFO     = 1 << 4;
        /// Close the underlying sink when the handle is dropped.
        const CLOSE_FP = 1 << 5;
        /// Internal: an HTML line `<div>` is currently open.
        const DIV_OPEN = 1 << 6;
    }
}
