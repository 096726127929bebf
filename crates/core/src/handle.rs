//! The top-level handle aggregating style, flags, buffers, and stack.

use std::io;
use std::sync::{Mutex, OnceLock};

use multiout_tables::InfoTable;

use crate::buffer::GrowBuffer;
use crate::error::{EmitError, EmitResult};
use crate::sink::Sink;
use crate::stack::Stack;
use crate::style::{FlagSet, Style};

/// Default fixed hierarchy depth. Not specified numerically by the
/// design this library follows; chosen generously since a frame is just
/// a flag byte plus an optional string (see DESIGN.md).
pub const DEFAULT_STACK_DEPTH: usize = 64;

/// Default indentation step, in spaces, per nesting level.
pub const DEFAULT_INDENT_BY: usize = 2;

/// A hook invoked once per directive before parsing, with the raw
/// directive body; a returned `Some` replaces the body for parsing.
pub trait Formatter {
    /// Rewrite (or leave alone) a raw directive body.
    fn rewrite(&mut self, raw_directive: &str) -> Option<String>;
}

impl<F: FnMut(&str) -> Option<String>> Formatter for F {
    fn rewrite(&mut self, raw_directive: &str) -> Option<String> {
        self(raw_directive)
    }
}

/// The top-level aggregate: style, flags, indentation, the hierarchy
/// stack, both buffers, an optional info table, and the sink/formatter/
/// warning hooks. Construct one via [`Handle::builder`].
pub struct Handle {
    pub(crate) style: Style,
    pub(crate) flags: FlagSet,
    pub(crate) indent: usize,
    pub(crate) indent_by: usize,
    pub(crate) stack: Stack,
    pub(crate) template: String,
    pub(crate) output: GrowBuffer,
    pub(crate) info: Option<InfoTable>,
    pub(crate) formatter: Option<Box<dyn Formatter>>,
    pub(crate) sink: Box<dyn Sink>,
    pub(crate) warnings: Box<dyn multiout_diagnostics::WarningSink>,
}

impl std::fmt::Debug for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("style", &self.style)
            .field("flags", &self.flags)
            .field("indent", &self.indent)
            .field("indent_by", &self.indent_by)
            .field("stack_depth", &self.stack.depth())
            .finish_non_exhaustive()
    }
}

impl Handle {
    /// Start building a handle fixed to `style`.
    #[must_use]
    pub fn builder(style: Style) -> HandleBuilder {
        HandleBuilder::new(style)
    }

    /// The style this handle was created with.
    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    /// Currently active flags.
    #[must_use]
    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    /// Current hierarchy nesting depth (0 when no container/list/instance
    /// is open).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Set (OR in) flags.
    pub fn set_flags(&mut self, flags: FlagSet) {
        self.flags |= flags;
    }

    /// Clear flags. Paired with [`Handle::set_flags`], `set` then `clear`
    /// of the same bits returns flags to their prior state.
    pub fn clear_flags(&mut self, flags: FlagSet) {
        self.flags &= !flags;
    }

    /// Change the output style. Per the design this follows, style is
    /// otherwise fixed after construction.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Install (or replace) the info table consulted by the HTML
    /// renderer when `INFO` is set.
    pub fn set_info(&mut self, table: InfoTable) {
        self.info = Some(table);
    }

    /// Install (or replace) the user formatter hook.
    pub fn set_formatter(&mut self, formatter: impl Formatter + 'static) {
        self.formatter = Some(Box::new(formatter));
    }

    /// Install (or replace) the write sink.
    pub fn set_sink(&mut self, sink: impl Sink + 'static) {
        self.sink = Box::new(sink);
    }

    fn raise(&mut self, diag: multiout_diagnostics::Diagnostic) {
        if self.flags.contains(FlagSet::WARN) || self.flags.contains(FlagSet::WARN_XML) {
            self.warnings.report(&diag);
        }
    }

    pub(crate) fn warn_stack(&mut self, code: &'static str, message: impl Into<String>) {
        let path: Vec<String> = self.stack.names().map(str::to_string).collect();
        self.raise(multiout_diagnostics::Diagnostic::warn(code, message, path));
    }

    pub(crate) fn warn_directive(&mut self, diag: multiout_diagnostics::Diagnostic) {
        self.raise(diag);
    }

    /// Flush `bytes` through the installed sink.
    pub(crate) fn flush(&mut self, bytes: &[u8]) -> EmitResult<()> {
        self.sink.write(bytes).map_err(EmitError::Writer)
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if self.flags.contains(FlagSet::CLOSE_FP) {
            let _ = self.sink.close();
        }
    }
}

/// Fluent constructor for [`Handle`].
pub struct HandleBuilder {
    style: Style,
    flags: FlagSet,
    stack_depth: usize,
    indent_by: usize,
    info: Option<InfoTable>,
    formatter: Option<Box<dyn Formatter>>,
    sink: Box<dyn Sink>,
    warnings: Box<dyn multiout_diagnostics::WarningSink>,
}

impl HandleBuilder {
    fn new(style: Style) -> Self {
        Self {
            style,
            flags: FlagSet::empty(),
            stack_depth: DEFAULT_STACK_DEPTH,
            indent_by: DEFAULT_INDENT_BY,
            info: None,
            formatter: None,
            sink: Box::new(io::stdout()),
            warnings: Box::new(multiout_diagnostics::StderrSink),
        }
    }

    /// OR in the given flags.
    #[must_use]
    pub fn flags(mut self, flags: FlagSet) -> Self {
        self.flags |= flags;
        self
    }

    /// Override the fixed hierarchy depth (default
    /// [`DEFAULT_STACK_DEPTH`]).
    #[must_use]
    pub fn stack_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    /// Override the indentation step (default [`DEFAULT_INDENT_BY`]).
    #[must_use]
    pub fn indent_by(mut self, spaces: usize) -> Self {
        self.indent_by = spaces;
        self
    }

    /// Install an info table.
    #[must_use]
    pub fn info_table(mut self, table: InfoTable) -> Self {
        self.info = Some(table);
        self
    }

    /// Install a user formatter hook.
    #[must_use]
    pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Override the write sink (default: standard output).
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// In-place style override, used by [`crate::env::apply_options`] where
    /// a fluent `self` isn't available (the builder is borrowed, not owned).
    pub(crate) fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// In-place flag OR, see [`HandleBuilder::set_style`].
    pub(crate) fn add_flags(&mut self, flags: FlagSet) {
        self.flags |= flags;
    }

    /// In-place indent-step override, see [`HandleBuilder::set_style`].
    pub(crate) fn set_indent_by(&mut self, spaces: usize) {
        self.indent_by = spaces;
    }

    /// Override the warning sink (default: one line per warning to
    /// standard error).
    #[must_use]
    pub fn warnings(mut self, warnings: impl multiout_diagnostics::WarningSink + 'static) -> Self {
        self.warnings = Box::new(warnings);
        self
    }

    /// Finish, producing a ready-to-use handle.
    #[must_use]
    pub fn build(self) -> Handle {
        Handle {
            style: self.style,
            flags: self.flags,
            indent: 0,
            indent_by: self.indent_by,
            stack: Stack::new(self.stack_depth),
            template: String::new(),
            output: GrowBuffer::new(),
            info: self.info,
            formatter: self.formatter,
            sink: self.sink,
            warnings: self.warnings,
        }
    }
}

static DEFAULT_HANDLE: OnceLock<Mutex<Option<Handle>>> = OnceLock::new();

fn default_slot() -> &'static Mutex<Option<Handle>> {
    DEFAULT_HANDLE.get_or_init(|| Mutex::new(None))
}

/// Run `f` against the process-wide default handle, lazily initializing
/// it (TEXT style, applying `MULTIOUT_OPTIONS`) on first use.
///
/// Concurrent use from multiple threads is not a supported usage
/// pattern for this library (see the crate-level concurrency notes);
/// the guarding mutex exists only so that doing so anyway panics on a
/// poisoned lock rather than racing, per this rendition's "memory-safe,
/// still-undefined-behavior-at-the-API-level" stance.
pub fn with_default_handle<R>(f: impl FnOnce(&mut Handle) -> R) -> R {
    let slot = default_slot();
    let mut guard = slot.lock().expect("default handle mutex poisoned");
    if guard.is_none() {
        let mut builder = Handle::builder(Style::Text);
        crate::env::apply_options(&mut builder);
        *guard = Some(builder.build());
    }
    f(guard.as_mut().expect("just initialized"))
}

/// Reset the default handle to uninitialized, matching `destroy`'s
/// semantics on the default handle in the design this follows: the next
/// call to [`with_default_handle`] re-initializes from scratch.
pub fn reset_default_handle() {
    let slot = default_slot();
    let mut guard = slot.lock().expect("default handle mutex poisoned");
    *guard = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn set_then_clear_flags_returns_to_prior_state() {
        let mut h = Handle::builder(Style::Text).build();
        let before = h.flags();
        h.set_flags(FlagSet::PRETTY | FlagSet::WARN);
        h.clear_flags(FlagSet::PRETTY | FlagSet::WARN);
        assert_eq!(h.flags(), before);
    }

    #[test]
    fn builder_defaults_are_text_stdout_no_flags() {
        let h = Handle::builder(Style::Json).build();
        assert_eq!(h.style(), Style::Json);
        assert!(h.flags().is_empty());
        assert_eq!(h.stack.capacity(), DEFAULT_STACK_DEPTH);
    }

    #[test]
    fn custom_sink_receives_flushed_bytes() {
        let mut h = Handle::builder(Style::Text).sink(MemorySink::new()).build();
        h.flush(b"hello").unwrap();
        // sink is boxed as `dyn Sink`; downcast isn't available, so
        // this only exercises that flush doesn't error.
        drop(h);
    }
}
