//! Multi-style structured output: one format-directive call, rendered
//! simultaneously as plain text, XML, JSON, or HTML.
//!
//! A caller builds a [`Handle`] fixed to one [`Style`], then drives it
//! with [`emit`] (a small `{…}` directive DSL per call) and the
//! [`open_container`]/[`close_container`]/[`open_list`]/[`close_list`]/
//! [`open_instance`]/[`close_instance`] hierarchy operations. The same
//! call sequence against handles of different styles produces text,
//! XML, JSON, or HTML renderings of the same structure.
//!
//! For programs that want one implicit, process-wide handle instead of
//! managing their own, [`with_default_handle`] and the free functions in
//! this module operate on a lazily initialized default — configured from
//! the `MULTIOUT_OPTIONS` environment variable on first use, see [`env`].

#![warn(missing_docs)]

/// Append-only byte buffer with amortized growth.
pub mod buffer;
/// The `{…}` directive grammar.
pub mod directive;
/// Environment-based configuration.
pub mod env;
/// Error types.
pub mod error;
/// Output escaping for TEXT/XML/JSON/HTML.
pub mod escape;
/// The top-level handle and its builder.
pub mod handle;
/// Container/list/instance hierarchy operations.
pub mod hierarchy;
/// The `emit` driver.
pub mod emit;
/// Minimal printf-compatible conversion-spec interpreter.
pub mod printf;
// Field renderers (`FieldRenderers`). Every item here is `pub(crate)` —
// `render_field` is reached through `emit`, not called directly by users.
mod render;
/// Write destinations for rendered output.
pub mod sink;
/// The hierarchy stack.
pub mod stack;
/// Style and flag types.
pub mod style;

pub use directive::{Directive, Modifiers, Role};
pub use emit::emit;
pub use env::{apply_options, ENV_VAR};
pub use error::{EmitError, EmitResult};
pub use handle::{
    reset_default_handle, with_default_handle, Formatter, Handle, HandleBuilder, DEFAULT_INDENT_BY,
    DEFAULT_STACK_DEPTH,
};
pub use hierarchy::{close_container, close_instance, close_list, open_container, open_instance, open_list};
pub use printf::Arg;
pub use sink::{file_sink, MemorySink, SharedSink, Sink};
pub use stack::{FrameFlags, Stack, StackFrame};
pub use style::{FlagSet, Style};

pub use multiout_diagnostics::{codes, CollectingSink, Diagnostic, Severity, StderrSink, WarningSink};
pub use multiout_tables::{InfoEntry, InfoTable, InfoTableBuilder};

/// Render one call against the process-wide default handle (TEXT style,
/// `MULTIOUT_OPTIONS`-configured on first use).
///
/// This is the "nil handle selects the default handle" ergonomic this
/// library is modeled on: most programs that only ever use one handle
/// can call this instead of building and threading their own.
pub fn emit_default(fmt: &str, args: &[Arg]) -> EmitResult<String> {
    with_default_handle(|h| emit::emit(h, fmt, args))
}

/// [`open_container`] on the default handle.
pub fn open_container_default(name: &str) -> EmitResult<()> {
    with_default_handle(|h| hierarchy::open_container(h, name))
}

/// [`close_container`] on the default handle.
pub fn close_container_default(name: &str) -> EmitResult<()> {
    with_default_handle(|h| hierarchy::close_container(h, name))
}

/// [`open_list`] on the default handle.
pub fn open_list_default(name: &str) -> EmitResult<()> {
    with_default_handle(|h| hierarchy::open_list(h, name))
}

/// [`close_list`] on the default handle.
pub fn close_list_default(name: &str) -> EmitResult<()> {
    with_default_handle(|h| hierarchy::close_list(h, name))
}

/// [`open_instance`] on the default handle.
pub fn open_instance_default(name: &str) -> EmitResult<()> {
    with_default_handle(|h| hierarchy::open_instance(h, name))
}

/// [`close_instance`] on the default handle.
pub fn close_instance_default(name: &str) -> EmitResult<()> {
    with_default_handle(|h| hierarchy::close_instance(h, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_handle_round_trips_a_container() {
        reset_default_handle();
        std::env::remove_var(env::ENV_VAR);
        open_container_default("top").unwrap();
        close_container_default("top").unwrap();
        with_default_handle(|h| assert_eq!(h.style(), Style::Text));
        reset_default_handle();
    }
}
