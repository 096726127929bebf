//! Diagnostics for the multiout structured output library.
//!
//! Provides [`Diagnostic`], [`Severity`], and the [`WarningSink`] trait used to
//! report the "warning only, never fatal" conditions the core library raises
//! when its `WARN` flag is set: malformed directives, unbalanced hierarchy
//! operations, and stack overflow. Diagnostic codes are defined in the
//! [`codes`] module.

#![warn(missing_docs)]

/// Diagnostic code constants.
pub mod codes;

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Severity of a diagnostic.
///
/// The core library never raises `Error`-level diagnostics of its own accord
/// — every condition it detects is recoverable (see the specification's
/// error-handling policy: "prefer producing *some* output over failing
/// loudly"). `Error` exists so a `WarningSink` implementation embedding this
/// type in a richer diagnostic pipeline has somewhere to put conditions of
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[non_exhaustive]
pub enum Severity {
    /// Hard error.
    Error,
    /// Warning — the call proceeded, but something was not as expected.
    Warn,
    /// Informational note.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warn => write!(f, "warn"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single diagnostic message produced by the core library.
///
/// `path` records the ancestor frame names at the point the diagnostic was
/// raised (the same names used for HTML's `data-xpath`), so a caller can tell
/// *which* container/list/instance a stack-discipline warning refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Stable diagnostic code, see [`codes`].
    pub code: Cow<'static, str>,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Ancestor frame names, outermost first, at the point this diagnostic
    /// was raised. Empty when the condition is not stack-related (e.g. a
    /// directive-parsing warning before any container was opened).
    pub path: Vec<String>,
}

impl Diagnostic {
    /// Construct a diagnostic with explicit severity.
    pub fn new(
        code: impl Into<Cow<'static, str>>,
        severity: Severity,
        message: impl Into<String>,
        path: Vec<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            path,
        }
    }

    /// Shorthand for a `Warn` diagnostic.
    pub fn warn(code: impl Into<Cow<'static, str>>, message: impl Into<String>, path: Vec<String>) -> Self {
        Self::new(code, Severity::Warn, message, path)
    }

    /// Shorthand for an `Info` diagnostic.
    pub fn info(code: impl Into<Cow<'static, str>>, message: impl Into<String>, path: Vec<String>) -> Self {
        Self::new(code, Severity::Info, message, path)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
        } else {
            write!(
                f,
                "{}[{}]: {} (at /{})",
                self.severity,
                self.code,
                self.message,
                self.path.join("/")
            )
        }
    }
}

/// Receives diagnostics raised by a handle when its `WARN` flag is set.
///
/// The default implementation, [`StderrSink`], matches the specification's
/// policy verbatim: "a single newline-terminated message" to standard error.
/// Tests and embedding applications install their own sink to capture or
/// redirect diagnostics instead (see the core crate's `Handle::builder`).
pub trait WarningSink {
    /// Report one diagnostic. Must not panic — a warning sink failing is
    /// itself just ignored by the core library, per the "never fail loudly"
    /// policy.
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Writes each diagnostic as one newline-terminated line to standard error.
#[derive(Debug, Default)]
pub struct StderrSink;

impl WarningSink for StderrSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        // Best-effort: a failing stderr write has nowhere further to go.
        let _ = writeln!(io::stderr(), "{diagnostic}");
    }
}

/// Collects diagnostics in memory instead of printing them.
///
/// Used by the core crate's own tests, and useful to any caller that wants
/// to assert on warnings rather than scrape stderr.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Diagnostics received so far, in report order.
    pub diagnostics: Vec<Diagnostic>,
}

impl WarningSink for CollectingSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_display() {
        assert_eq!(format!("{}", Severity::Error), "error");
        assert_eq!(format!("{}", Severity::Warn), "warn");
        assert_eq!(format!("{}", Severity::Info), "info");
    }

    #[test]
    fn diagnostic_display_without_path() {
        let d = Diagnostic::warn(codes::UNKNOWN_MODIFIER, "unknown modifier 'Z'", vec![]);
        assert_eq!(format!("{d}"), "warn[MX1002]: unknown modifier 'Z'");
    }

    #[test]
    fn diagnostic_display_with_path() {
        let d = Diagnostic::warn(
            codes::NAME_MISMATCH,
            "close name mismatch",
            vec!["top".into(), "data".into()],
        );
        assert_eq!(
            format!("{d}"),
            "warn[MX1102]: close name mismatch (at /top/data)"
        );
    }

    #[test]
    fn collecting_sink_records_in_order() {
        let mut sink = CollectingSink::default();
        sink.report(&Diagnostic::warn(codes::DUPLICATE_ROLE, "first", vec![]));
        sink.report(&Diagnostic::warn(codes::CLOSE_WITHOUT_OPEN, "second", vec![]));
        assert_eq!(sink.diagnostics.len(), 2);
        assert_eq!(sink.diagnostics[0].code, codes::DUPLICATE_ROLE);
        assert_eq!(sink.diagnostics[1].code, codes::CLOSE_WITHOUT_OPEN);
    }

    #[test]
    fn diagnostic_eq() {
        let a = Diagnostic::warn(codes::STACK_OVERFLOW, "msg", vec![]);
        let b = Diagnostic::warn(codes::STACK_OVERFLOW, "msg", vec![]);
        assert_eq!(a, b);
    }
}
