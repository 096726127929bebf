//! Error types returned by fallible entry points.

use thiserror::Error;

/// Failure modes an emit call can report.
///
/// Stack and directive misuse are *not* represented here — per the
/// library's policy, those are reported as warnings (see
/// `multiout_diagnostics`) and the call still proceeds. `EmitError` is
/// reserved for conditions that genuinely prevent producing output.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The sink's `write` (or `close`) call returned an error.
    #[error("sink write failed: {0}")]
    Writer(#[from] std::io::Error),
    /// The host-format substitution pass could not be completed — e.g. a
    /// conversion specifier had no matching argument.
    #[error("format substitution failed: {0}")]
    Formatter(String),
    /// An open operation would push past the handle's fixed stack depth.
    #[error("hierarchy stack depth exceeded (maximum {max})")]
    StackOverflow {
        /// The configured maximum depth.
        max: usize,
    },
}

/// Shorthand for `Result<T, EmitError>`.
pub type EmitResult<T> = Result<T, EmitError>;
