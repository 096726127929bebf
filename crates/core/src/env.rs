//! Environment-based configuration, applied once when the default handle
//! is first initialized.
//!
//! `MULTIOUT_OPTIONS` (the source's `LIBXO_OPTIONS`, renamed — see
//! DESIGN.md) is a string of single-character tokens processed
//! left-to-right, each setting a style or flag on the handle being built.
//! Unrecognized tokens are ignored rather than rejected, matching the
//! library's general "prefer producing output" stance.

use crate::handle::HandleBuilder;
use crate::style::{FlagSet, Style};

/// The environment variable consulted by [`apply_options`].
pub const ENV_VAR: &str = "MULTIOUT_OPTIONS";

/// Read [`ENV_VAR`] and apply any recognized tokens to `builder`.
///
/// A missing or non-UTF-8 environment variable is treated as empty.
pub fn apply_options(builder: &mut HandleBuilder) {
    if let Ok(value) = std::env::var(ENV_VAR) {
        apply_str(builder, &value);
    }
}

/// Apply the token grammar in a literal string, independent of the
/// environment. Exposed for tests; [`apply_options`] is the public entry
/// point for real use.
pub(crate) fn apply_str(builder: &mut HandleBuilder, tokens: &str) {
    let mut chars = tokens.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'H' => builder.set_style(Style::Html),
            'J' => builder.set_style(Style::Json),
            'T' => builder.set_style(Style::Text),
            'X' => builder.set_style(Style::Xml),
            'P' => builder.add_flags(FlagSet::PRETTY),
            'W' => builder.add_flags(FlagSet::WARN),
            'I' => builder.add_flags(FlagSet::INFO),
            'x' => builder.add_flags(FlagSet::XPATH),
            'i' => {
                let mut digits = String::new();
                while chars.peek().is_some_and(char::is_ascii_digit) {
                    digits.push(chars.next().unwrap());
                }
                if let Ok(n) = digits.parse() {
                    builder.set_indent_by(n);
                }
            }
            _ => {}
        }
    }
}
