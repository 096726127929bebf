//! A minimal printf-compatible conversion-spec interpreter.
//!
//! The design this library is modeled on builds a composite format
//! template and hands it to the host's variadic `printf`-family formatter
//! for final substitution. Rust has no variadic-printf analogue, so this
//! module takes the alternative the design notes call out: parse each
//! conversion specifier out of the template and consume arguments one at
//! a time, in order, supporting the flags/width/precision/conversion
//! combinations this library actually emits (`%s`, `%d`, `%u`, `%x`,
//! `%f`, `%c`) plus the literal `%%` escape.

use crate::error::EmitError;
use crate::escape;

/// Marks the conversion specifier immediately following it as needing
/// escaping once substituted. Renderers insert this ahead of a deferred
/// `%`-specifier rather than escaping eagerly, since the substituted
/// text does not exist until the single host-format pass in [`format`]
/// — this is how that pass stays single-pass even for fields whose
/// content must be escaped only after the caller's argument is known.
/// Not part of the public `{…}` directive grammar; never appears in a
/// caller-supplied format string.
const ESCAPE_MARKER: char = '\u{1}';

/// Escape kind for text content inside XML elements or HTML `<div>`s.
pub(crate) const ESCAPE_TEXT_MARKER: &str = "\u{1}X";
/// Escape kind for a quoted JSON string value.
pub(crate) const ESCAPE_JSON_MARKER: &str = "\u{1}J";

/// One variadic argument, in the order the caller supplied it.
#[derive(Debug, Clone)]
pub enum Arg {
    /// A string argument (`%s`).
    Str(String),
    /// A signed integer argument (`%d`, `%i`).
    Int(i64),
    /// An unsigned integer argument (`%u`, `%x`, `%X`, `%o`).
    UInt(u64),
    /// A floating point argument (`%f`, `%e`, `%g`).
    Float(f64),
    /// A single character argument (`%c`).
    Char(char),
    /// A boolean, rendered as `true`/`false` under `%s`.
    Bool(bool),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}
impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}
impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}
impl From<u64> for Arg {
    fn from(v: u64) -> Self {
        Arg::UInt(v)
    }
}
impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}
impl From<char> for Arg {
    fn from(v: char) -> Self {
        Arg::Char(v)
    }
}
impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Substitute each conversion specifier in `template` with the next
/// argument from `args`, in order. Non-`%` bytes (and `%%`) pass through
/// unchanged.
pub fn format(template: &str, args: &[Arg]) -> Result<String, EmitError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut arg_iter = args.iter();
    let mut pending_escape: Option<char> = None;

    while let Some(c) = chars.next() {
        if c == ESCAPE_MARKER {
            pending_escape = chars.next();
            continue;
        }
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        let mut spec = Spec::default();
        loop {
            match chars.peek() {
                Some('-') => {
                    spec.left_align = true;
                    chars.next();
                }
                Some('0') => {
                    spec.zero_pad = true;
                    chars.next();
                }
                Some('+') => {
                    spec.plus_sign = true;
                    chars.next();
                }
                _ => break,
            }
        }
        let mut width_digits = String::new();
        while chars.peek().is_some_and(char::is_ascii_digit) {
            width_digits.push(chars.next().unwrap());
        }
        if !width_digits.is_empty() {
            spec.width = width_digits.parse().ok();
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision_digits = String::new();
            while chars.peek().is_some_and(char::is_ascii_digit) {
                precision_digits.push(chars.next().unwrap());
            }
            spec.precision = Some(precision_digits.parse().unwrap_or(0));
        }

        let conv = chars
            .next()
            .ok_or_else(|| EmitError::Formatter("truncated conversion specifier".into()))?;

        let arg = arg_iter
            .next()
            .ok_or_else(|| EmitError::Formatter(format!("missing argument for '%{conv}'")))?;

        let rendered = render_one(conv, &spec, arg)?;
        let rendered = match pending_escape.take() {
            Some('X') => escape::escape_text(&rendered).into_owned(),
            Some('J') => escape::escape_json(&rendered).into_owned(),
            _ => rendered,
        };
        out.push_str(&pad(&rendered, &spec));
    }

    Ok(out)
}

fn render_one(conv: char, spec: &Spec, arg: &Arg) -> Result<String, EmitError> {
    match conv {
        's' => Ok(match arg {
            Arg::Str(s) => s.clone(),
            Arg::Bool(b) => b.to_string(),
            Arg::Int(v) => v.to_string(),
            Arg::UInt(v) => v.to_string(),
            Arg::Float(v) => v.to_string(),
            Arg::Char(c) => c.to_string(),
        }),
        'd' | 'i' => {
            let v = as_i64(arg)?;
            Ok(if spec.plus_sign && v >= 0 {
                format!("+{v}")
            } else {
                v.to_string()
            })
        }
        'u' => Ok(as_u64(arg)?.to_string()),
        'x' => Ok(format!("{:x}", as_u64(arg)?)),
        'X' => Ok(format!("{:X}", as_u64(arg)?)),
        'o' => Ok(format!("{:o}", as_u64(arg)?)),
        'f' | 'e' | 'g' => {
            let v = as_f64(arg)?;
            let precision = spec.precision.unwrap_or(6);
            Ok(format!("{v:.precision$}"))
        }
        'c' => match arg {
            Arg::Char(c) => Ok(c.to_string()),
            Arg::Str(s) => Ok(s.chars().next().map(String::from).unwrap_or_default()),
            other => Err(EmitError::Formatter(format!(
                "'%c' requires a char argument, got {other:?}"
            ))),
        },
        other => Err(EmitError::Formatter(format!(
            "unsupported conversion '%{other}'"
        ))),
    }
}

fn as_i64(arg: &Arg) -> Result<i64, EmitError> {
    match arg {
        Arg::Int(v) => Ok(*v),
        Arg::UInt(v) => Ok(*v as i64),
        other => Err(EmitError::Formatter(format!(
            "integer conversion requires a numeric argument, got {other:?}"
        ))),
    }
}

fn as_u64(arg: &Arg) -> Result<u64, EmitError> {
    match arg {
        Arg::UInt(v) => Ok(*v),
        Arg::Int(v) => Ok(*v as u64),
        other => Err(EmitError::Formatter(format!(
            "unsigned conversion requires a numeric argument, got {other:?}"
        ))),
    }
}

fn as_f64(arg: &Arg) -> Result<f64, EmitError> {
    match arg {
        Arg::Float(v) => Ok(*v),
        Arg::Int(v) => Ok(*v as f64),
        Arg::UInt(v) => Ok(*v as f64),
        other => Err(EmitError::Formatter(format!(
            "float conversion requires a numeric argument, got {other:?}"
        ))),
    }
}

/// Double every `%` in `text` so it survives the template unchanged
/// through the final [`format`] pass, instead of being read as (part
/// of) a conversion specifier.
///
/// Renderers use this for every piece of text known at template-build
/// time — field names, label/decoration/padding content, eagerly
/// rendered titles — since only `Role::Value`'s `print_format`/
/// `encode_format` are meant to stay live specifiers.
pub(crate) fn literal(text: &str) -> String {
    if !text.contains('%') {
        return text.to_string();
    }
    text.replace('%', "%%")
}

fn pad(rendered: &str, spec: &Spec) -> String {
    let Some(width) = spec.width else {
        return rendered.to_string();
    };
    let len = rendered.chars().count();
    if len >= width {
        return rendered.to_string();
    }
    let fill = width - len;
    if spec.left_align {
        format!("{rendered}{}", " ".repeat(fill))
    } else if spec.zero_pad {
        format!("{}{rendered}", "0".repeat(fill))
    } else {
        format!("{}{rendered}", " ".repeat(fill))
    }
}
