//! The `{…}` directive grammar.
//!
//! ```text
//! directive := modifiers [ ':' content ] [ '/' print-format [ '/' encode-format ] ] '}'
//! modifiers := { 'T' | 'V' | 'L' | 'D' | 'P' | 'C' | 'W' | 'H' | 'Q' | 'N' }
//! content, print-format, encode-format := bytes not containing ':' '/' '}'
//! ```
//!
//! [`{{` / `}}`] escape handling happens one level up, in `emit` — by the
//! time a directive body reaches [`parse`], the surrounding braces are
//! known not to be an escape pair.

use bitflags::bitflags;

use multiout_diagnostics::{codes, Diagnostic, Severity};

/// The semantic role a field plays, selected by at most one of the
/// `T`/`V`/`L`/`D`/`P` modifiers (absence defaults to `Value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// An ordinary value field (`V`, or no role modifier at all).
    Value,
    /// A title (`T`).
    Title,
    /// A label (`L`).
    Label,
    /// A decoration (`D`).
    Decoration,
    /// Padding (`P`).
    Padding,
}

bitflags! {
    /// Non-role modifiers, any combination of which may be set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        /// `C` — emit a trailing `:` decoration after this field.
        const COLON   = 1 << 0;
        /// `W` — emit a trailing space-padding after this field.
        const WS      = 1 << 1;
        /// `H` — hide this field from TEXT/HTML output.
        const HIDE    = 1 << 2;
        /// `Q` — force JSON string quoting regardless of format.
        const QUOTE   = 1 << 3;
        /// `N` — force no JSON string quoting regardless of format.
        const NOQUOTE = 1 << 4;
    }
}

/// A fully parsed `{…}` directive.
///
/// Transient: borrows its string fields from the format string being
/// scanned and does not outlive that scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// The field's role.
    pub role: Role,
    /// Non-role modifiers in effect.
    pub modifiers: Modifiers,
    /// The field name (value fields) or literal text (label/title/
    /// decoration/padding fields).
    pub content: &'a str,
    /// Host-format conversion spec for TEXT/HTML; defaults to `"%s"`.
    pub print_format: &'a str,
    /// Host-format conversion spec for XML/JSON; falls back to
    /// `print_format` when absent.
    pub encode_format: Option<&'a str>,
}

impl<'a> Directive<'a> {
    /// The conversion spec XML/JSON renderers should use.
    #[must_use]
    pub fn effective_encode_format(&self) -> &'a str {
        self.encode_format.unwrap_or(self.print_format)
    }
}

/// Parse one directive body (the text immediately following `{`).
///
/// Returns the parsed directive plus the number of bytes of `body`
/// consumed, including a terminating `}` if one was found. If `body`
/// ends before a `}` is seen, the directive is treated as terminating at
/// end-of-string and `consumed == body.len()`.
pub fn parse<'a>(body: &'a str, mut warn: impl FnMut(Diagnostic)) -> (Directive<'a>, usize) {
    let mut role: Option<Role> = None;
    let mut modifiers = Modifiers::empty();
    let mut pos = 0usize;

    loop {
        let Some(c) = body[pos..].chars().next() else {
            return (
                Directive {
                    role: role.unwrap_or(Role::Value),
                    modifiers,
                    content: "",
                    print_format: "%s",
                    encode_format: None,
                },
                pos,
            );
        };
        if matches!(c, ':' | '/' | '}') {
            break;
        }
        apply_modifier(c, &mut role, &mut modifiers, &mut warn);
        pos += c.len_utf8();
    }

    let mut content = "";
    if body[pos..].starts_with(':') {
        pos += 1;
        let start = pos;
        let end = find_delim(&body[pos..], &['/', '}']).map_or(body.len(), |off| pos + off);
        content = &body[start..end];
        pos = end;
    }

    let mut print_format = "%s";
    let mut encode_format = None;

    if body[pos..].starts_with('/') {
        pos += 1;
        let start = pos;
        let end = find_delim(&body[pos..], &['/', '}']).map_or(body.len(), |off| pos + off);
        print_format = &body[start..end];
        pos = end;

        if body[pos..].starts_with('/') {
            pos += 1;
            let start = pos;
            let end = find_delim(&body[pos..], &['}']).map_or(body.len(), |off| pos + off);
            encode_format = Some(&body[start..end]);
            pos = end;
        }
    }

    if body[pos..].starts_with('}') {
        pos += 1;
    }

    (
        Directive {
            role: role.unwrap_or(Role::Value),
            modifiers,
            content,
            print_format,
            encode_format,
        },
        pos,
    )
}

fn find_delim(s: &str, delims: &[char]) -> Option<usize> {
    s.find(|c: char| delims.contains(&c))
}

fn apply_modifier(
    c: char,
    role: &mut Option<Role>,
    modifiers: &mut Modifiers,
    warn: &mut impl FnMut(Diagnostic),
) {
    let new_role = match c {
        'T' => Some(Role::Title),
        'V' => Some(Role::Value),
        'L' => Some(Role::Label),
        'D' => Some(Role::Decoration),
        'P' => Some(Role::Padding),
        _ => None,
    };
    if let Some(r) = new_role {
        if role.is_some() {
            warn(Diagnostic::new(
                codes::DUPLICATE_ROLE,
                Severity::Warn,
                format!("duplicate role modifier '{c}'"),
                Vec::new(),
            ));
        }
        *role = Some(r);
        return;
    }
    match c {
        'C' => *modifiers |= Modifiers::COLON,
        'W' => *modifiers |= Modifiers::WS,
        'H' => *modifiers |= Modifiers::HIDE,
        'Q' => *modifiers |= Modifiers::QUOTE,
        'N' => *modifiers |= Modifiers::NOQUOTE,
        _ => warn(Diagnostic::new(
            codes::UNKNOWN_MODIFIER,
            Severity::Warn,
            format!("unknown modifier '{c}'"),
            Vec::new(),
        )),
    }
}
