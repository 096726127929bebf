//! Field renderers: turn a parsed [`Directive`] into template-buffer bytes.
//!
//! Every function here appends to `handle.template`, the composite format
//! string being assembled for the call in progress (see [`crate::emit`]).
//! Literal text (field names, label/decoration/padding content, computed
//! titles, JSON punctuation, indentation) is escaped and `%`-doubled via
//! [`printf::literal`] so it survives the single host-format pass at the
//! end of the call unchanged; only a `Role::Value` field's `print_format`/
//! `encode_format` is left as a live conversion specifier, since that is
//! the one piece of a directive whose final text depends on the caller's
//! variadic argument rather than on the format string alone.

use crate::directive::{Directive, Modifiers, Role};
use crate::escape;
use crate::handle::Handle;
use crate::printf::{self, ESCAPE_JSON_MARKER, ESCAPE_TEXT_MARKER};
use crate::stack::FrameFlags;
use crate::style::{FlagSet, Style};

/// Dispatch one parsed directive to the renderer for the handle's style.
pub(crate) fn render_field(handle: &mut Handle, directive: &Directive<'_>) {
    if directive.modifiers.contains(Modifiers::HIDE) && matches!(handle.style, Style::Text | Style::Html) {
        return;
    }
    match handle.style {
        Style::Text => render_text(handle, directive),
        Style::Html => render_html(handle, directive),
        Style::Xml => render_xml(handle, directive),
        Style::Json => render_json(handle, directive),
    }
}

/// Append a run of literal (non-directive) format-string text.
///
/// XML and JSON have no notion of free text outside a directive — their
/// output is entirely structure-driven — so this is a no-op for those two
/// styles.
pub(crate) fn render_literal_text(handle: &mut Handle, text: &str) {
    match handle.style {
        Style::Text => handle.template.push_str(&printf::literal(text)),
        Style::Html => {
            ensure_line_open(handle);
            let escaped = escape::escape_text(text);
            handle.template.push_str(&printf::literal(&escaped));
        }
        Style::Xml | Style::Json => {}
    }
}

/// Open the HTML line `<div>` if one is not already open for this style.
pub(crate) fn ensure_line_open(handle: &mut Handle) {
    if handle.style == Style::Html && !handle.flags.contains(FlagSet::DIV_OPEN) {
        handle.template.push_str("<div class=\"line\">");
        handle.flags |= FlagSet::DIV_OPEN;
    }
}

/// Close the HTML line `<div>` (if open) and append the newline itself.
pub(crate) fn line_close(handle: &mut Handle) {
    match handle.style {
        Style::Html => {
            if handle.flags.contains(FlagSet::DIV_OPEN) {
                handle.template.push_str("</div>");
                handle.flags.remove(FlagSet::DIV_OPEN);
            }
            handle.template.push('\n');
        }
        Style::Text => handle.template.push('\n'),
        Style::Xml | Style::Json => {}
    }
}

fn indent_prefix(handle: &Handle) -> String {
    if handle.flags.contains(FlagSet::PRETTY) {
        " ".repeat(handle.indent * handle.indent_by)
    } else {
        String::new()
    }
}

// ---------------------------------------------------------------- TEXT ----

fn render_text(handle: &mut Handle, d: &Directive<'_>) {
    match d.role {
        Role::Value => handle.template.push_str(d.print_format),
        Role::Label | Role::Decoration | Role::Padding => {
            handle.template.push_str(&printf::literal(d.content));
        }
        Role::Title => append_rendered_title(handle, d),
    }
    if d.modifiers.contains(Modifiers::COLON) {
        handle.template.push(':');
    }
    if d.modifiers.contains(Modifiers::WS) {
        handle.template.push(' ');
    }
}

fn append_rendered_title(handle: &mut Handle, d: &Directive<'_>) {
    let rendered = printf::format(d.print_format, &[printf::Arg::Str(d.content.to_string())])
        .unwrap_or_else(|_| d.content.to_string());
    handle.template.push_str(&printf::literal(&rendered));
}

// ---------------------------------------------------------------- HTML ----

fn render_html(handle: &mut Handle, d: &Directive<'_>) {
    ensure_line_open(handle);
    match d.role {
        Role::Value => render_html_value(handle, d),
        Role::Label => wrap_html_div(handle, "label", d.content),
        Role::Decoration => wrap_html_div(handle, "decoration", d.content),
        Role::Padding => wrap_html_div(handle, "padding", d.content),
        Role::Title => {
            let rendered = printf::format(d.print_format, &[printf::Arg::Str(d.content.to_string())])
                .unwrap_or_else(|_| d.content.to_string());
            wrap_html_div(handle, "title", &rendered);
        }
    }
    if d.modifiers.contains(Modifiers::COLON) {
        wrap_html_div(handle, "decoration", ":");
    }
    if d.modifiers.contains(Modifiers::WS) {
        wrap_html_div(handle, "padding", " ");
    }
}

fn wrap_html_div(handle: &mut Handle, class: &str, text: &str) {
    handle.template.push_str("<div class=\"");
    handle.template.push_str(class);
    handle.template.push_str("\">");
    let escaped = escape::escape_text(text);
    handle.template.push_str(&printf::literal(&escaped));
    handle.template.push_str("</div>");
}

fn render_html_value(handle: &mut Handle, d: &Directive<'_>) {
    handle.template.push_str("<div class=\"data\" data-tag=\"");
    handle.template.push_str(&printf::literal(&escape::escape_attr(d.content)));
    handle.template.push('"');

    if handle.flags.contains(FlagSet::XPATH) && !d.content.is_empty() {
        let xpath = build_xpath(handle, d.content);
        handle.template.push_str(" data-xpath=\"");
        handle.template.push_str(&printf::literal(&escape::escape_attr(&xpath)));
        handle.template.push('"');
    }

    if handle.flags.contains(FlagSet::INFO) {
        if let Some(info) = handle.info.as_ref().and_then(|t| t.lookup(d.content)) {
            if let Some(ty) = &info.r#type {
                handle.template.push_str(" data-type=\"");
                handle.template.push_str(&printf::literal(&escape::escape_attr(ty)));
                handle.template.push('"');
            }
            if let Some(help) = &info.help {
                handle.template.push_str(" data-help=\"");
                handle.template.push_str(&printf::literal(&escape::escape_attr(help)));
                handle.template.push('"');
            }
        }
    }

    handle.template.push('>');
    handle.template.push_str(ESCAPE_TEXT_MARKER);
    handle.template.push_str(d.print_format);
    handle.template.push_str("</div>");
}

fn build_xpath(handle: &Handle, field_name: &str) -> String {
    let mut path = String::new();
    for name in handle.stack.names_for_xpath() {
        path.push('/');
        path.push_str(name);
    }
    path.push('/');
    path.push_str(field_name);
    path
}

// ----------------------------------------------------------------- XML ----

fn render_xml(handle: &mut Handle, d: &Directive<'_>) {
    if !matches!(d.role, Role::Value) {
        return;
    }
    handle.template.push_str(&indent_prefix(handle));
    let name = printf::literal(d.content);
    handle.template.push('<');
    handle.template.push_str(&name);
    handle.template.push('>');
    handle.template.push_str(ESCAPE_TEXT_MARKER);
    handle.template.push_str(d.effective_encode_format());
    handle.template.push_str("</");
    handle.template.push_str(&name);
    handle.template.push('>');
    if handle.flags.contains(FlagSet::PRETTY) {
        handle.template.push('\n');
    }
}

// ---------------------------------------------------------------- JSON ----

fn render_json(handle: &mut Handle, d: &Directive<'_>) {
    if !matches!(d.role, Role::Value) {
        return;
    }
    let parent_not_first = handle
        .stack
        .top()
        .is_some_and(|f| f.flags.contains(FrameFlags::NOT_FIRST));
    if parent_not_first {
        handle.template.push(',');
        if handle.flags.contains(FlagSet::PRETTY) {
            handle.template.push('\n');
        }
    }
    handle.template.push_str(&indent_prefix(handle));
    handle.template.push('"');
    handle.template.push_str(&printf::literal(d.content));
    handle.template.push_str("\":");
    if handle.flags.contains(FlagSet::PRETTY) {
        handle.template.push(' ');
    }

    let quote = should_quote(d);
    if quote {
        handle.template.push('"');
    }
    handle.template.push_str(ESCAPE_JSON_MARKER);
    handle.template.push_str(d.effective_encode_format());
    if quote {
        handle.template.push('"');
    }

    if let Some(top) = handle.stack.top_mut() {
        top.flags |= FrameFlags::NOT_FIRST;
    }
}

fn should_quote(d: &Directive<'_>) -> bool {
    if d.modifiers.contains(Modifiers::QUOTE) {
        return true;
    }
    if d.modifiers.contains(Modifiers::NOQUOTE) {
        return false;
    }
    d.effective_encode_format().ends_with('s')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive;
    use crate::printf::Arg;
    use crate::style::Style;

    fn directive_of(body: &str) -> Directive<'_> {
        directive::parse(body, |_| {}).0
    }

    fn rendered(style: Style, body: &str, args: &[Arg]) -> String {
        let mut handle = Handle::builder(style).build();
        let d = directive_of(body);
        render_field(&mut handle, &d);
        printf::format(&handle.template, args).unwrap()
    }

    #[test]
    fn text_value_uses_print_format() {
        assert_eq!(rendered(Style::Text, ":name/%s}", &[Arg::Str("gum".into())]), "gum");
    }

    #[test]
    fn text_label_is_literal() {
        assert_eq!(rendered(Style::Text, "L:Item}", &[]), "Item");
    }

    #[test]
    fn xml_value_wraps_element() {
        assert_eq!(
            rendered(Style::Xml, ":name/%s}", &[Arg::Str("gum".into())]),
            "<name>gum</name>"
        );
    }

    #[test]
    fn xml_suppresses_label() {
        assert_eq!(rendered(Style::Xml, "L:Item}", &[]), "");
    }

    #[test]
    fn xml_escapes_value_text() {
        assert_eq!(
            rendered(Style::Xml, ":name/%s}", &[Arg::Str("a & b".into())]),
            "<name>a &amp; b</name>"
        );
    }

    #[test]
    fn json_quotes_string_format_by_default() {
        assert_eq!(
            rendered(Style::Json, ":name/%s}", &[Arg::Str("gum".into())]),
            "\"name\":\"gum\""
        );
    }

    #[test]
    fn json_does_not_quote_numeric_format() {
        assert_eq!(rendered(Style::Json, ":sold/%u}", &[Arg::UInt(1412)]), "\"sold\":1412");
    }

    #[test]
    fn json_force_quote_wraps_numeric() {
        assert_eq!(rendered(Style::Json, "Q:sold/%u}", &[Arg::UInt(1412)]), "\"sold\":\"1412\"");
    }

    #[test]
    fn json_force_noquote_strips_quotes_from_string() {
        assert_eq!(
            rendered(Style::Json, "N:raw/%s}", &[Arg::Str("true".into())]),
            "\"raw\":true"
        );
    }

    #[test]
    fn html_value_has_data_tag() {
        assert_eq!(
            rendered(Style::Html, ":name/%s}", &[Arg::Str("gum".into())]),
            "<div class=\"line\"><div class=\"data\" data-tag=\"name\">gum</div>"
        );
    }

    #[test]
    fn hidden_field_suppressed_in_text_but_not_json() {
        assert_eq!(rendered(Style::Text, "H:name/%s}", &[Arg::Str("x".into())]), "");
        assert_eq!(
            rendered(Style::Json, "H:name/%s}", &[Arg::Str("x".into())]),
            "\"name\":\"x\""
        );
    }

    #[test]
    fn colon_and_ws_modifiers_append_after_text_field() {
        assert_eq!(rendered(Style::Text, "CW:name/%s}", &[Arg::Str("x".into())]), "x: ");
    }
}
