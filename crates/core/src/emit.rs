//! The `emit` driver: scans a format string for `{…}` directives, renders
//! each field through [`crate::render`], and runs the resulting composite
//! template through [`printf::format`] exactly once.
//!
//! `{{` and `}}` are the only recognized brace escapes and stand for a
//! literal `{` / `}` respectively — a lone unescaped `{` always opens a
//! directive and a lone `}` outside one is passed through as literal text
//! (see DESIGN.md for why this reading, not a block-escape, was chosen).

use multiout_diagnostics::Diagnostic;

use crate::directive;
use crate::error::EmitResult;
use crate::handle::Handle;
use crate::printf::{self, Arg};
use crate::render;

/// Render one call's format string and arguments through `handle`,
/// writing the result to its sink and also returning it.
pub fn emit(handle: &mut Handle, fmt: &str, args: &[Arg]) -> EmitResult<String> {
    handle.template.clear();
    let mut i = 0usize;
    let mut literal_buf = String::new();

    while i < fmt.len() {
        let rest = &fmt[i..];
        if rest.starts_with("{{") {
            literal_buf.push('{');
            i += 2;
        } else if rest.starts_with("}}") {
            literal_buf.push('}');
            i += 2;
        } else if rest.starts_with('{') {
            flush_literal(handle, &mut literal_buf);
            let body_start = i + 1;
            let raw_body = &fmt[body_start..];
            let raw_consumed = parse_and_render(handle, raw_body);
            i = body_start + raw_consumed;
        } else {
            let c = rest.chars().next().expect("i < fmt.len()");
            literal_buf.push(c);
            i += c.len_utf8();
        }
    }
    flush_literal(handle, &mut literal_buf);

    let rendered = printf::format(&handle.template, args)?;
    handle.output.reset();
    handle.output.push_str(&rendered);
    handle.flush(handle.output.as_bytes())?;
    Ok(rendered)
}

/// Parse one directive body, optionally passed through the handle's
/// [`crate::handle::Formatter`] hook first, and render it immediately.
///
/// Rendering happens inside this function (rather than returning the
/// parsed [`crate::directive::Directive`]) because a formatter rewrite
/// produces an owned `String` whose borrow cannot outlive this call — the
/// original `raw_body`, not the rewritten text, is what determines how
/// many bytes of the *original* format string this directive consumed.
fn parse_and_render(handle: &mut Handle, raw_body: &str) -> usize {
    let rewritten = handle.formatter.as_mut().and_then(|f| f.rewrite(raw_body));
    match rewritten {
        Some(owned_body) => {
            let mut warnings = Vec::new();
            let (directive, _) = directive::parse(&owned_body, |d| warnings.push(d));
            forward_warnings(handle, warnings);
            render::render_field(handle, &directive);
            directive::parse(raw_body, |_| {}).1
        }
        None => {
            let mut warnings = Vec::new();
            let (directive, consumed) = directive::parse(raw_body, |d| warnings.push(d));
            forward_warnings(handle, warnings);
            render::render_field(handle, &directive);
            consumed
        }
    }
}

fn forward_warnings(handle: &mut Handle, warnings: Vec<Diagnostic>) {
    for mut diag in warnings {
        diag.path = handle.stack.names().map(str::to_string).collect();
        handle.warn_directive(diag);
    }
}

/// Append a run of literal text, splitting on embedded newlines so HTML
/// can close its per-line `<div>` at each one (see [`render::line_close`]).
fn flush_literal(handle: &mut Handle, buf: &mut String) {
    if buf.is_empty() {
        return;
    }
    for (n, part) in buf.split('\n').enumerate() {
        if n > 0 {
            render::line_close(handle);
        }
        if !part.is_empty() {
            render::render_literal_text(handle, part);
        }
    }
    buf.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Handle;
    use crate::sink::SharedSink;
    use crate::style::{FlagSet, Style};
    use multiout_diagnostics::CollectingSink;

    #[test]
    fn literal_text_and_value_compose_in_order() {
        let mut handle = Handle::builder(Style::Text).sink(crate::sink::MemorySink::new()).build();
        let out = emit(&mut handle, "Item: {:name/%s}\n", &[Arg::Str("gum".into())]).unwrap();
        assert_eq!(out, "Item: gum\n");
    }

    #[test]
    fn brace_escapes_produce_literal_braces() {
        let mut handle = Handle::builder(Style::Text).sink(crate::sink::MemorySink::new()).build();
        let out = emit(&mut handle, "{{literal}}", &[]).unwrap();
        assert_eq!(out, "{literal}");
    }

    #[test]
    fn unterminated_brace_escape_at_end_of_string_is_literal() {
        let mut handle = Handle::builder(Style::Text).sink(crate::sink::MemorySink::new()).build();
        let out = emit(&mut handle, "tail {{", &[]).unwrap();
        assert_eq!(out, "tail {");
    }

    #[test]
    fn xml_emits_only_value_fields() {
        let mut handle = Handle::builder(Style::Xml).sink(crate::sink::MemorySink::new()).build();
        let out = emit(
            &mut handle,
            "{L:Count}{:count/%d}",
            &[Arg::Int(3)],
        )
        .unwrap();
        assert_eq!(out, "<count>3</count>");
    }

    #[test]
    fn json_multiple_values_join_with_commas() {
        let mut handle = Handle::builder(Style::Json).sink(crate::sink::MemorySink::new()).build();
        crate::hierarchy::open_container(&mut handle, "top").unwrap();
        let out = emit(
            &mut handle,
            "{:name/%s}{:sold/%u}",
            &[Arg::Str("gum".into()), Arg::UInt(1412)],
        )
        .unwrap();
        assert_eq!(out, "\"name\":\"gum\",\"sold\":1412");
    }

    #[test]
    fn html_splits_divs_on_newline() {
        let mut handle = Handle::builder(Style::Html).sink(crate::sink::MemorySink::new()).build();
        let out = emit(&mut handle, "{:a/%s}\n{:b/%s}\n", &[Arg::Str("x".into()), Arg::Str("y".into())])
            .unwrap();
        assert_eq!(
            out,
            "<div class=\"line\"><div class=\"data\" data-tag=\"a\">x</div></div>\n\
             <div class=\"line\"><div class=\"data\" data-tag=\"b\">y</div></div>\n"
        );
    }

    #[test]
    fn malformed_directive_warns_with_stack_path_but_still_renders() {
        let mut handle = Handle::builder(Style::Text)
            .flags(FlagSet::WARN)
            .warnings(CollectingSink::default())
            .sink(crate::sink::MemorySink::new())
            .build();
        crate::hierarchy::open_container(&mut handle, "top").unwrap();
        let out = emit(&mut handle, "{Z:count/%d}", &[Arg::Int(1)]).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn emit_writes_through_the_sink_too() {
        let sink = SharedSink::new();
        let mut handle = Handle::builder(Style::Text).sink(sink.clone()).build();
        emit(&mut handle, "hi\n", &[]).unwrap();
        assert_eq!(sink.as_str(), "hi\n");
    }
}
