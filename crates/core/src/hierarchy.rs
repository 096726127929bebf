//! Container / list / instance operations.
//!
//! Unlike [`crate::render`], these write directly through the handle's
//! sink at call time rather than through the per-call template buffer —
//! per the design this follows, hierarchy operations are not part of an
//! `emit()` call and have no variadic arguments to wait for.

use multiout_diagnostics::codes;

use crate::error::EmitResult;
use crate::handle::Handle;
use crate::stack::FrameFlags;
use crate::style::{FlagSet, Style};

fn indent_str(handle: &Handle) -> String {
    if handle.flags.contains(FlagSet::PRETTY) {
        " ".repeat(handle.indent * handle.indent_by)
    } else {
        String::new()
    }
}

fn nl(handle: &Handle) -> &'static str {
    if handle.flags.contains(FlagSet::PRETTY) {
        "\n"
    } else {
        ""
    }
}

fn push_frame(handle: &mut Handle, name: &str, flags: FrameFlags) -> EmitResult<()> {
    let keep_name = handle.flags.contains(FlagSet::XPATH) || handle.flags.contains(FlagSet::WARN);
    let owned_name = keep_name.then(|| name.to_string());
    if handle.stack.push(flags, owned_name) {
        Ok(())
    } else {
        let max = handle.stack.capacity();
        handle.warn_stack(codes::STACK_OVERFLOW, format!("stack overflow opening '{name}'"));
        Err(crate::error::EmitError::StackOverflow { max })
    }
}

/// Pop the innermost frame, warning (if `WARN` is set) on any mismatch
/// between what the caller claims to be closing and what was actually
/// open. A close with an empty stack is itself a warning and a no-op.
fn pop_frame_checked(handle: &mut Handle, name: &str, expect_list: bool, expect_instance: bool) {
    let Some(frame) = handle.stack.pop() else {
        handle.warn_stack(codes::CLOSE_WITHOUT_OPEN, format!("close '{name}' with no matching open"));
        return;
    };
    if !handle.flags.contains(FlagSet::WARN) {
        return;
    }
    if let Some(frame_name) = &frame.name {
        if frame_name != name {
            handle.warn_stack(
                codes::NAME_MISMATCH,
                format!("close '{name}' does not match open '{frame_name}'"),
            );
        }
    }
    if frame.flags.contains(FrameFlags::LIST) != expect_list {
        handle.warn_stack(codes::LIST_MISMATCH, format!("close '{name}' list-bit mismatch"));
    }
    if frame.flags.contains(FrameFlags::INSTANCE) != expect_instance {
        handle.warn_stack(codes::INSTANCE_MISMATCH, format!("close '{name}' instance-bit mismatch"));
    }
}

fn json_scope_open(handle: &mut Handle, key: Option<&str>, open_char: char) -> EmitResult<()> {
    let parent_not_first = handle
        .stack
        .top()
        .is_some_and(|f| f.flags.contains(FrameFlags::NOT_FIRST));
    let mut buf = String::new();
    if parent_not_first {
        buf.push(',');
        buf.push_str(nl(handle));
    }
    buf.push_str(&indent_str(handle));
    if let Some(k) = key {
        buf.push('"');
        buf.push_str(k);
        buf.push_str("\": ");
    }
    buf.push(open_char);
    buf.push_str(nl(handle));
    handle.flush(buf.as_bytes())
}

fn json_scope_close(handle: &mut Handle, close_char: char) -> EmitResult<()> {
    handle.indent = handle.indent.saturating_sub(1);
    let mut buf = String::new();
    buf.push_str(nl(handle));
    buf.push_str(&indent_str(handle));
    buf.push(close_char);
    // A trailing newline only at shallow depth (top-level close), so a
    // deeply nested close doesn't leave a blank line before the sibling
    // separator the enclosing scope adds.
    if handle.stack.depth() <= 1 {
        buf.push_str(nl(handle));
    }
    handle.flush(buf.as_bytes())?;
    if let Some(top) = handle.stack.top_mut() {
        top.flags |= FrameFlags::NOT_FIRST;
    }
    Ok(())
}

fn json_mark_parent_not_first(handle: &mut Handle) {
    if let Some(parent) = handle.stack.parent_mut() {
        parent.flags |= FrameFlags::NOT_FIRST;
    }
}

/// JSON has no bare top-level key the way XML has an implicit document
/// root, so the first open at depth 0 wraps the whole document in an
/// object literal; the matching close (at [`json_document_close`]) ends it.
fn json_document_open(handle: &mut Handle) -> EmitResult<()> {
    let buf = format!("{{{}", nl(handle));
    handle.flush(buf.as_bytes())?;
    handle.indent += 1;
    Ok(())
}

fn json_document_close(handle: &mut Handle) -> EmitResult<()> {
    handle.indent = handle.indent.saturating_sub(1);
    let buf = format!("{}}}{}", indent_str(handle), nl(handle));
    handle.flush(buf.as_bytes())
}

/// Open a named container (`{name: { ... } }` in JSON, `<name>` in XML).
pub fn open_container(handle: &mut Handle, name: &str) -> EmitResult<()> {
    match handle.style {
        Style::Xml => {
            let buf = format!("{}<{name}>{}", indent_str(handle), nl(handle));
            handle.flush(buf.as_bytes())?;
            handle.indent += 1;
        }
        Style::Json => {
            if handle.stack.depth() == 0 {
                json_document_open(handle)?;
            }
            json_scope_open(handle, Some(name), '{')?;
            handle.indent += 1;
        }
        Style::Text | Style::Html => {}
    }
    push_frame(handle, name, FrameFlags::empty())?;
    if handle.style == Style::Json {
        json_mark_parent_not_first(handle);
    }
    Ok(())
}

/// Close a container opened with [`open_container`].
pub fn close_container(handle: &mut Handle, name: &str) -> EmitResult<()> {
    pop_frame_checked(handle, name, false, false);
    match handle.style {
        Style::Xml => {
            handle.indent = handle.indent.saturating_sub(1);
            let buf = format!("{}</{name}>{}", indent_str(handle), nl(handle));
            handle.flush(buf.as_bytes())
        }
        Style::Json => {
            json_scope_close(handle, '}')?;
            if handle.stack.depth() == 0 {
                json_document_close(handle)?;
            }
            Ok(())
        }
        Style::Text | Style::Html => Ok(()),
    }
}

/// Open a named list; only meaningful for JSON (a JSON array), a no-op
/// elsewhere besides hierarchy bookkeeping.
pub fn open_list(handle: &mut Handle, name: &str) -> EmitResult<()> {
    if handle.style == Style::Json {
        if handle.stack.depth() == 0 {
            json_document_open(handle)?;
        }
        json_scope_open(handle, Some(name), '[')?;
        handle.indent += 1;
    }
    push_frame(handle, name, FrameFlags::LIST)?;
    if handle.style == Style::Json {
        json_mark_parent_not_first(handle);
    }
    Ok(())
}

/// Close a list opened with [`open_list`].
pub fn close_list(handle: &mut Handle, name: &str) -> EmitResult<()> {
    pop_frame_checked(handle, name, true, false);
    if handle.style == Style::Json {
        json_scope_close(handle, ']')?;
        if handle.stack.depth() == 0 {
            json_document_close(handle)?;
        }
        Ok(())
    } else {
        Ok(())
    }
}

/// Open one instance inside a list (a repeated XML element, an unnamed
/// JSON object within the enclosing array).
pub fn open_instance(handle: &mut Handle, name: &str) -> EmitResult<()> {
    match handle.style {
        Style::Xml => {
            let buf = format!("{}<{name}>{}", indent_str(handle), nl(handle));
            handle.flush(buf.as_bytes())?;
            handle.indent += 1;
        }
        Style::Json => {
            if handle.stack.depth() == 0 {
                json_document_open(handle)?;
            }
            json_scope_open(handle, None, '{')?;
            handle.indent += 1;
        }
        Style::Text | Style::Html => {}
    }
    push_frame(handle, name, FrameFlags::INSTANCE)?;
    if handle.style == Style::Json {
        json_mark_parent_not_first(handle);
    }
    Ok(())
}

/// Close an instance opened with [`open_instance`].
pub fn close_instance(handle: &mut Handle, name: &str) -> EmitResult<()> {
    pop_frame_checked(handle, name, false, true);
    match handle.style {
        Style::Xml => {
            handle.indent = handle.indent.saturating_sub(1);
            let buf = format!("{}</{name}>{}", indent_str(handle), nl(handle));
            handle.flush(buf.as_bytes())
        }
        Style::Json => {
            json_scope_close(handle, '}')?;
            if handle.stack.depth() == 0 {
                json_document_close(handle)?;
            }
            Ok(())
        }
        Style::Text | Style::Html => Ok(()),
    }
}
