//! Human-readable listing of a laid-out subtree.
//!
//! Each item prints a header line followed by its frame and flex fields,
//! indented by depth. Colors are ANSI escapes.

use std::io::{self, Write};

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    ItemId, Tree,
    error::{Error, Result},
    geom::Rect,
    style::Position,
};

/// Traverses the subtree at `root` and returns a string showing each item's
/// id, frame and main flex properties for visual display. This is a debug
/// function.
pub fn dump(tree: &Tree, root: ItemId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_item(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Map a write failure into the crate error type.
fn io_err(e: io::Error) -> Error {
    Error::Internal(format!("dump: {e}"))
}

/// Helper to write an indented, colored label followed by a value
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> io::Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")
}

/// Format a frame.
fn fmt_rect(r: &Rect) -> String {
    format!("x: {}, y: {}, w: {}, h: {}", r.tl.x, r.tl.y, r.w, r.h)
}

/// Write one item and recurse into its children.
fn dump_item(buffer: &mut Buffer, tree: &Tree, id: ItemId, level: usize) -> Result<()> {
    let item = tree.item(id).ok_or(Error::ItemNotFound(id))?;
    let style = item.style();
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}").map_err(io_err)?;
    buffer
        .set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))
        .map_err(io_err)?;
    write!(buffer, "{id:?}").map_err(io_err)?;
    buffer.reset().map_err(io_err)?;

    let mut flags = Vec::new();
    if !style.visible {
        flags.push("hidden");
    }
    if style.position == Position::Absolute {
        flags.push("absolute");
    }
    if item.has_self_sizing() {
        flags.push("self-sizing");
    }
    if !flags.is_empty() {
        buffer
            .set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))
            .map_err(io_err)?;
        write!(buffer, " ({})", flags.join(", ")).map_err(io_err)?;
        buffer.reset().map_err(io_err)?;
    }
    writeln!(buffer).map_err(io_err)?;

    write_field(buffer, &indent, "frame:", &fmt_rect(&item.frame())).map_err(io_err)?;
    write_field(
        buffer,
        &indent,
        "flex:",
        &format!(
            "grow {} shrink {} basis {:?} order {}",
            style.grow, style.shrink, style.basis, style.order
        ),
    )
    .map_err(io_err)?;
    if !item.children().is_empty() {
        write_field(
            buffer,
            &indent,
            "container:",
            &format!(
                "{:?} {:?} justify {:?} items {:?} content {:?}",
                style.direction,
                style.wrap,
                style.justify_content,
                style.align_items,
                style.align_content
            ),
        )
        .map_err(io_err)?;
    }

    for &child in item.children() {
        dump_item(buffer, tree, child, level + 1)?;
    }
    Ok(())
}
