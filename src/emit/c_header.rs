//! C header output for the epdiy e-paper driver

use std::io::{self, Write};

use super::ResourceEmitter;
use crate::layout::FontResource;

/// Bytes per line in the bitmap array.
const BYTES_PER_LINE: usize = 16;

/// Emits `EpdFont` definitions as a self-contained C header.
#[derive(Debug, Clone, Copy, Default)]
pub struct CHeaderEmitter;

impl ResourceEmitter for CHeaderEmitter {
    fn emit(&self, name: &str, resource: &FontResource, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "#pragma once")?;
        writeln!(out, "#include \"epd_driver.h\"")?;

        writeln!(
            out,
            "const uint8_t {name}Bitmaps[{}] = {{",
            resource.bitmap_blob.len()
        )?;
        for line in resource.bitmap_blob.chunks(BYTES_PER_LINE) {
            let bytes: Vec<String> = line.iter().map(|b| format!("0x{b:02X},")).collect();
            writeln!(out, "    {}", bytes.join(" "))?;
        }
        writeln!(out, "}};")?;

        writeln!(out, "const EpdGlyph {name}Glyphs[] = {{")?;
        for g in &resource.glyphs {
            writeln!(
                out,
                "    {{ {}, {}, {}, {}, {}, {}, {} }}, // {}",
                g.width,
                g.height,
                g.advance_x,
                g.left,
                g.top,
                g.compressed_size,
                g.data_offset,
                comment_label(g.code_point)
            )?;
        }
        writeln!(out, "}};")?;

        writeln!(out, "const EpdUnicodeInterval {name}Intervals[] = {{")?;
        for entry in &resource.intervals {
            writeln!(
                out,
                "    {{ 0x{:X}, 0x{:X}, 0x{:X} }},",
                entry.start, entry.end, entry.glyph_offset
            )?;
        }
        writeln!(out, "}};")?;

        writeln!(out, "const EpdFont {name} = {{")?;
        writeln!(out, "    {name}Bitmaps,")?;
        writeln!(out, "    {name}Glyphs,")?;
        writeln!(out, "    {name}Intervals,")?;
        writeln!(out, "    {},", resource.interval_count)?;
        writeln!(out, "    {},", u8::from(resource.compressed))?;
        writeln!(out, "    {},", resource.line_height)?;
        writeln!(out, "    {},", resource.ascender)?;
        writeln!(out, "    {},", resource.descender)?;
        writeln!(out, "}};")?;
        Ok(())
    }
}

/// Text for the trailing `//` comment of a glyph row.
///
/// A backslash would splice the next line into the comment, and control
/// characters would break the line, so both are spelled out.
fn comment_label(code_point: u32) -> String {
    match char::from_u32(code_point) {
        Some('\\') => "<backslash>".to_string(),
        Some(c) if !c.is_control() => c.to_string(),
        _ => format!("U+{code_point:04X}"),
    }
}
