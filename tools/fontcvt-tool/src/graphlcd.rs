//! Re-emission of a [`Font`] as C source for the GraphLCD embedded graphics library.

use std::io::{self, Write};

use font::model::{DumpError, Font};

/// The number of bytes written per line of a `graphlcd_compat` array.
const COMPAT_BYTES_PER_LINE: usize = 16;

/// Returns the C identifier used for `font`: its name, else its source file stem, else `font`.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, and a leading digit is prefixed with `_`.
pub fn symbol_name(font: &Font) -> String {
    let name = font.name().or(font.source_name()).unwrap_or("font");

    let mut symbol = String::with_capacity(name.len() + 1);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        symbol.push('_');
    }
    symbol.extend(name.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));
    symbol
}

/// Writes `font` as a GraphLCD glyph table: one array per glyph, a `GLCD_Glyph` table, and a
/// `GLCD_Font` descriptor.
///
/// # Errors
///
/// Returns [`Err`] if writing to `writer` fails.
pub fn write_graphlcd<W: Write>(font: &Font, mut writer: W) -> io::Result<()> {
    let symbol = symbol_name(font);
    write_banner(font, &symbol, &mut writer)?;

    writeln!(writer, "#include <stdint.h>")?;
    writeln!(writer, "#include \"graphlcd_font.h\"")?;
    writeln!(writer)?;

    for (index, glyph) in font.glyphs().iter().enumerate() {
        writeln!(
            writer,
            "/* U+{:04X}: {} x {} */",
            glyph.code_point(),
            glyph.width(),
            glyph.height()
        )?;
        writeln!(
            writer,
            "static const uint8_t {symbol}_glyph{index}[{}] = {{",
            glyph.width() * glyph.height()
        )?;
        for row in glyph.bitmap() {
            write!(writer, "   ")?;
            for byte in row {
                write!(writer, " 0x{byte:02X},")?;
            }
            writeln!(writer)?;
        }
        writeln!(writer, "}};")?;
        writeln!(writer)?;
    }

    let glyph_table = if font.glyph_count() == 0 {
        "0".to_owned()
    } else {
        writeln!(
            writer,
            "static const GLCD_Glyph {symbol}_glyphs[{}] = {{",
            font.glyph_count()
        )?;
        for (index, glyph) in font.glyphs().iter().enumerate() {
            writeln!(
                writer,
                "    {{ 0x{:04X}, {}, {}, {symbol}_glyph{index} }},",
                glyph.code_point(),
                glyph.width(),
                glyph.height()
            )?;
        }
        writeln!(writer, "}};")?;
        writeln!(writer)?;

        format!("{symbol}_glyphs")
    };

    writeln!(
        writer,
        "const GLCD_Font {symbol} = {{ {}, {}, {glyph_table} }};",
        font.glyph_count(),
        font.mode().as_tag()
    )
}

/// Writes `font` in the legacy `graphlcd_compat` layout: a single byte array holding the font
/// blob exactly as [`Font::dump`] produces it.
///
/// # Errors
///
/// Returns [`DumpError`] if the font cannot be represented as a blob or writing fails.
pub fn write_graphlcd_compat<W: Write>(font: &Font, mut writer: W) -> Result<(), DumpError> {
    let mut blob = Vec::new();
    font.dump(&mut blob)?;

    let symbol = symbol_name(font);
    write_banner(font, &symbol, &mut writer)?;

    writeln!(writer, "const unsigned char {symbol}[{}] = {{", blob.len())?;
    for chunk in blob.chunks(COMPAT_BYTES_PER_LINE) {
        write!(writer, "  ")?;
        for byte in chunk {
            write!(writer, "0x{byte:02X},")?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "}};")?;

    Ok(())
}

/// Writes the comment at the top of every generated file.
fn write_banner<W: Write>(font: &Font, symbol: &str, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "/*")?;
    writeln!(writer, " * {symbol}")?;
    match font.source_name() {
        Some(source_name) => writeln!(
            writer,
            " * Generated by fontcvt-tool {} from {source_name}.c",
            env!("CARGO_PKG_VERSION")
        )?,
        None => writeln!(
            writer,
            " * Generated by fontcvt-tool {}",
            env!("CARGO_PKG_VERSION")
        )?,
    }
    writeln!(
        writer,
        " * Glyphs: {}, mode: {}",
        font.glyph_count(),
        font.mode()
    )?;
    writeln!(writer, " */")?;
    writeln!(writer)
}
