//! Selection of the output writer.

use font::model::{DumpError, Font};

use crate::graphlcd::{write_graphlcd, write_graphlcd_compat};

/// The format of the converted output.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum OutputFormat {
    /// Binary blob for an EPROM programmer or GraphLCD's embedded font loader.
    Bin,
    /// C source for the GraphLCD library.
    GraphLcd,
    /// C source compatible with legacy GraphLCD.
    GraphLcdCompat,
}

impl OutputFormat {
    /// Returns the name of the command line flag selecting the [`OutputFormat`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bin => "bin",
            Self::GraphLcd => "graphlcd",
            Self::GraphLcdCompat => "graphlcd_compat",
        }
    }
}

/// Renders `font` in `format` into memory, so nothing touches the disk unless rendering
/// succeeds.
///
/// # Errors
///
/// Returns [`DumpError`] if `font` cannot be represented in `format`.
pub fn render(font: &Font, format: OutputFormat) -> Result<Vec<u8>, DumpError> {
    let mut output = Vec::new();
    match format {
        OutputFormat::Bin => font.dump(&mut output)?,
        OutputFormat::GraphLcd => write_graphlcd(font, &mut output)?,
        OutputFormat::GraphLcdCompat => write_graphlcd_compat(font, &mut output)?,
    }

    Ok(output)
}

#[cfg(test)]
mod test {
    use font::{
        blob::FontBlob,
        model::{Font, Glyph},
    };

    use super::{OutputFormat, render};

    #[test]
    fn each_format_renders() {
        let mut font = Font::default();
        let mut glyph = Glyph::new(0x41);
        glyph.push_row(vec![0xFF]).unwrap();
        font.push(glyph);

        let bin = render(&font, OutputFormat::Bin).unwrap();
        assert_eq!(FontBlob::from_dump(&bin).unwrap().glyph_count(), 1);

        let source = render(&font, OutputFormat::GraphLcd).unwrap();
        assert!(String::from_utf8(source).unwrap().contains("GLCD_Font"));

        let compat = render(&font, OutputFormat::GraphLcdCompat).unwrap();
        assert!(String::from_utf8(compat).unwrap().contains("const unsigned char"));
    }
}
