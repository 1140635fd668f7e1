//! Writable, owned font model built while parsing and dumped as a [`FontBlob`][fb].
//!
//! [fb]: crate::blob::FontBlob

use core::{error, fmt};
use std::io::{self, Write};

use crate::mode::Mode;

/// A font: an ordered collection of [`Glyph`]s sharing one [`Mode`].
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Font {
    /// The pixel format of the bitmaps.
    mode: Mode,
    /// The name of the font, if known.
    name: Option<String>,
    /// The stem of the file the font was generated from, if known.
    source_name: Option<String>,
    /// The glyphs, in insertion order.
    glyphs: Vec<Glyph>,
}

impl Font {
    /// Creates a new, empty [`Font`] with `mode`.
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            name: None,
            source_name: None,
            glyphs: Vec::new(),
        }
    }

    /// Returns the [`Mode`] of the [`Font`].
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the name of the [`Font`], if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the name of the [`Font`].
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Returns the stem of the source file the [`Font`] was generated from, if known.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    /// Sets the stem of the source file the [`Font`] was generated from.
    pub fn set_source_name(&mut self, source_name: impl Into<String>) {
        self.source_name = Some(source_name.into());
    }

    /// Returns the number of [`Glyph`]s in the [`Font`].
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns the [`Glyph`]s of the [`Font`] in insertion order.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Appends `glyph` to the [`Font`]. Duplicate code points are kept.
    pub fn push(&mut self, glyph: Glyph) {
        self.glyphs.push(glyph);
    }

    /// Dumps the [`Font`] into `writer` in the [`FontBlob`][fb] format.
    ///
    /// # Errors
    ///
    /// - [`DumpError::TooManyGlyphs`]: the glyph count does not fit in a [`u32`].
    /// - [`DumpError::GlyphTooLarge`]: a glyph's width or height does not fit in a [`u8`].
    /// - [`DumpError::Io`]: writing to `writer` failed.
    ///
    /// [fb]: crate::blob::FontBlob
    pub fn dump<W: Write>(&self, mut writer: W) -> Result<(), DumpError> {
        let glyph_count = u32::try_from(self.glyphs.len()).map_err(|_| DumpError::TooManyGlyphs {
            glyph_count: self.glyphs.len(),
        })?;

        writer.write_all(&glyph_count.to_le_bytes())?;
        writer.write_all(&[self.mode.as_tag()])?;

        for glyph in &self.glyphs {
            let too_large = |_| DumpError::GlyphTooLarge {
                code_point: glyph.code_point,
                width: glyph.width(),
                height: glyph.height(),
            };
            let width = u8::try_from(glyph.width()).map_err(too_large)?;
            let height = u8::try_from(glyph.height()).map_err(too_large)?;

            writer.write_all(&glyph.code_point.to_le_bytes())?;
            writer.write_all(&[width, height])?;
            for row in &glyph.bitmap {
                writer.write_all(row)?;
            }
        }

        Ok(())
    }
}

/// The bitmap of a single character.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph {
    /// The Unicode code point of the glyph.
    code_point: u32,
    /// The number of bytes in each row.
    width: usize,
    /// The rows of the bitmap, top row first.
    bitmap: Vec<Vec<u8>>,
}

impl Glyph {
    /// Creates a new [`Glyph`] for `code_point` with an empty bitmap.
    pub const fn new(code_point: u32) -> Self {
        Self {
            code_point,
            width: 0,
            bitmap: Vec::new(),
        }
    }

    /// Returns the Unicode code point of the [`Glyph`].
    pub const fn code_point(&self) -> u32 {
        self.code_point
    }

    /// Returns the number of bytes in each row.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.bitmap.len()
    }

    /// Returns the rows of the bitmap, top row first.
    pub fn bitmap(&self) -> &[Vec<u8>] {
        &self.bitmap
    }

    /// Appends `row` below the existing rows. The first row fixes the width of the [`Glyph`].
    ///
    /// # Errors
    ///
    /// Returns [`RowWidthMismatch`] if `row` is not as wide as the rows already present.
    pub fn push_row(&mut self, row: Vec<u8>) -> Result<(), RowWidthMismatch> {
        if self.bitmap.is_empty() {
            self.width = row.len();
        } else if row.len() != self.width {
            return Err(RowWidthMismatch {
                expected: self.width,
                actual: row.len(),
            });
        }

        self.bitmap.push(row);
        Ok(())
    }
}

/// A row that does not match the width of the [`Glyph`] it was added to.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct RowWidthMismatch {
    /// The width of the rows already in the [`Glyph`].
    pub expected: usize,
    /// The width of the rejected row.
    pub actual: usize,
}

impl fmt::Display for RowWidthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row is {} bytes wide but the glyph is {} bytes wide",
            self.actual, self.expected
        )
    }
}

impl error::Error for RowWidthMismatch {}

/// Various errors that can occur while dumping a [`Font`].
#[derive(Debug)]
pub enum DumpError {
    /// The font has more glyphs than the format can count.
    TooManyGlyphs {
        /// The number of glyphs in the font.
        glyph_count: usize,
    },
    /// A glyph is wider or taller than the format allows.
    GlyphTooLarge {
        /// The code point of the offending glyph.
        code_point: u32,
        /// The width of the glyph in bytes.
        width: usize,
        /// The height of the glyph in rows.
        height: usize,
    },
    /// An error occurred while writing the blob.
    Io(io::Error),
}

impl From<io::Error> for DumpError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl fmt::Display for DumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyGlyphs { glyph_count } => {
                write!(f, "font has too many glyphs: {glyph_count}")
            }
            Self::GlyphTooLarge {
                code_point,
                width,
                height,
            } => write!(
                f,
                "glyph {code_point:04X} is too large: {width} bytes x {height} rows (maximum 255 x 255)"
            ),
            Self::Io(error) => write!(f, "error writing font blob: {error}"),
        }
    }
}

impl error::Error for DumpError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{DumpError, Font, Glyph, RowWidthMismatch};
    use crate::{blob::FontBlob, mode::Mode};

    fn glyph(code_point: u32, rows: &[&[u8]]) -> Glyph {
        let mut glyph = Glyph::new(code_point);
        for row in rows {
            glyph.push_row(row.to_vec()).unwrap();
        }
        glyph
    }

    #[test]
    fn first_row_fixes_width() {
        let mut glyph = Glyph::new(0x41);
        assert_eq!(glyph.width(), 0);
        assert_eq!(glyph.height(), 0);

        glyph.push_row(vec![0x00, 0xFF]).unwrap();
        glyph.push_row(vec![0x18, 0x18]).unwrap();
        assert_eq!(
            glyph.push_row(vec![0x18]),
            Err(RowWidthMismatch {
                expected: 2,
                actual: 1
            })
        );

        assert_eq!(glyph.width(), 2);
        assert_eq!(glyph.height(), 2);
        assert_eq!(glyph.bitmap(), [vec![0x00, 0xFF], vec![0x18, 0x18]]);
    }

    #[test]
    fn dump_layout() {
        let mut font = Font::new(Mode::FourBppGray);
        font.push(glyph(0x41, &[&[0xFF], &[0x81]]));
        font.push(glyph(0x4E2D, &[&[0x12, 0x34]]));

        let mut dump = Vec::new();
        font.dump(&mut dump).unwrap();

        assert_eq!(
            dump,
            [
                0x02, 0x00, 0x00, 0x00, 0x01, // header
                0x41, 0x00, 0x00, 0x00, 0x01, 0x02, 0xFF, 0x81, // 'A'
                0x2D, 0x4E, 0x00, 0x00, 0x02, 0x01, 0x12, 0x34, // U+4E2D
            ]
        );
    }

    #[test]
    fn dump_reads_back() {
        let mut font = Font::new(Mode::OneBpp);
        let blank: &[u8] = &[0x00, 0x00];
        font.push(glyph(0x20, &[blank; 16]));
        font.push(glyph(0x41, &[&[0x18], &[0x24], &[0x42], &[0x7E], &[0x42]]));

        let mut dump = Vec::new();
        font.dump(&mut dump).unwrap();
        let blob = FontBlob::from_dump(&dump).unwrap();

        assert_eq!(blob.glyph_count(), 2);
        for (stored, original) in blob.glyphs().zip(font.glyphs()) {
            assert_eq!(stored.code_point(), original.code_point());
            let rows = stored
                .bitmap()
                .into_iter()
                .map(|row| row.as_bytes().to_vec())
                .collect::<Vec<_>>();
            assert_eq!(rows, original.bitmap());
        }
    }

    #[test]
    fn dump_rejects_oversized_glyph() {
        let mut font = Font::default();
        font.push(glyph(0x41, &[&[0; 256]]));

        let result = font.dump(Vec::new());
        assert!(matches!(
            result,
            Err(DumpError::GlyphTooLarge {
                code_point: 0x41,
                width: 256,
                height: 1
            })
        ));
    }
}
