//! Read-only interface over a dumped font blob, suitable for direct use by an embedded loader.
//!
//! All integers are little-endian:
//!
//! ```text
//! u32  glyph count
//! u8   mode tag
//! per glyph:
//!   u32  code point
//!   u8   width  (bytes per row)
//!   u8   height (rows)
//!   [u8; width * height] bitmap, row-major
//! ```

use core::{error, fmt};

use crate::{
    glyph::Bitmap,
    mode::{InvalidModeTag, Mode},
};

/// The size, in bytes, of the blob header.
pub const HEADER_SIZE: usize = 5;
/// The size, in bytes, of the fixed part of each glyph record.
pub const GLYPH_HEADER_SIZE: usize = 6;

/// A validated font blob.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FontBlob<'buffer> {
    /// The glyph records, directly after the header.
    records: &'buffer [u8],
    /// The number of glyphs in `records`.
    glyph_count: u32,
    /// The pixel format of the bitmaps.
    mode: Mode,
}

impl<'buffer> FontBlob<'buffer> {
    /// Creates a new [`FontBlob`] from a dumped blob, validating every glyph record.
    ///
    /// # Errors
    ///
    /// - [`BlobError::TruncatedHeader`]: `dump` is too short to hold the header.
    /// - [`BlobError::InvalidMode`]: the mode tag is unknown.
    /// - [`BlobError::TruncatedGlyph`]: a glyph record extends past the end of `dump`.
    /// - [`BlobError::TrailingData`]: bytes remain after the last glyph record.
    pub fn from_dump(dump: &'buffer [u8]) -> Result<Self, BlobError> {
        let Some((header, records)) = dump.split_first_chunk::<HEADER_SIZE>() else {
            return Err(BlobError::TruncatedHeader {
                actual_size: dump.len(),
            });
        };

        let glyph_count = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let mode = Mode::from_tag(header[4])?;

        let blob = Self {
            records,
            glyph_count,
            mode,
        };

        let mut iter = blob.iter();
        for glyph in iter.by_ref() {
            glyph?;
        }
        if !iter.remaining.is_empty() {
            return Err(BlobError::TrailingData {
                byte_count: iter.remaining.len(),
            });
        }

        Ok(blob)
    }

    /// Returns the number of glyphs in the [`FontBlob`].
    pub const fn glyph_count(&self) -> u32 {
        self.glyph_count
    }

    /// Returns the [`Mode`] of the bitmaps in the [`FontBlob`].
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the first glyph associated with `code_point`, or `None` if the font has no such
    /// glyph.
    pub fn get(&self, code_point: u32) -> Option<BlobGlyph<'buffer>> {
        self.glyphs().find(|glyph| glyph.code_point() == code_point)
    }

    /// Returns an [`Iterator`] over the glyphs of the [`FontBlob`] in stored order.
    pub fn glyphs(&self) -> impl Iterator<Item = BlobGlyph<'buffer>> + use<'buffer> {
        // Records were validated in `from_dump`.
        self.iter().map_while(Result::ok)
    }

    /// Returns an [`Iterator`] over the glyph records that checks bounds as it goes.
    fn iter(&self) -> GlyphRecordIter<'buffer> {
        GlyphRecordIter {
            remaining: self.records,
            index: 0,
            glyph_count: self.glyph_count,
        }
    }
}

/// A glyph stored in a [`FontBlob`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct BlobGlyph<'buffer> {
    /// The Unicode code point of the glyph.
    code_point: u32,
    /// The bitmap of the glyph.
    bitmap: Bitmap<'buffer>,
}

impl<'buffer> BlobGlyph<'buffer> {
    /// Returns the Unicode code point of the glyph.
    pub const fn code_point(&self) -> u32 {
        self.code_point
    }

    /// Returns the [`Bitmap`] of the glyph.
    pub const fn bitmap(&self) -> Bitmap<'buffer> {
        self.bitmap
    }
}

/// Walks the glyph records of a blob, checking bounds as it goes.
struct GlyphRecordIter<'buffer> {
    /// The bytes that have not been consumed yet.
    remaining: &'buffer [u8],
    /// The index of the next glyph.
    index: u32,
    /// The total number of glyphs.
    glyph_count: u32,
}

impl<'buffer> Iterator for GlyphRecordIter<'buffer> {
    type Item = Result<BlobGlyph<'buffer>, BlobError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.glyph_count {
            return None;
        }

        let index = self.index;
        let truncated = BlobError::TruncatedGlyph { index };
        self.index += 1;

        let Some((header, rest)) = self.remaining.split_first_chunk::<GLYPH_HEADER_SIZE>() else {
            return Some(Err(truncated));
        };

        let code_point = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let width = header[4];
        let height = header[5];

        let size = usize::from(width) * usize::from(height);
        if rest.len() < size {
            return Some(Err(truncated));
        }
        let (data, rest) = rest.split_at(size);
        self.remaining = rest;

        let Some(bitmap) = Bitmap::new(data, width, height) else {
            return Some(Err(truncated));
        };
        Some(Ok(BlobGlyph { code_point, bitmap }))
    }
}

/// Various errors that can occur while reading a [`FontBlob`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum BlobError {
    /// The blob is too short to contain the header.
    TruncatedHeader {
        /// The size of the blob.
        actual_size: usize,
    },
    /// The mode tag is not a valid [`Mode`].
    InvalidMode(InvalidModeTag),
    /// A glyph record extends past the end of the blob.
    TruncatedGlyph {
        /// The index of the truncated glyph.
        index: u32,
    },
    /// Bytes remain after the last glyph record.
    TrailingData {
        /// The number of unused bytes.
        byte_count: usize,
    },
}

impl From<InvalidModeTag> for BlobError {
    fn from(value: InvalidModeTag) -> Self {
        Self::InvalidMode(value)
    }
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedHeader { actual_size } => write!(
                f,
                "header is truncated: expected {HEADER_SIZE} bytes but got {actual_size} bytes"
            ),
            Self::InvalidMode(error) => write!(f, "{error}"),
            Self::TruncatedGlyph { index } => write!(f, "glyph {index} is truncated"),
            Self::TrailingData { byte_count } => {
                write!(f, "{byte_count} bytes of trailing data after the last glyph")
            }
        }
    }
}

impl error::Error for BlobError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidMode(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{BlobError, FontBlob};
    use crate::mode::Mode;

    const TWO_GLYPHS: &[u8] = &[
        0x02, 0x00, 0x00, 0x00, // glyph count
        0x00, // mode
        0x41, 0x00, 0x00, 0x00, 0x01, 0x02, 0xFF, 0x81, // 'A', 1x2
        0x2D, 0x4E, 0x00, 0x00, 0x02, 0x01, 0x12, 0x34, // U+4E2D, 2x1
    ];

    #[test]
    fn reads_glyphs_in_order() {
        let blob = FontBlob::from_dump(TWO_GLYPHS).unwrap();
        assert_eq!(blob.glyph_count(), 2);
        assert_eq!(blob.mode(), Mode::OneBpp);

        let code_points = blob.glyphs().map(|g| g.code_point()).collect::<Vec<_>>();
        assert_eq!(code_points, [0x41, 0x4E2D]);

        let glyph = blob.get(0x4E2D).unwrap();
        assert_eq!(glyph.bitmap().width(), 2);
        assert_eq!(glyph.bitmap().height(), 1);
        assert_eq!(glyph.bitmap().as_bytes(), [0x12, 0x34]);

        assert!(blob.get(0x42).is_none());
    }

    #[test]
    fn empty_font() {
        let blob = FontBlob::from_dump(&[0, 0, 0, 0, 2]).unwrap();
        assert_eq!(blob.glyph_count(), 0);
        assert_eq!(blob.mode(), Mode::Rgb);
        assert_eq!(blob.glyphs().count(), 0);
    }

    #[test]
    fn rejects_truncated_header() {
        assert_eq!(
            FontBlob::from_dump(&[1, 0, 0]),
            Err(BlobError::TruncatedHeader { actual_size: 3 })
        );
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(matches!(
            FontBlob::from_dump(&[0, 0, 0, 0, 9]),
            Err(BlobError::InvalidMode(_))
        ));
    }

    #[test]
    fn rejects_truncated_glyph() {
        let truncated = &TWO_GLYPHS[..TWO_GLYPHS.len() - 1];
        assert_eq!(
            FontBlob::from_dump(truncated),
            Err(BlobError::TruncatedGlyph { index: 1 })
        );

        // Glyph count larger than the records present.
        let mut overcounted = TWO_GLYPHS.to_vec();
        overcounted[0] = 3;
        assert_eq!(
            FontBlob::from_dump(&overcounted),
            Err(BlobError::TruncatedGlyph { index: 2 })
        );
    }

    #[test]
    fn rejects_trailing_data() {
        let mut padded = TWO_GLYPHS.to_vec();
        padded.extend_from_slice(&[0, 0]);
        assert_eq!(
            FontBlob::from_dump(&padded),
            Err(BlobError::TrailingData { byte_count: 2 })
        );
    }
}
