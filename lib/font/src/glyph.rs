//! Borrowed views over glyph bitmaps stored row-major, one or more bytes per row.

/// The bitmap of a single glyph.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bitmap<'buffer> {
    /// The buffer that contains the bitmap data, exactly `width * height` bytes long.
    buffer: &'buffer [u8],
    /// The number of bytes in each row.
    width: u8,
    /// The number of rows.
    height: u8,
}

impl<'buffer> Bitmap<'buffer> {
    /// Creates a new [`Bitmap`] over `buffer`.
    ///
    /// Returns `None` if `buffer` is not exactly `width * height` bytes long.
    pub const fn new(buffer: &'buffer [u8], width: u8, height: u8) -> Option<Self> {
        if buffer.len() != width as usize * height as usize {
            return None;
        }

        Some(Self {
            buffer,
            width,
            height,
        })
    }

    /// Returns the number of bytes in each row.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the number of rows.
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Returns the raw bitmap bytes, row-major.
    pub const fn as_bytes(&self) -> &'buffer [u8] {
        self.buffer
    }

    /// Returns the row at `index` or `None` if out of bounds.
    pub fn row(&self, index: usize) -> Option<GlyphRow<'buffer>> {
        if index >= usize::from(self.height) {
            return None;
        }

        let width = usize::from(self.width);
        let row = GlyphRow {
            buffer: &self.buffer[index * width..(index + 1) * width],
        };
        Some(row)
    }
}

impl<'buffer> IntoIterator for Bitmap<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            bitmap: self,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the rows of a [`Bitmap`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The bitmap being iterated.
    bitmap: Bitmap<'buffer>,
    /// The index of the row that will be returned next.
    index: usize,
}

impl<'buffer> Iterator for GlyphRowsIter<'buffer> {
    type Item = GlyphRow<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.bitmap.row(self.index)?;
        self.index += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.bitmap.height).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GlyphRowsIter<'_> {}

/// A row in a [`Bitmap`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow<'buffer> {
    /// The bytes of the row.
    buffer: &'buffer [u8],
}

impl<'buffer> GlyphRow<'buffer> {
    /// Returns the bytes of the row, left to right.
    pub const fn as_bytes(&self) -> &'buffer [u8] {
        self.buffer
    }
}

impl<'buffer> IntoIterator for GlyphRow<'buffer> {
    type Item = bool;
    type IntoIter = GlyphRowIter<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            buffer: self.buffer,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the bits in a [`GlyphRow`], most significant bit of each byte first.
///
/// For [`Mode::OneBpp`][m] fonts every bit is one pixel.
///
/// [m]: crate::mode::Mode::OneBpp
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter<'buffer> {
    /// The bytes of the row.
    buffer: &'buffer [u8],
    /// The index of the bit to be returned.
    index: usize,
}

impl Iterator for GlyphRowIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.buffer.get(self.index / 8)?;
        let bit_index = self.index % 8;
        let bit = (byte >> (7 - bit_index)) & 0b1;

        self.index += 1;
        Some(bit == 1)
    }
}
