//! The output bit-depth/format selector stored alongside a font.

use core::{error, fmt};

/// The pixel format of the bitmaps stored in a font.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mode {
    /// One bit per pixel, most significant bit is the leftmost pixel.
    #[default]
    OneBpp,
    /// Four bits per pixel grayscale.
    FourBppGray,
    /// RGB color.
    Rgb,
}

impl Mode {
    /// Returns the textual representation of the [`Mode`].
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneBpp => "1bpp",
            Self::FourBppGray => "4bpp",
            Self::Rgb => "rgb",
        }
    }

    /// Returns the tag byte used to store the [`Mode`] in a font blob.
    pub const fn as_tag(&self) -> u8 {
        match self {
            Self::OneBpp => 0,
            Self::FourBppGray => 1,
            Self::Rgb => 2,
        }
    }

    /// Returns the [`Mode`] associated with `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidModeTag`] if `tag` is not a known [`Mode`] tag.
    pub const fn from_tag(tag: u8) -> Result<Self, InvalidModeTag> {
        match tag {
            0 => Ok(Self::OneBpp),
            1 => Ok(Self::FourBppGray),
            2 => Ok(Self::Rgb),
            tag => Err(InvalidModeTag(tag)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A byte that does not name any [`Mode`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct InvalidModeTag(pub u8);

impl fmt::Display for InvalidModeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid mode tag: {:#04X}", self.0)
    }
}

impl error::Error for InvalidModeTag {}

#[cfg(test)]
mod test {
    use super::Mode;

    #[test]
    fn tags_are_stable() {
        assert_eq!(Mode::OneBpp.as_tag(), 0);
        assert_eq!(Mode::FourBppGray.as_tag(), 1);
        assert_eq!(Mode::Rgb.as_tag(), 2);

        for mode in [Mode::OneBpp, Mode::FourBppGray, Mode::Rgb] {
            assert_eq!(Mode::from_tag(mode.as_tag()), Ok(mode));
        }
        assert!(Mode::from_tag(3).is_err());
    }

    #[test]
    fn default_is_one_bpp() {
        assert_eq!(Mode::default(), Mode::OneBpp);
    }
}
