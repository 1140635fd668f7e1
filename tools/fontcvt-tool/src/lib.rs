//! Conversion of SEGGER emWin FontCvt C sources into flashable font blobs and GraphLCD sources.
//!
//! The pipeline is strictly sequential: [`lines`] → [`validate`] → [`parser`] → [`output`].

use core::{error, fmt};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use font::model::{DumpError, Font};

use crate::{
    output::OutputFormat,
    parser::{HexDecodeError, MalformedBlockError, ParseConfig, ParseError},
    validate::FormatError,
};

pub mod graphlcd;
pub mod lines;
pub mod output;
pub mod parser;
pub mod validate;

/// Description of a single conversion run.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct ConvertConfig {
    /// The FontCvt source to read.
    pub infile: PathBuf,
    /// The file to write the converted font to.
    pub outfile: PathBuf,
    /// The format of `outfile`.
    pub format: OutputFormat,
    /// Options for the glyph parser.
    pub parse: ParseConfig,
}

/// Reads, validates, and parses the FontCvt source at `path`.
///
/// # Errors
///
/// - [`ConvertError::Io`]: the file cannot be read.
/// - [`ConvertError::InvalidFormat`]: the file lacks the FontCvt signature markers.
/// - [`ConvertError::HexDecode`]: a code point could not be decoded.
/// - [`ConvertError::MalformedBlock`]: a glyph block is malformed.
pub fn load_font(path: &Path, config: &ParseConfig) -> Result<Font, ConvertError> {
    let lines = lines::read_lines(path)?;
    log::info!("file opened, number of lines = {}", lines.len());

    let header = validate::validate(&lines)?;
    let mut font = parser::parse_font(&lines, config)?;
    if let Some(source_name) = header.source_name {
        font.set_source_name(source_name);
    }

    Ok(font)
}

/// Converts `config.infile` into `config.outfile`.
///
/// The output is rendered completely before `config.outfile` is created, so a failed conversion
/// never leaves an output file behind.
///
/// # Errors
///
/// Returns [`ConvertError`] if loading, rendering, or writing fails.
pub fn convert(config: &ConvertConfig) -> Result<Font, ConvertError> {
    let font = load_font(&config.infile, &config.parse)?;
    let output = output::render(&font, config.format)?;
    fs::write(&config.outfile, output)?;

    log::info!(
        "wrote {} glyphs as {} to {}",
        font.glyph_count(),
        config.format.as_str(),
        config.outfile.display()
    );
    Ok(font)
}

/// Various errors that can occur while converting a font.
#[derive(Debug)]
pub enum ConvertError {
    /// The input could not be read or the output could not be written.
    Io(io::Error),
    /// The input is not a FontCvt source.
    InvalidFormat(FormatError),
    /// A code point could not be decoded.
    HexDecode(HexDecodeError),
    /// A glyph block is malformed.
    MalformedBlock(MalformedBlockError),
    /// The font cannot be represented in the requested output format.
    Dump(DumpError),
}

impl From<io::Error> for ConvertError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<FormatError> for ConvertError {
    fn from(value: FormatError) -> Self {
        Self::InvalidFormat(value)
    }
}

impl From<ParseError> for ConvertError {
    fn from(value: ParseError) -> Self {
        match value {
            ParseError::HexDecode(error) => Self::HexDecode(error),
            ParseError::MalformedBlock(error) => Self::MalformedBlock(error),
        }
    }
}

impl From<DumpError> for ConvertError {
    fn from(value: DumpError) -> Self {
        match value {
            DumpError::Io(error) => Self::Io(error),
            error => Self::Dump(error),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(error) => write!(f, "{error}"),
            Self::InvalidFormat(error) => write!(f, "{error}"),
            Self::HexDecode(error) => write!(f, "{error}"),
            Self::MalformedBlock(error) => write!(f, "malformed glyph block: {error}"),
            Self::Dump(error) => write!(f, "{error}"),
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(error),
            Self::InvalidFormat(error) => Some(error),
            Self::HexDecode(error) => Some(error),
            Self::MalformedBlock(error) => Some(error),
            Self::Dump(error) => Some(error),
        }
    }
}
