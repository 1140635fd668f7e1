//! Reconstruction of a [`Font`] from the glyph arrays in a FontCvt source file.
//!
//! Every glyph is emitted by FontCvt as a block of the shape
//!
//! ```text
//! GUI_CONST_STORAGE unsigned char acGUI_<name>_<HEX>[<size>] = { /* comment */
//!   <byte>,<byte>,...,
//!   ...
//! };
//! ```
//!
//! The parser is a two-state machine over an owned cursor: `Scanning` looks for the next
//! declaration line, `InBlock` consumes one row literal per line until the terminator.

use core::{error, fmt};
use std::collections::HashSet;

use font::{
    mode::Mode,
    model::{Font, Glyph, RowWidthMismatch},
};

/// Substring identifying the declaration line of a glyph array.
pub const DECLARATION_MARKER: &str = "GUI_CONST_STORAGE unsigned char acGUI";
/// Substring preceding the font name and code point in a declaration line.
pub const IDENTIFIER_PREFIX: &str = "acGUI_";
/// Substring identifying the line that closes a glyph array.
pub const TERMINATOR_MARKER: &str = "};";
/// Separator between the indentation and the literals of a row line.
pub const ROW_SEPARATOR: &str = "  ";

/// Options controlling how a [`Font`] is parsed.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct ParseConfig {
    /// The [`Mode`] stored in the resulting [`Font`].
    pub mode: Mode,
    /// What to do with a declaration whose code point cannot be decoded.
    pub on_bad_code_point: BadCodePointPolicy,
}

/// The handling of declaration lines whose code point is not valid hexadecimal.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum BadCodePointPolicy {
    /// Fail the whole parse with [`ParseError::HexDecode`].
    #[default]
    Abort,
    /// Log the error, consume and discard the glyph's block, and keep parsing.
    Skip,
}

/// The state of the parser between two lines.
#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    /// Looking for the next declaration line.
    Scanning,
    /// Consuming the row literals of a glyph.
    InBlock {
        /// The glyph being built.
        glyph: Glyph,
        /// The index of the declaration line of the block.
        declaration_line: usize,
        /// Whether the glyph is appended to the font once its block ends.
        keep: bool,
    },
}

/// Parses every glyph block in `lines` into a [`Font`].
///
/// Lines outside of glyph blocks are ignored; no signature check is done here.
///
/// # Errors
///
/// - [`ParseError::HexDecode`]: a code point is not valid hexadecimal and
///   [`ParseConfig::on_bad_code_point`] is [`BadCodePointPolicy::Abort`].
/// - [`ParseError::MalformedBlock`]: a block has a bad row or is not terminated.
pub fn parse_font<S: AsRef<str>>(lines: &[S], config: &ParseConfig) -> Result<Font, ParseError> {
    let mut font = Font::new(config.mode);
    let mut seen = HashSet::new();
    let mut state = State::Scanning;
    let mut cursor = 0;

    loop {
        state = match state {
            State::Scanning => {
                let Some(line) = lines.get(cursor) else {
                    log::debug!("end of file reached after {cursor} lines");
                    break;
                };
                let declaration_line = cursor;
                cursor += 1;

                if line.as_ref().contains(DECLARATION_MARKER) {
                    begin_block(line.as_ref(), declaration_line, config, &mut font)?
                } else {
                    State::Scanning
                }
            }
            State::InBlock {
                mut glyph,
                declaration_line,
                keep,
            } => {
                let Some(line) = lines.get(cursor) else {
                    return Err(MalformedBlockError {
                        line: declaration_line,
                        kind: MalformedBlockKind::Unterminated,
                    }
                    .into());
                };

                let row = parse_row(line.as_ref(), cursor)?;
                glyph.push_row(row).map_err(|mismatch| MalformedBlockError {
                    line: cursor,
                    kind: MalformedBlockKind::InconsistentWidth(mismatch),
                })?;
                cursor += 1;

                match lines.get(cursor) {
                    Some(next) if next.as_ref().contains(TERMINATOR_MARKER) => {
                        cursor += 1;
                        if keep {
                            if !seen.insert(glyph.code_point()) {
                                log::warn!(
                                    "duplicate glyph for code point {:04X} on line {}",
                                    glyph.code_point(),
                                    declaration_line + 1
                                );
                            }
                            font.push(glyph);
                        }
                        State::Scanning
                    }
                    _ => State::InBlock {
                        glyph,
                        declaration_line,
                        keep,
                    },
                }
            }
        };
    }

    log::info!("parsed {} glyphs", font.glyph_count());
    Ok(font)
}

/// Decodes the declaration on `line` and returns the [`State::InBlock`] for its block.
fn begin_block(
    line: &str,
    declaration_line: usize,
    config: &ParseConfig,
    font: &mut Font,
) -> Result<State, HexDecodeError> {
    let (keep, code_point) = match parse_declaration(line, declaration_line) {
        Ok(declaration) => {
            if font.name().is_none() && !declaration.name.is_empty() {
                font.set_name(declaration.name);
            }
            log::debug!("Unicode char code: {:04X}", declaration.code_point);
            (true, declaration.code_point)
        }
        Err(error) => match config.on_bad_code_point {
            BadCodePointPolicy::Abort => return Err(error),
            BadCodePointPolicy::Skip => {
                log::error!("{error}; skipping glyph");
                (false, 0)
            }
        },
    };

    Ok(State::InBlock {
        glyph: Glyph::new(code_point),
        declaration_line,
        keep,
    })
}

/// The parts of a declaration identifier `acGUI_<name>_<HEX>`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
struct Declaration<'line> {
    /// The name of the font.
    name: &'line str,
    /// The decoded code point.
    code_point: u32,
}

/// Extracts the font name and code point from a declaration line.
///
/// The identifier after [`IDENTIFIER_PREFIX`] runs up to the array-size bracket; the code point
/// is the hexadecimal segment after its last `_` and must be a Unicode scalar value.
fn parse_declaration(line: &str, index: usize) -> Result<Declaration<'_>, HexDecodeError> {
    let error = |token: &str| HexDecodeError {
        line: index,
        token: token.to_owned(),
    };

    let Some((_, identifier)) = line.split_once(IDENTIFIER_PREFIX) else {
        return Err(error(""));
    };
    let identifier = identifier
        .split_once('[')
        .map_or(identifier, |(identifier, _)| identifier)
        .trim();
    let Some((name, token)) = identifier.rsplit_once('_') else {
        return Err(error(identifier));
    };

    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(error(token));
    }
    let code_point = u32::from_str_radix(token, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| error(token))?;
    Ok(Declaration {
        name,
        code_point: u32::from(code_point),
    })
}

/// Parses the row literal on `line`.
fn parse_row(line: &str, index: usize) -> Result<Vec<u8>, MalformedBlockError> {
    let malformed = |kind| MalformedBlockError { line: index, kind };

    let Some((_, literals)) = line.split_once(ROW_SEPARATOR) else {
        return Err(malformed(MalformedBlockKind::MissingSeparator));
    };
    let literals = literals.trim_start();
    let literals = literals
        .split_once(ROW_SEPARATOR)
        .map_or(literals, |(literals, _)| literals);

    // The last element of a C initializer may omit its comma; a trailing comment is not a
    // literal.
    let (terminated, rest) = literals.rsplit_once(',').unwrap_or(("", literals));
    let rest = rest.trim();
    let tokens = terminated
        .split(',')
        .filter(|_| !terminated.is_empty())
        .chain((!rest.is_empty() && !rest.starts_with('/')).then_some(rest));

    let row = tokens
        .map(|token| {
            let token = token.trim();
            parse_byte(token)
                .ok_or_else(|| malformed(MalformedBlockKind::InvalidLiteral(token.to_owned())))
        })
        .collect::<Result<Vec<u8>, _>>()?;

    if row.is_empty() {
        return Err(malformed(MalformedBlockKind::EmptyRow));
    }
    Ok(row)
}

/// Parses a byte literal: `0x`-prefixed hexadecimal, decimal, or an emWin pixel pattern of `_`
/// and `X` characters with the leftmost pixel in the most significant bit.
fn parse_byte(token: &str) -> Option<u8> {
    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        return u8::from_str_radix(hex, 16).ok();
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return token.parse().ok();
    }
    if token.is_empty() || token.len() > 8 {
        return None;
    }

    token.bytes().enumerate().try_fold(0u8, |byte, (index, b)| match b {
        b'_' => Some(byte),
        b'X' => Some(byte | (0x80 >> index)),
        _ => None,
    })
}

/// A declaration line whose code point is not valid hexadecimal.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct HexDecodeError {
    /// The 0-based index of the declaration line.
    pub line: usize,
    /// The token that failed to decode.
    pub token: String,
}

impl fmt::Display for HexDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to decode Unicode hex {:?} on line {}",
            self.token,
            self.line + 1
        )
    }
}

impl error::Error for HexDecodeError {}

/// A glyph block that does not have the expected shape.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct MalformedBlockError {
    /// The 0-based index of the offending line.
    ///
    /// For [`MalformedBlockKind::Unterminated`] this is the declaration line of the block.
    pub line: usize,
    /// What is wrong with the block.
    pub kind: MalformedBlockKind,
}

/// The ways in which a glyph block can be malformed.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum MalformedBlockKind {
    /// A row line without the double-space separator.
    MissingSeparator,
    /// A row line without any byte literal.
    EmptyRow,
    /// A token that is not a byte literal.
    InvalidLiteral(String),
    /// A row whose width differs from the earlier rows of the glyph.
    InconsistentWidth(RowWidthMismatch),
    /// The end of the file was reached before the terminator.
    Unterminated,
}

impl fmt::Display for MalformedBlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = self.line + 1;
        match &self.kind {
            MalformedBlockKind::MissingSeparator => {
                write!(f, "line {line}: row literal is missing its separator")
            }
            MalformedBlockKind::EmptyRow => write!(f, "line {line}: row literal is empty"),
            MalformedBlockKind::InvalidLiteral(token) => {
                write!(f, "line {line}: {token:?} is not a byte literal")
            }
            MalformedBlockKind::InconsistentWidth(mismatch) => write!(f, "line {line}: {mismatch}"),
            MalformedBlockKind::Unterminated => {
                write!(f, "glyph declared on line {line} is never terminated")
            }
        }
    }
}

impl error::Error for MalformedBlockError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            MalformedBlockKind::InconsistentWidth(mismatch) => Some(mismatch),
            _ => None,
        }
    }
}

/// Various errors that can occur while parsing glyph blocks.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum ParseError {
    /// A code point could not be decoded.
    HexDecode(HexDecodeError),
    /// A glyph block is malformed.
    MalformedBlock(MalformedBlockError),
}

impl From<HexDecodeError> for ParseError {
    fn from(value: HexDecodeError) -> Self {
        Self::HexDecode(value)
    }
}

impl From<MalformedBlockError> for ParseError {
    fn from(value: MalformedBlockError) -> Self {
        Self::MalformedBlock(value)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HexDecode(error) => write!(f, "{error}"),
            Self::MalformedBlock(error) => write!(f, "{error}"),
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::HexDecode(error) => Some(error),
            Self::MalformedBlock(error) => Some(error),
        }
    }
}
