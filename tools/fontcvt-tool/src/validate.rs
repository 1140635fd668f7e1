//! Sanity check that the input was generated by SEGGER's FontCvt.
//!
//! This is a cheap gate against unrelated input files, not a grammar check.

use core::{error, fmt};

/// The number of lines at the start of the file that are searched for the signature markers.
pub const HEADER_LINE_COUNT: usize = 100;

/// Marker written by the font converter itself.
pub const TOOL_MARKER: &str = "Font converter for emWin";
/// Marker written into the copyright banner of every generated file.
pub const VENDOR_MARKER: &str = "Segger Microcontroller";
/// Marker of the comment naming the file the font was generated as.
pub const SOURCE_FILE_MARKER: &str = "* Source file:";

/// Information gathered from the header of a valid input file.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Header {
    /// The stem of the original `.c` file name, if the header names one.
    pub source_name: Option<String>,
}

/// Checks the first [`HEADER_LINE_COUNT`] lines for [`TOOL_MARKER`] and [`VENDOR_MARKER`].
///
/// # Errors
///
/// Returns [`FormatError`] if either marker is missing.
pub fn validate<S: AsRef<str>>(lines: &[S]) -> Result<Header, FormatError> {
    let mut tool_marker_found = false;
    let mut vendor_marker_found = false;
    let mut header = Header::default();

    for line in lines.iter().take(HEADER_LINE_COUNT) {
        let line = line.as_ref();
        if line.contains(TOOL_MARKER) {
            tool_marker_found = true;
            log::info!("Valid FontCvt source...            [OK]");
        }
        if line.contains(VENDOR_MARKER) {
            vendor_marker_found = true;
            log::info!("Valid Segger \"c\" file format...    [OK]");
        }
        if let Some(source_name) = source_name(line) {
            log::info!("Original source filename: {source_name}.c");
            header.source_name = Some(source_name.to_owned());
        }
    }

    if tool_marker_found && vendor_marker_found {
        Ok(header)
    } else {
        Err(FormatError {
            tool_marker_found,
            vendor_marker_found,
        })
    }
}

/// Extracts the stem from a `* Source file: <stem>.c` comment line.
fn source_name(line: &str) -> Option<&str> {
    let (_, rest) = line.split_once(SOURCE_FILE_MARKER)?;
    let (stem, _) = rest.split_once(".c")?;
    let stem = stem.trim();

    (!stem.is_empty()).then_some(stem)
}

/// The input is missing at least one of the signature markers.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct FormatError {
    /// Whether [`TOOL_MARKER`] was found.
    pub tool_marker_found: bool,
    /// Whether [`VENDOR_MARKER`] was found.
    pub vendor_marker_found: bool,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid file formatting: missing ")?;
        match (self.tool_marker_found, self.vendor_marker_found) {
            (false, false) => write!(f, "{TOOL_MARKER:?} and {VENDOR_MARKER:?} markers"),
            (false, true) => write!(f, "{TOOL_MARKER:?} marker"),
            (true, false) => write!(f, "{VENDOR_MARKER:?} marker"),
            (true, true) => f.write_str("nothing"),
        }
    }
}

impl error::Error for FormatError {}

#[cfg(test)]
mod test {
    use super::{FormatError, HEADER_LINE_COUNT, validate};

    const BANNER: &[&str] = &[
        "/*********************************************************************",
        "*                SEGGER Microcontroller GmbH                         *",
        "*        Solutions for real time microcontroller applications        *",
        "*                                                                    *",
        "*        Segger Microcontroller GmbH                                 *",
        "**********************************************************************",
        "----------------------------------------------------------------------",
        "File        : FontArial16.c",
        "Purpose     : Font converter for emWin",
        "---------------------------END-OF-HEADER------------------------------",
        "*/",
        "",
        "/*********************************************************************",
        "*                                                                    *",
        "* Source file: FontArial16.c                                         *",
        "*       Font:        Arial                                           *",
        "*       Height:      16                                              *",
        "*                                                                    *",
        "**********************************************************************",
    ];

    #[test]
    fn accepts_banner() {
        let header = validate(BANNER).unwrap();
        assert_eq!(header.source_name.as_deref(), Some("FontArial16"));
    }

    #[test]
    fn missing_vendor_marker() {
        let lines = BANNER
            .iter()
            .filter(|line| !line.contains("Segger Microcontroller"))
            .collect::<Vec<_>>();

        assert_eq!(
            validate(&lines),
            Err(FormatError {
                tool_marker_found: true,
                vendor_marker_found: false,
            })
        );
    }

    #[test]
    fn missing_tool_marker() {
        let lines = BANNER
            .iter()
            .filter(|line| !line.contains("Font converter"))
            .collect::<Vec<_>>();

        let error = validate(&lines).unwrap_err();
        assert!(!error.tool_marker_found);
        assert!(error.vendor_marker_found);
    }

    #[test]
    fn markers_after_header_are_ignored() {
        let mut lines = vec![""; HEADER_LINE_COUNT];
        lines.extend_from_slice(BANNER);

        assert!(validate(&lines).is_err());
    }

    #[test]
    fn markers_on_last_header_line() {
        let mut lines = vec![""; HEADER_LINE_COUNT - 1];
        lines.push("Segger Microcontroller / Font converter for emWin");

        assert!(validate(&lines).is_ok());
    }

    #[test]
    fn short_and_empty_inputs() {
        assert!(validate::<&str>(&[]).is_err());
        assert!(validate(&["Font converter for emWin", "Segger Microcontroller"]).is_ok());
    }

    #[test]
    fn malformed_source_file_comment_is_not_fatal() {
        let header = validate(&[
            "Font converter for emWin",
            "Segger Microcontroller",
            "* Source file: no extension here",
        ])
        .unwrap();
        assert_eq!(header.source_name, None);
    }
}
