//! Loading of the input file as an ordered sequence of lines.

use std::{fs, io, path::Path};

/// Reads the file at `path` and splits it into lines.
///
/// The file is read completely before splitting. Bytes that are not valid UTF-8 are replaced
/// with `U+FFFD`; FontCvt writes Latin-1 glyph names into its comments.
///
/// # Errors
///
/// Returns [`Err`] if the file cannot be opened or read.
pub fn read_lines<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(split_lines(&String::from_utf8_lossy(&bytes)))
}

/// Splits `text` into lines, stripping `\n` and `\r\n` terminators and nothing else.
///
/// A final line without a terminator is kept; a trailing terminator does not produce an empty
/// last line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod test {
    use super::{read_lines, split_lines};

    #[test]
    fn terminators_are_stripped() {
        assert_eq!(split_lines("a\nb\r\nc\n"), ["a", "b", "c"]);
    }

    #[test]
    fn last_line_without_terminator() {
        assert_eq!(split_lines("a\nb"), ["a", "b"]);
        assert_eq!(split_lines("a\nb\n"), ["a", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn whitespace_is_preserved() {
        assert_eq!(
            split_lines("  0xFF,0x81,  \n\n\t};"),
            ["  0xFF,0x81,  ", "", "\t};"]
        );
    }

    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("fontcvt-tool-lines-does-not-exist.c");
        assert!(read_lines(path).is_err());
    }

    #[test]
    fn latin1_is_tolerated() {
        let path = std::env::temp_dir().join(format!(
            "fontcvt-tool-lines-latin1-{}.c",
            std::process::id()
        ));
        std::fs::write(&path, b"/* LATIN SMALL LETTER \xE9 */\r\nnext").unwrap();

        let lines = read_lines(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("/* LATIN SMALL LETTER "));
        assert_eq!(lines[1], "next");
    }
}
