//! Command line parsing and [`ConvertConfig`] construction.
//!
//! The legacy single-dash spelling (`-infile=<path>`, `-bin`, ...) is rewritten to the
//! double-dash form before `clap` sees it.

use std::{ffi::OsString, path::PathBuf};

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, builder::EnumValueParser};
use font::mode::Mode;
use fontcvt_tool::{
    ConvertConfig,
    output::OutputFormat,
    parser::{BadCodePointPolicy, ParseConfig},
};

/// Options that the legacy tool accepted with a single leading dash.
const LEGACY_OPTIONS: &[&str] = &["infile", "outfile", "bin", "graphlcd", "graphlcd_compat"];

/// Parses the process arguments to construct a [`ConvertConfig`].
///
/// Exits the process after printing help, the version, or a usage error.
pub fn get_config() -> ConvertConfig {
    let matches = command_parser().get_matches_from(normalize_args(std::env::args_os()));
    parse_arguments(&matches)
}

/// Rewrites legacy single-dash long options into their double-dash form.
pub fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str().and_then(legacy_to_long) {
            Some(rewritten) => OsString::from(rewritten),
            None => arg,
        })
        .collect()
}

/// Returns the double-dash form of `arg` if it is a legacy single-dash option.
fn legacy_to_long(arg: &str) -> Option<String> {
    let option = arg.strip_prefix('-')?;
    if option.starts_with('-') {
        return None;
    }

    let name = option.split_once('=').map_or(option, |(name, _)| name);
    LEGACY_OPTIONS.contains(&name).then(|| format!("-{arg}"))
}

/// Parses the arguments required to produce a valid [`ConvertConfig`].
pub fn parse_arguments(matches: &ArgMatches) -> ConvertConfig {
    let infile = matches
        .get_one::<PathBuf>("infile")
        .cloned()
        .unwrap_or_else(|| unreachable!("`infile` is a required argument"));

    let outfile = matches
        .get_one::<PathBuf>("outfile")
        .cloned()
        .unwrap_or_else(|| unreachable!("`outfile` is a required argument"));

    let format = if matches.get_flag("bin") {
        OutputFormat::Bin
    } else if matches.get_flag("graphlcd") {
        OutputFormat::GraphLcd
    } else if matches.get_flag("graphlcd_compat") {
        OutputFormat::GraphLcdCompat
    } else {
        unreachable!("an output format is required")
    };

    let mode = matches
        .get_one::<ModeArg>("mode")
        .map(|mode| mode.0)
        .unwrap_or_else(|| unreachable!("`mode` should have a default value"));

    let on_bad_code_point = if matches.get_flag("keep-going") {
        BadCodePointPolicy::Skip
    } else {
        BadCodePointPolicy::Abort
    };

    ConvertConfig {
        infile,
        outfile,
        format,
        parse: ParseConfig {
            mode,
            on_bad_code_point,
        },
    }
}

/// Returns the command parser for `fontcvt-tool`.
pub fn command_parser() -> Command {
    let infile = Arg::new("infile")
        .long("infile")
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true)
        .help("FontCvt generated .c file to convert");

    let outfile = Arg::new("outfile")
        .long("outfile")
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .required(true)
        .help("File to write the converted font to");

    let bin = Arg::new("bin")
        .long("bin")
        .action(ArgAction::SetTrue)
        .help("Write a binary file that can be used with an EPROM programmer or GraphLCD's embedded font loader");

    let graphlcd = Arg::new("graphlcd")
        .long("graphlcd")
        .action(ArgAction::SetTrue)
        .help("Output a .c file that works with the GraphLCD library for microcontrollers");

    let graphlcd_compat = Arg::new("graphlcd_compat")
        .long("graphlcd_compat")
        .action(ArgAction::SetTrue)
        .help("Output a .c file that is compatible with GraphLCD (legacy)");

    let mode = Arg::new("mode")
        .long("mode")
        .value_parser(EnumValueParser::<ModeArg>::new())
        .default_value("1bpp")
        .help("Pixel format recorded in the output");

    let keep_going = Arg::new("keep-going")
        .long("keep-going")
        .action(ArgAction::SetTrue)
        .help("Skip glyphs whose code point cannot be decoded instead of aborting");

    let format = ArgGroup::new("format")
        .args(["bin", "graphlcd", "graphlcd_compat"])
        .required(true);

    Command::new("fontcvt-tool")
        .about("Conversion utility for fonts generated by SEGGER's FontCvt")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(infile)
        .arg(outfile)
        .arg(bin)
        .arg(graphlcd)
        .arg(graphlcd_compat)
        .group(format)
        .arg(mode)
        .arg(keep_going)
}

/// Command line representation of a [`Mode`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
struct ModeArg(Mode);

impl clap::ValueEnum for ModeArg {
    fn value_variants<'a>() -> &'a [Self] {
        static MODES: &[ModeArg] = &[
            ModeArg(Mode::OneBpp),
            ModeArg(Mode::FourBppGray),
            ModeArg(Mode::Rgb),
        ];

        MODES
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.0.as_str()))
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use clap::error::ErrorKind;
    use font::mode::Mode;
    use fontcvt_tool::{output::OutputFormat, parser::BadCodePointPolicy};

    use super::{command_parser, normalize_args, parse_arguments};

    fn try_parse(args: &[&str]) -> Result<fontcvt_tool::ConvertConfig, clap::Error> {
        let args = normalize_args(
            std::iter::once("fontcvt-tool")
                .chain(args.iter().copied())
                .map(Into::into),
        );
        let matches = command_parser().try_get_matches_from(args)?;
        Ok(parse_arguments(&matches))
    }

    #[test]
    fn command_is_consistent() {
        command_parser().debug_assert();
    }

    #[test]
    fn legacy_syntax() {
        let config = try_parse(&["-infile=Font16.c", "-outfile=font16.bin", "-bin"]).unwrap();
        assert_eq!(config.infile, Path::new("Font16.c"));
        assert_eq!(config.outfile, Path::new("font16.bin"));
        assert_eq!(config.format, OutputFormat::Bin);
        assert_eq!(config.parse.mode, Mode::OneBpp);
        assert_eq!(config.parse.on_bad_code_point, BadCodePointPolicy::Abort);

        let config = try_parse(&["-infile=a.c", "-outfile=b.c", "-graphlcd_compat"]).unwrap();
        assert_eq!(config.format, OutputFormat::GraphLcdCompat);
    }

    #[test]
    fn long_syntax_and_options() {
        let config = try_parse(&[
            "--infile",
            "a.c",
            "--outfile=b.c",
            "--graphlcd",
            "--mode",
            "4bpp",
            "--keep-going",
        ])
        .unwrap();
        assert_eq!(config.format, OutputFormat::GraphLcd);
        assert_eq!(config.parse.mode, Mode::FourBppGray);
        assert_eq!(config.parse.on_bad_code_point, BadCodePointPolicy::Skip);
    }

    #[test]
    fn exactly_one_format() {
        let error = try_parse(&["-infile=a.c", "-outfile=b.c"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);

        let error = try_parse(&["-infile=a.c", "-outfile=b.c", "-bin", "-graphlcd"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn missing_files() {
        let error = try_parse(&["-outfile=b.c", "-bin"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn help_and_version_take_precedence() {
        // Required arguments are missing, but help is still shown.
        let error = try_parse(&["-infile=a.c", "--help"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DisplayHelp);

        let error = try_parse(&["--version"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn unknown_arguments_are_left_alone() {
        let args = normalize_args(["-x", "--bin", "-bin", "-infile=a", "-mode"].map(Into::into));
        assert_eq!(args, ["-x", "--bin", "--bin", "--infile=a", "-mode"]);
    }
}
