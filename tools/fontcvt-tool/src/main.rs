//! Converts output from SEGGER's FontCvt into a binary (flash memory) format or the C source
//! formats used by the GraphLCD library.

use anyhow::{Context, Result};
use flexi_logger::Logger;

mod cli;

fn main() -> Result<()> {
    let config = cli::get_config();

    let _logger = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .start()?;

    log::info!("fontcvt-tool {}", env!("CARGO_PKG_VERSION"));
    log::debug!("infile argument = {}", config.infile.display());
    log::debug!("outfile argument = {}", config.outfile.display());
    log::debug!("format argument = {}", config.format.as_str());

    let font = fontcvt_tool::convert(&config).with_context(|| {
        format!(
            "error converting \"{}\" to \"{}\"",
            config.infile.display(),
            config.outfile.display()
        )
    })?;

    println!(
        "converted {} glyphs to \"{}\"",
        font.glyph_count(),
        config.outfile.display()
    );
    Ok(())
}
