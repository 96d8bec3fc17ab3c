//! Detect command - print the platform an e-mail comes from.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use otamail_core::detect_platform;

use super::process::read_input;

/// Arguments for the detect command.
#[derive(Args)]
pub struct DetectArgs {
    /// E-mail text file, or "-" to read stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Print the display name instead of the id
    #[arg(long)]
    name: bool,
}

pub fn run(args: DetectArgs) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    let platform = detect_platform(&text);
    info!("{} detected as {}", args.input.display(), platform.name());

    if args.name {
        println!("{}", platform.name());
    } else {
        println!("{}", platform.id());
    }

    Ok(())
}
