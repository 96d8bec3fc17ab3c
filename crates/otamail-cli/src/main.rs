//! CLI application turning OTA booking e-mails into PMS summaries.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, detect, list, process};

/// otamail - Turn booking confirmation e-mails into PMS summaries
#[derive(Parser)]
#[command(name = "otamail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single e-mail and print its summary
    Process(process::ProcessArgs),

    /// Parse many e-mails into an output directory
    Batch(batch::BatchArgs),

    /// Print the platform detected for an e-mail
    Detect(detect::DetectArgs),

    /// List supported platforms
    Platforms,

    /// List summary templates
    Templates,

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so summaries can be piped.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Process(args) => process::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::Detect(args) => detect::run(args),
        Commands::Platforms => list::platforms(),
        Commands::Templates => list::templates(),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
