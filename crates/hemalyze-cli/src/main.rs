//! CLI application for blood panel extraction and protein sequence tools.

mod client;
mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{analyze, batch, config, extract, fold, sequence};

/// Blood panel extraction - Read CBC values from lab reports
#[derive(Parser)]
#[command(name = "hemalyze")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a blood panel from a CSV, PDF or text report
    Extract(extract::ExtractArgs),

    /// Extract a blood panel and send it to the analysis service
    Analyze(analyze::AnalyzeArgs),

    /// Extract blood panels from multiple reports
    Batch(batch::BatchArgs),

    /// Validate protein sequences and show their composition
    Sequence(sequence::SequenceArgs),

    /// Predict a protein structure and save it as PDB
    Fold(fold::FoldArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Logs go to stderr so extracted data can be piped from stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Analyze(args) => analyze::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Sequence(args) => sequence::run(args).await,
        Commands::Fold(args) => fold::run(args, config_path).await,
        Commands::Config(args) => config::run(args).await,
    }
}
