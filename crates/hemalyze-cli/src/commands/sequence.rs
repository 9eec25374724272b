//! Sequence command - validate protein sequences and show their composition.

use std::path::Path;

use clap::{Args, Subcommand};
use console::style;

use hemalyze_core::sequence::{self, ResidueCount};

/// Arguments for the sequence command.
#[derive(Args)]
pub struct SequenceArgs {
    #[command(subcommand)]
    command: SequenceCommand,
}

#[derive(Subcommand)]
enum SequenceCommand {
    /// Check that a sequence only uses the 20 standard amino acids
    Validate(InputArgs),

    /// Show amino-acid counts
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Print counts as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// Sequence, or path to a FASTA/text file
    #[arg(required = true)]
    pub input: String,
}

pub async fn run(args: SequenceArgs) -> anyhow::Result<()> {
    match args.command {
        SequenceCommand::Validate(input) => validate(&input.input),
        SequenceCommand::Stats { input, json } => stats(&input.input, json),
    }
}

/// Contents of the file named by `input`, or `input` itself when no such
/// file exists.
pub fn read_input_text(input: &str) -> anyhow::Result<String> {
    let path = Path::new(input);
    if path.is_file() {
        Ok(std::fs::read_to_string(path)?)
    } else {
        Ok(input.to_string())
    }
}

/// Read a sequence argument: a file is parsed as FASTA, anything else is
/// taken literally.
pub fn read_sequence_input(input: &str) -> anyhow::Result<String> {
    if Path::new(input).is_file() {
        Ok(sequence::parse_fasta(&read_input_text(input)?))
    } else {
        Ok(input.to_string())
    }
}

fn validate(input: &str) -> anyhow::Result<()> {
    let raw = read_sequence_input(input)?;

    match sequence::check(&raw) {
        Ok(()) => {
            println!(
                "{} valid sequence ({} residues)",
                style("✓").green(),
                sequence::clean(&raw).len()
            );
            Ok(())
        }
        Err(e) => anyhow::bail!("{}", e),
    }
}

fn stats(input: &str, json: bool) -> anyhow::Result<()> {
    let raw = read_sequence_input(input)?;
    let counts = sequence::distribution(&raw);

    if json {
        println!("{}", serde_json::to_string(&counts)?);
    } else {
        print!("{}", format_counts(&counts));
    }

    Ok(())
}

fn format_counts(counts: &[ResidueCount]) -> String {
    let total: usize = counts.iter().map(|c| c.count).sum();
    let mut output = String::new();

    for c in counts {
        let share = if total == 0 {
            0.0
        } else {
            c.count as f64 * 100.0 / total as f64
        };
        output.push_str(&format!("{}  {:>5}  {:>5.1}%\n", c.amino_acid, c.count, share));
    }
    output.push_str(&format!("total {:>4}\n", total));

    output
}
