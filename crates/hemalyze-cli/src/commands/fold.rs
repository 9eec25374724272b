//! Fold command - predict protein structures from their sequences.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use hemalyze_core::error::SequenceError;
use hemalyze_core::sequence;

use crate::client::FoldClient;

use super::load_config;
use super::sequence::read_input_text;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sequences";

/// Arguments for the fold command.
#[derive(Args)]
pub struct FoldArgs {
    /// Sequence, or path to a FASTA/text file
    #[arg(required = true)]
    input: String,

    /// Where to write the predicted PDB structure. With several FASTA
    /// records, each one goes to `<stem>_<n>.pdb` next to this path.
    #[arg(short, long, default_value = "predicted_structure.pdb")]
    output: PathBuf,

    /// Prediction endpoint (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Also print the amino-acid composition
    #[arg(long)]
    stats: bool,
}

pub async fn run(args: FoldArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(endpoint) = &args.endpoint {
        config.folding.endpoint = endpoint.clone();
    }

    let text = read_input_text(&args.input)?;
    let records = sequence::parse_fasta_records(&text);
    info!("Loaded {} sequence record(s)", records.len());

    let client = FoldClient::new(&config.folding)?;

    match records.as_slice() {
        [] => Err(SequenceError::Empty.into()),
        [seq] => fold_one(&client, seq, &args).await,
        _ => fold_records(&client, &records, &args).await,
    }
}

async fn fold_one(client: &FoldClient, seq: &str, args: &FoldArgs) -> anyhow::Result<()> {
    sequence::check_foldable(seq)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Predicting structure...");

    let pdb = client.predict(seq).await;
    pb.finish_and_clear();
    let pdb = pdb?;

    fs::write(&args.output, &pdb)?;
    println!(
        "{} Structure written to {}",
        style("✓").green(),
        args.output.display()
    );

    if args.stats {
        println!();
        print_stats(seq);
    }

    Ok(())
}

/// Fold each record in turn. Invalid or failed records are reported and
/// skipped; the run fails only when nothing could be predicted.
async fn fold_records(
    client: &FoldClient,
    records: &[String],
    args: &FoldArgs,
) -> anyhow::Result<()> {
    println!(
        "{} Found {} sequences to fold",
        style("ℹ").blue(),
        records.len()
    );

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)?
            .progress_chars("=>-"),
    );

    let mut predicted = 0;
    let mut failures = Vec::new();

    for (index, seq) in records.iter().enumerate() {
        let number = index + 1;

        if let Err(e) = sequence::check_foldable(seq) {
            warn!("Skipping sequence {}: {}", number, e);
            failures.push((number, format!("skipped: {}", e)));
            pb.inc(1);
            continue;
        }

        match client.predict(seq).await {
            Ok(pdb) => {
                let path = numbered_output(&args.output, number);
                fs::write(&path, &pdb)?;
                predicted += 1;
                pb.suspend(|| {
                    println!(
                        "{} Sequence {} written to {}",
                        style("✓").green(),
                        number,
                        path.display()
                    );
                    if args.stats {
                        print_stats(seq);
                    }
                });
            }
            Err(e) => {
                warn!("Prediction failed for sequence {}: {}", number, e);
                failures.push((number, format!("failed: {}", e)));
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    println!();
    println!(
        "{} {} of {} structures predicted",
        style("✓").green(),
        predicted,
        records.len()
    );
    for (number, reason) in &failures {
        println!("  - sequence {} {}", number, reason);
    }

    if predicted == 0 {
        anyhow::bail!("No structures could be predicted");
    }

    Ok(())
}

fn print_stats(seq: &str) {
    for count in sequence::distribution(seq) {
        println!("  {}  {}", count.amino_acid, count.count);
    }
}

/// `out/model.pdb` and record 2 give `out/model_2.pdb`.
fn numbered_output(output: &Path, number: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("predicted_structure");
    let extension = output
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("pdb");
    output.with_file_name(format!("{}_{}.{}", stem, number, extension))
}
