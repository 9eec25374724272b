//! Analyze command - extract a panel and ask the analysis service for a diagnosis.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::client::{AnalysisClient, AnalysisReport};

use super::extract::{extract_panel, extraction_config};
use super::load_config;

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input file (CSV, PDF or TXT)
    #[arg(required = true)]
    input: PathBuf,

    /// Analysis service base URL (overrides config)
    #[arg(long)]
    api_url: Option<String>,

    /// Check the service health endpoint before sending
    #[arg(long)]
    check: bool,

    /// Print the raw JSON report
    #[arg(long)]
    json: bool,

    /// Prefer the longest matching alias when a label names several biomarkers
    #[arg(long)]
    longest_match: bool,
}

#[derive(Serialize)]
struct AnalysisOutput {
    analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    report: AnalysisReport,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(url) = args.api_url {
        config.analysis.base_url = url;
    }

    let extraction = extraction_config(&config.extraction, args.longest_match);
    let panel = extract_panel(&args.input, &extraction)?;

    let client = AnalysisClient::new(&config.analysis)?;

    if args.check && !client.health().await {
        anyhow::bail!(
            "Analysis service at {} is not responding",
            config.analysis.base_url
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Analyzing blood panel...");

    let report = client.analyze(&panel).await;
    pb.finish_and_clear();
    let report = report?;

    if args.json {
        let output = AnalysisOutput {
            analyzed_at: Utc::now(),
            report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}", style("Diagnosis:").bold(), style(&report.disease).cyan());
    println!();
    println!("{}", style("Possible causes:").bold());
    for line in report.cause.lines().map(str::trim).filter(|l| !l.is_empty()) {
        println!("  {}", line);
    }

    Ok(())
}
