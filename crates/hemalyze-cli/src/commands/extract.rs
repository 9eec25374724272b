//! Extract command - read a blood panel from a single report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use hemalyze_core::models::config::{AliasMatch, ExtractionConfig};
use hemalyze_core::{BiomarkerField, BloodPanel};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (CSV, PDF or TXT)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Prefer the longest matching alias when a label names several biomarkers
    #[arg(long)]
    longest_match: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let extraction = extraction_config(&config.extraction, args.longest_match);

    let panel = extract_panel(&args.input, &extraction)?;

    let output = format_panel(&panel, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Apply the `--longest-match` override.
pub fn extraction_config(base: &ExtractionConfig, longest_match: bool) -> ExtractionConfig {
    let mut config = base.clone();
    if longest_match {
        config.alias_match = AliasMatch::LongestFirst;
    }
    config
}

/// Check the input path and extract a panel from it.
pub fn extract_panel(input: &Path, config: &ExtractionConfig) -> anyhow::Result<BloodPanel> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    info!("Processing file: {}", input.display());
    Ok(hemalyze_core::extract_file(input, config)?)
}

pub fn format_panel(panel: &BloodPanel, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(panel)?),
        OutputFormat::Csv => format_csv(panel),
        OutputFormat::Text => Ok(format_text(panel)),
    }
}

fn format_csv(panel: &BloodPanel) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(BiomarkerField::ALL.iter().map(|f| f.code()))?;
    wtr.write_record(panel.iter().map(|(_, value)| value.to_string()))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(panel: &BloodPanel) -> String {
    let mut output = String::new();

    output.push_str("Blood panel:\n");
    for (field, value) in panel.iter() {
        output.push_str(&format!("  {:<6} {:<18} {}\n", field.code(), field.label(), value));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> BloodPanel {
        BloodPanel::from_values([6.2, 4.7, 13.5, 240.0, 58.0, 31.0, 7.0, 3.0, 1.0]).unwrap()
    }

    #[test]
    fn test_format_csv() {
        let csv = format_panel(&panel(), OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "WBC,RBC,HGB,PLT,NEUT,LYMPH,MONO,EO,BASO\n6.2,4.7,13.5,240,58,31,7,3,1\n"
        );
    }

    #[test]
    fn test_format_text() {
        let text = format_panel(&panel(), OutputFormat::Text).unwrap();
        assert!(text.contains("HGB    Hemoglobin         13.5"));
        assert_eq!(text.lines().count(), 10);
    }

    #[test]
    fn test_longest_match_override() {
        let base = ExtractionConfig::default();
        assert_eq!(extraction_config(&base, false).alias_match, AliasMatch::TableOrder);
        assert_eq!(extraction_config(&base, true).alias_match, AliasMatch::LongestFirst);
    }
}
