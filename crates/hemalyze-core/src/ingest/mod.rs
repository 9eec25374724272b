//! Uploaded file ingestion: type detection and routing to an extractor.

mod delimited;

pub use delimited::read_table;

use std::path::Path;

use tracing::info;

use crate::error::{IngestError, Result};
use crate::models::config::ExtractionConfig;
use crate::models::panel::BloodPanel;
use crate::panel::{PanelExtractor, TableExtractor, TextScanner};

/// Kind of uploaded report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Comma-separated table, one biomarker per column.
    Csv,
    /// PDF report, scanned as free text.
    Pdf,
    /// Plain text report.
    Text,
}

impl FileKind {
    /// Detect the kind from a MIME type, falling back to the file extension.
    pub fn detect(file_name: &str, mime: Option<&str>) -> std::result::Result<Self, IngestError> {
        match mime.map(|m| m.trim().to_lowercase()).as_deref() {
            Some("text/csv") => return Ok(Self::Csv),
            Some("application/pdf") => return Ok(Self::Pdf),
            Some("text/plain") => return Ok(Self::Text),
            _ => {}
        }

        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            "txt" => Ok(Self::Text),
            _ => Err(IngestError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// Extract a blood panel from file contents of a known kind.
pub fn extract_bytes(kind: FileKind, data: &[u8], config: &ExtractionConfig) -> Result<BloodPanel> {
    info!("Extracting blood panel from {:?} input ({} bytes)", kind, data.len());

    let panel = match kind {
        FileKind::Csv => {
            let table = read_table(data)?;
            TableExtractor::new()
                .with_alias_match(config.alias_match)
                .extract(&table)?
        }
        FileKind::Pdf => {
            let text = pdf_text(data)?;
            TextScanner::new()
                .with_alias_match(config.alias_match)
                .extract(&text)?
        }
        FileKind::Text => {
            let text = String::from_utf8_lossy(data);
            TextScanner::new()
                .with_alias_match(config.alias_match)
                .extract(&text)?
        }
    };

    Ok(panel)
}

/// Read a report from disk and extract a blood panel.
pub fn extract_file(path: &Path, config: &ExtractionConfig) -> Result<BloodPanel> {
    let name = path.to_string_lossy();
    let kind = FileKind::detect(&name, None)?;
    let data = std::fs::read(path)?;
    extract_bytes(kind, &data, config)
}

#[cfg(feature = "pdf")]
fn pdf_text(data: &[u8]) -> Result<String> {
    Ok(crate::pdf::PdfExtractor::text_from_bytes(data)?)
}

#[cfg(not(feature = "pdf"))]
fn pdf_text(_data: &[u8]) -> Result<String> {
    Err(IngestError::PdfDisabled.into())
}
