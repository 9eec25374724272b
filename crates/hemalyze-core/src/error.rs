//! Error types for the hemalyze-core library.

use thiserror::Error;

use crate::models::panel::BiomarkerField;

/// Main error type for the hemalyze library.
#[derive(Error, Debug)]
pub enum HemalyzeError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// File ingestion error.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Blood panel extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Protein sequence error.
    #[error("sequence error: {0}")]
    Sequence(#[from] SequenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HemalyzeError {
    /// The extraction failure inside this error, if that is what it is.
    pub fn as_extraction(&self) -> Option<&ExtractionError> {
        match self {
            Self::Extraction(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while reading an uploaded file.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The file is neither CSV, PDF nor plain text.
    #[error("unsupported file type '{0}', expected a PDF or CSV file")]
    UnsupportedFormat(String),

    /// The delimited table could not be read.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// PDF support was compiled out.
    #[error("PDF support is not enabled in this build")]
    PdfDisabled,
}

/// Errors related to blood panel field extraction.
///
/// Malformed cells and lines never surface here; they are skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    /// The structured table has no data rows.
    #[error("input table is empty")]
    EmptyInput,

    /// One or more biomarkers could not be resolved to a non-zero value.
    #[error(
        "missing required fields: {}. found fields: {}",
        join_fields(missing),
        join_fields(found)
    )]
    MissingFields {
        missing: Vec<BiomarkerField>,
        found: Vec<BiomarkerField>,
    },
}

impl ExtractionError {
    /// Fields that could not be resolved, empty for other variants.
    pub fn missing_fields(&self) -> &[BiomarkerField] {
        match self {
            Self::MissingFields { missing, .. } => missing,
            Self::EmptyInput => &[],
        }
    }
}

fn join_fields(fields: &[BiomarkerField]) -> String {
    if fields.is_empty() {
        return "none".to_string();
    }
    fields
        .iter()
        .map(|f| f.code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors related to protein sequence input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SequenceError {
    /// No residues left after stripping headers and whitespace.
    #[error("sequence is empty")]
    Empty,

    /// The sequence contains characters outside the amino-acid alphabet.
    #[error("invalid amino acid sequence: unexpected character '{0}'")]
    Invalid(char),

    /// The sequence is longer than the structure service accepts.
    #[error("sequence is too long: {len} residues, maximum is {max}")]
    TooLong { len: usize, max: usize },
}

/// Result type for the hemalyze library.
pub type Result<T> = std::result::Result<T, HemalyzeError>;
