//! Core library for blood panel extraction.
//!
//! This crate provides:
//! - CSV and PDF report ingestion
//! - Biomarker field recognition (alias lookup, unit-tolerant number parsing)
//! - Table and free-text extractors producing a complete nine-field panel
//! - Protein sequence validation, composition and FASTA input

pub mod error;
pub mod ingest;
pub mod models;
pub mod panel;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod sequence;

pub use error::{ExtractionError, HemalyzeError, Result};
pub use ingest::{extract_bytes, extract_file, read_table, FileKind};
pub use models::config::{AliasMatch, HemalyzeConfig};
pub use models::panel::{BiomarkerField, BloodPanel, PanelBuilder};
pub use models::table::{Row, Table};
pub use panel::{PanelExtractor, TableExtractor, TextScanner};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
