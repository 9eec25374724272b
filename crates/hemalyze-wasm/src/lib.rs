//! WASM bindings for blood panel extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! PDF reports are not supported here; extract their text on the JS side and
//! pass it to [`extract_from_text`].

use js_sys::{Array, Object, Uint8Array};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use hemalyze_core::models::config::ExtractionConfig;
use hemalyze_core::{
    sequence, AliasMatch, FileKind, PanelExtractor, Row, Table, TableExtractor, TextScanner,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Extract a blood panel from report text, one entry per line.
#[wasm_bindgen]
pub fn extract_from_text(text: &str) -> Result<JsValue, JsValue> {
    BloodPanelExtractor::new().extract_text(text)
}

/// Extract a blood panel from parsed table rows.
///
/// `rows` is an array of plain objects mapping column headers to cell
/// values, in the shape CSV parsers such as Papa Parse produce.
#[wasm_bindgen]
pub fn extract_from_rows(rows: JsValue) -> Result<JsValue, JsValue> {
    BloodPanelExtractor::new().extract_rows(rows)
}

/// Extract a blood panel from CSV text with a header line.
#[wasm_bindgen]
pub fn extract_from_csv(csv: &str) -> Result<JsValue, JsValue> {
    BloodPanelExtractor::new().extract_csv(csv)
}

/// Extract a blood panel from an uploaded CSV or text file.
#[wasm_bindgen]
pub async fn extract_from_file(file: web_sys::File) -> Result<JsValue, JsValue> {
    let kind = FileKind::detect(&file.name(), Some(file.type_().as_str())).map_err(to_js_error)?;

    let buffer = JsFuture::from(file.array_buffer()).await?;
    let data = Uint8Array::new(&buffer).to_vec();

    let panel = hemalyze_core::extract_bytes(kind, &data, &ExtractionConfig::default())
        .map_err(to_js_error)?;

    serde_wasm_bindgen::to_value(&panel).map_err(to_js_error)
}

/// Check that a protein sequence only uses the 20 standard amino acids.
#[wasm_bindgen]
pub fn validate_sequence(sequence: &str) -> bool {
    sequence::validate(sequence)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SequenceReport {
    valid: bool,
    length: usize,
    error: Option<String>,
}

/// Validate a sequence and report its cleaned length and any problem found.
#[wasm_bindgen]
pub fn check_sequence(sequence: &str) -> Result<JsValue, JsValue> {
    let report = match sequence::check(sequence) {
        Ok(()) => SequenceReport {
            valid: true,
            length: sequence::clean(sequence).len(),
            error: None,
        },
        Err(e) => SequenceReport {
            valid: false,
            length: 0,
            error: Some(e.to_string()),
        },
    };

    serde_wasm_bindgen::to_value(&report).map_err(to_js_error)
}

/// Amino-acid counts as `[{ aminoAcid, count }]`, sorted by letter.
#[wasm_bindgen]
pub fn amino_acid_distribution(sequence: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&sequence::distribution(sequence)).map_err(to_js_error)
}

/// Join the residue lines of FASTA text into one sequence.
#[wasm_bindgen]
pub fn parse_fasta(text: &str) -> String {
    sequence::parse_fasta(text)
}

/// Split FASTA text into one cleaned sequence per record.
#[wasm_bindgen]
pub fn parse_fasta_records(text: &str) -> Vec<String> {
    sequence::parse_fasta_records(text)
}

/// Parse and validate FASTA text, returning the cleaned sequence.
#[wasm_bindgen]
pub fn load_sequence(text: &str) -> Result<String, JsValue> {
    sequence::load_sequence(text).map_err(to_js_error)
}

/// Blood panel extractor class for browser use.
#[wasm_bindgen]
pub struct BloodPanelExtractor {
    config: ExtractionConfig,
}

#[wasm_bindgen]
impl BloodPanelExtractor {
    /// Create a new extractor using table-order alias matching.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// Prefer the longest matching alias when a label names several biomarkers.
    #[wasm_bindgen]
    pub fn set_longest_match(&mut self, enabled: bool) {
        self.config.alias_match = if enabled {
            AliasMatch::LongestFirst
        } else {
            AliasMatch::TableOrder
        };
    }

    /// Extract a panel from report text.
    #[wasm_bindgen]
    pub fn extract_text(&self, text: &str) -> Result<JsValue, JsValue> {
        let panel = TextScanner::new()
            .with_alias_match(self.config.alias_match)
            .extract(text)
            .map_err(to_js_error)?;

        serde_wasm_bindgen::to_value(&panel).map_err(to_js_error)
    }

    /// Extract a panel from an array of row objects.
    #[wasm_bindgen]
    pub fn extract_rows(&self, rows: JsValue) -> Result<JsValue, JsValue> {
        let table = rows_to_table(&rows)?;
        self.extract_table(&table)
    }

    /// Extract a panel from CSV text.
    #[wasm_bindgen]
    pub fn extract_csv(&self, csv: &str) -> Result<JsValue, JsValue> {
        let table = hemalyze_core::read_table(csv.as_bytes()).map_err(to_js_error)?;
        self.extract_table(&table)
    }
}

impl BloodPanelExtractor {
    fn extract_table(&self, table: &Table) -> Result<JsValue, JsValue> {
        let panel = TableExtractor::new()
            .with_alias_match(self.config.alias_match)
            .extract(table)
            .map_err(to_js_error)?;

        serde_wasm_bindgen::to_value(&panel).map_err(to_js_error)
    }
}

impl Default for BloodPanelExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a JS array of row objects into a table, keeping key order.
fn rows_to_table(rows: &JsValue) -> Result<Table, JsValue> {
    if !Array::is_array(rows) {
        return Err(JsValue::from_str("rows must be an array of objects"));
    }

    let mut table_rows = Vec::new();
    for value in Array::from(rows).iter() {
        if !value.is_object() {
            web_sys::console::warn_1(&"skipping non-object row".into());
            continue;
        }

        let row: Row = Object::entries(&Object::from(value))
            .iter()
            .filter_map(|entry| {
                let pair = Array::from(&entry);
                let header = pair.get(0).as_string()?;
                let cell = cell_text(&pair.get(1))?;
                Some((header, cell))
            })
            .collect();
        table_rows.push(row);
    }

    Ok(Table::new(table_rows))
}

/// Cells may arrive as strings or as numbers when the parser types them.
fn cell_text(value: &JsValue) -> Option<String> {
    value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const REPORT: &str = "WBC: 6.2\nRBC: 4.7\nHGB: 13.5\nPLT: 240\nNeutrophils 58\n\
                          Lymphocytes 31\nMonocytes 7\nEosinophils 3\nBasophils 1";

    #[wasm_bindgen_test]
    fn test_validate_sequence() {
        assert!(validate_sequence("MKTAYIAK"));
        assert!(!validate_sequence("MKT123"));
        assert!(!validate_sequence(""));
    }

    #[wasm_bindgen_test]
    fn test_parse_fasta() {
        assert_eq!(parse_fasta(">sp|P1\nMKTA\nYIAK\n"), "MKTAYIAK");
    }

    #[wasm_bindgen_test]
    fn test_parse_fasta_records() {
        assert_eq!(parse_fasta_records(">a\nMKTA\n>b\nGGGG\n"), vec!["MKTA", "GGGG"]);
    }

    #[wasm_bindgen_test]
    fn test_load_sequence() {
        assert_eq!(load_sequence(">x\nmkta\n").unwrap(), "MKTA");
        assert!(load_sequence(">header only\n").is_err());
    }

    #[wasm_bindgen_test]
    fn test_extract_from_text() {
        assert!(extract_from_text(REPORT).is_ok());
        assert!(extract_from_text("WBC: 6.2").is_err());
    }

    #[wasm_bindgen_test]
    fn test_extract_from_csv() {
        let csv = "WBC,RBC,HGB,PLT,NEUT,LYMPH,MONO,EO,BASO\n6.2,4.7,13.5,240,58,31,7,3,1\n";
        assert!(extract_from_csv(csv).is_ok());
    }

    #[wasm_bindgen_test]
    fn test_extract_from_rows_requires_array() {
        assert!(extract_from_rows(JsValue::from_str("WBC")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_cell_text() {
        assert_eq!(cell_text(&JsValue::from_f64(5.4)), Some("5.4".to_string()));
        assert_eq!(cell_text(&JsValue::from_str("13.5 g/dL")), Some("13.5 g/dL".to_string()));
        assert_eq!(cell_text(&JsValue::NULL), None);
    }
}
