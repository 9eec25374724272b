//! Header-driven extraction from delimited tables.

use tracing::{debug, trace};

use crate::error::ExtractionError;
use crate::models::config::AliasMatch;
use crate::models::panel::{BloodPanel, PanelBuilder};
use crate::models::table::{Row, Table};

use super::rules::{extract_value, AliasResolver};
use super::{PanelExtractor, Result};

/// Extracts a blood panel from a table with one biomarker per column.
///
/// The first row is read header by header. Only when that yields no value
/// at all is every cell of every row scanned, which covers reports where the
/// meaningful header is not on the first line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExtractor {
    resolver: AliasResolver,
}

impl TableExtractor {
    /// Create an extractor using table-order alias matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alias match strategy.
    pub fn with_alias_match(mut self, strategy: AliasMatch) -> Self {
        self.resolver = AliasResolver::new(strategy);
        self
    }

    fn scan_row(&self, row: &Row, builder: &mut PanelBuilder) {
        for (header, cell) in row.iter() {
            let Some(field) = self.resolver.resolve(header) else {
                continue;
            };
            if builder.is_set(field) {
                continue;
            }
            match extract_value(cell) {
                Some(value) => {
                    builder.fill(field, value);
                    trace!("{} = {} from column '{}'", field, value, header);
                }
                None => trace!("column '{}' names {} but '{}' has no number", header, field, cell),
            }
        }
    }
}

impl PanelExtractor for TableExtractor {
    type Input = Table;

    fn extract(&self, table: &Table) -> Result<BloodPanel> {
        let first = table.first().ok_or(ExtractionError::EmptyInput)?;

        let mut builder = PanelBuilder::new();
        self.scan_row(first, &mut builder);

        if builder.stored() == 0 {
            debug!(
                "No biomarker headers in first row, scanning all {} rows",
                table.len()
            );
            for row in table.rows() {
                self.scan_row(row, &mut builder);
            }
        }

        let result = builder.finish();
        if let Err(e) = &result {
            debug!("Table extraction incomplete: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::panel::BiomarkerField;
    use pretty_assertions::assert_eq;

    const HEADERS: [&str; 9] = ["WBC", "RBC", "HGB", "PLT", "NEUT", "LYMPH", "MONO", "EO", "BASO"];

    fn single_row(headers: &[&str], values: &[&str]) -> Table {
        Table::new(vec![headers.iter().copied().zip(values.iter().copied()).collect()])
    }

    #[test]
    fn test_extract_single_row() {
        let values = [7.2, 4.8, 14.1, 250.0, 60.5, 30.2, 6.0, 2.5, 0.8];
        let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let cells: Vec<&str> = cells.iter().map(String::as_str).collect();

        let panel = TableExtractor::new()
            .extract(&single_row(&HEADERS, &cells))
            .unwrap();

        assert_eq!(panel, BloodPanel::from_values(values).unwrap());
    }

    #[test]
    fn test_extract_descriptive_headers_with_units() {
        let table = single_row(
            &[
                "Patient",
                "White Blood Cell Count",
                "Red Blood Cell Count",
                "Hemoglobin (g/dL)",
                "Platelets",
                "Neutrophils %",
                "Lymphocytes %",
                "Monocytes %",
                "Eosinophils %",
                "Basophils %",
            ],
            &[
                "J. Doe",
                "6.8 x10³/μL",
                "4.9 x10^6/uL",
                "13.9 g/dL",
                "245 x10³/μL",
                "58%",
                "32%",
                "7%",
                "2.4%",
                "0.6%",
            ],
        );

        let panel = TableExtractor::new().extract(&table).unwrap();
        assert_eq!(panel.wbc, 6.8);
        assert_eq!(panel.rbc, 4.9);
        assert_eq!(panel.hgb, 13.9);
        assert_eq!(panel.plt, 245.0);
        assert_eq!(panel.baso, 0.6);
    }

    #[test]
    fn test_empty_table() {
        let err = TableExtractor::new().extract(&Table::default()).unwrap_err();
        assert_eq!(err, ExtractionError::EmptyInput);
    }

    #[test]
    fn test_missing_fields_are_named() {
        let table = single_row(&["WBC", "RBC", "HGB"], &["6.1", "4.5", "no data"]);

        let err = TableExtractor::new().extract(&table).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingFields {
                missing: vec![
                    BiomarkerField::Hgb,
                    BiomarkerField::Plt,
                    BiomarkerField::Neut,
                    BiomarkerField::Lymph,
                    BiomarkerField::Mono,
                    BiomarkerField::Eo,
                    BiomarkerField::Baso,
                ],
                found: vec![BiomarkerField::Wbc, BiomarkerField::Rbc],
            }
        );
    }

    #[test]
    fn test_explicit_zero_is_missing() {
        let table = single_row(&HEADERS, &["0", "4.8", "14", "250", "60", "30", "6", "2", "1"]);

        let err = TableExtractor::new().extract(&table).unwrap_err();
        assert_eq!(err.missing_fields(), &[BiomarkerField::Wbc]);
    }

    #[test]
    fn test_first_value_wins_within_row() {
        let mut headers = HEADERS.to_vec();
        headers.push("WBC (repeat)");
        let table = single_row(&headers, &["5", "4", "13", "200", "50", "30", "5", "2", "1", "9"]);

        let panel = TableExtractor::new().extract(&table).unwrap();
        assert_eq!(panel.wbc, 5.0);
    }

    #[test]
    fn test_fallback_scans_all_rows() {
        // Row one only carries a section title, so pass one stores nothing.
        let mut rows = vec![Row::new().with_cell("Section", "Complete blood count")];
        let values = ["6", "4.6", "13", "210", "55", "35", "6", "3", "1"];
        for (code, value) in HEADERS.iter().zip(values) {
            rows.push(Row::new().with_cell("Section", "").with_cell(*code, value));
        }

        let panel = TableExtractor::new().extract(&Table::new(rows)).unwrap();
        assert_eq!(panel.plt, 210.0);
        assert_eq!(panel.baso, 1.0);
    }

    #[test]
    fn test_fallback_skipped_when_first_row_has_values() {
        let table = Table::new(vec![
            Row::new().with_cell("WBC", "6.0"),
            Row::new().with_cell("RBC", "4.5"),
        ]);

        let err = TableExtractor::new().extract(&table).unwrap_err();
        assert!(err.missing_fields().contains(&BiomarkerField::Rbc));
    }
}
