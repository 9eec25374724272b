//! In-memory delimited table: ordered rows keyed by column header.

use serde::{Deserialize, Serialize};

/// One data row: `(header, raw cell)` pairs in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell under `header`.
    pub fn with_cell(mut self, header: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(header, value);
        self
    }

    /// Append a cell under `header`.
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// `(header, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<H: Into<String>, V: Into<String>> FromIterator<(H, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (H, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(h, v)| (h.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered data rows of a table whose first line was a header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create a table from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_pairs() {
        let row: Row = [("Test", "WBC"), ("Result", "6.1")].into_iter().collect();
        assert_eq!(row, Row::new().with_cell("Test", "WBC").with_cell("Result", "6.1"));
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_row_preserves_column_order() {
        let row = Row::new().with_cell("b", "2").with_cell("a", "1");
        let headers: Vec<_> = row.iter().map(|(header, _)| header).collect();
        assert_eq!(headers, vec!["b", "a"]);
    }
}
