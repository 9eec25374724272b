//! Blood panel data models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// One of the nine complete-blood-count biomarkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BiomarkerField {
    /// White blood cell count.
    Wbc,
    /// Red blood cell count.
    Rbc,
    /// Hemoglobin.
    Hgb,
    /// Platelet count.
    Plt,
    /// Neutrophils.
    Neut,
    /// Lymphocytes.
    Lymph,
    /// Monocytes.
    Mono,
    /// Eosinophils.
    Eo,
    /// Basophils.
    Baso,
}

impl BiomarkerField {
    /// All fields in canonical order.
    pub const ALL: [BiomarkerField; 9] = [
        Self::Wbc,
        Self::Rbc,
        Self::Hgb,
        Self::Plt,
        Self::Neut,
        Self::Lymph,
        Self::Mono,
        Self::Eo,
        Self::Baso,
    ];

    /// Canonical upper-case identifier (e.g. `WBC`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::Wbc => "WBC",
            Self::Rbc => "RBC",
            Self::Hgb => "HGB",
            Self::Plt => "PLT",
            Self::Neut => "NEUT",
            Self::Lymph => "LYMPH",
            Self::Mono => "MONO",
            Self::Eo => "EO",
            Self::Baso => "BASO",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wbc => "White blood cells",
            Self::Rbc => "Red blood cells",
            Self::Hgb => "Hemoglobin",
            Self::Plt => "Platelets",
            Self::Neut => "Neutrophils",
            Self::Lymph => "Lymphocytes",
            Self::Mono => "Monocytes",
            Self::Eo => "Eosinophils",
            Self::Baso => "Basophils",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BiomarkerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A complete blood panel: all nine biomarkers present and non-zero.
///
/// Serializes with upper-case keys (`{"WBC": 5.0, ...}`), which is the
/// request body the analysis service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BloodPanel {
    pub wbc: f64,
    pub rbc: f64,
    pub hgb: f64,
    pub plt: f64,
    pub neut: f64,
    pub lymph: f64,
    pub mono: f64,
    pub eo: f64,
    pub baso: f64,
}

impl BloodPanel {
    /// Value of a single biomarker.
    pub fn get(&self, field: BiomarkerField) -> f64 {
        match field {
            BiomarkerField::Wbc => self.wbc,
            BiomarkerField::Rbc => self.rbc,
            BiomarkerField::Hgb => self.hgb,
            BiomarkerField::Plt => self.plt,
            BiomarkerField::Neut => self.neut,
            BiomarkerField::Lymph => self.lymph,
            BiomarkerField::Mono => self.mono,
            BiomarkerField::Eo => self.eo,
            BiomarkerField::Baso => self.baso,
        }
    }

    /// Iterate `(field, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BiomarkerField, f64)> + '_ {
        BiomarkerField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Build a panel from values in canonical order.
    ///
    /// Goes through [`PanelBuilder`], so zero or non-finite values are
    /// rejected the same way extraction rejects them.
    pub fn from_values(values: [f64; 9]) -> Result<Self, ExtractionError> {
        let mut builder = PanelBuilder::new();
        for (field, value) in BiomarkerField::ALL.into_iter().zip(values) {
            builder.fill(field, value);
        }
        builder.finish()
    }
}

/// Accumulates biomarker values while a document is scanned.
///
/// A slot only counts as set once it holds a non-zero value, so a zero
/// read from a document can still be replaced by a later hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelBuilder {
    slots: [Option<f64>; 9],
}

impl PanelBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a field already holds a non-zero value.
    pub fn is_set(&self, field: BiomarkerField) -> bool {
        matches!(self.slots[field.index()], Some(v) if v != 0.0)
    }

    /// Raw slot value, zero included.
    pub fn get(&self, field: BiomarkerField) -> Option<f64> {
        self.slots[field.index()]
    }

    /// Store `value` unless the field is already set.
    ///
    /// Returns true when the value was stored.
    pub fn fill(&mut self, field: BiomarkerField, value: f64) -> bool {
        if self.is_set(field) {
            return false;
        }
        self.slots[field.index()] = Some(value);
        true
    }

    /// Number of slots holding any value, zero included.
    pub fn stored(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Fields with a usable (finite, non-zero) value.
    pub fn found(&self) -> Vec<BiomarkerField> {
        BiomarkerField::ALL
            .into_iter()
            .filter(|&f| self.usable(f).is_some())
            .collect()
    }

    /// Fields that are absent, zero, or not finite.
    pub fn missing(&self) -> Vec<BiomarkerField> {
        BiomarkerField::ALL
            .into_iter()
            .filter(|&f| self.usable(f).is_none())
            .collect()
    }

    fn usable(&self, field: BiomarkerField) -> Option<f64> {
        self.slots[field.index()].filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Convert into a complete panel.
    pub fn finish(&self) -> Result<BloodPanel, ExtractionError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(ExtractionError::MissingFields {
                missing,
                found: self.found(),
            });
        }

        let value = |f: BiomarkerField| self.usable(f).unwrap_or_default();
        Ok(BloodPanel {
            wbc: value(BiomarkerField::Wbc),
            rbc: value(BiomarkerField::Rbc),
            hgb: value(BiomarkerField::Hgb),
            plt: value(BiomarkerField::Plt),
            neut: value(BiomarkerField::Neut),
            lymph: value(BiomarkerField::Lymph),
            mono: value(BiomarkerField::Mono),
            eo: value(BiomarkerField::Eo),
            baso: value(BiomarkerField::Baso),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_builder() -> PanelBuilder {
        let mut builder = PanelBuilder::new();
        for (i, field) in BiomarkerField::ALL.into_iter().enumerate() {
            builder.fill(field, (i + 1) as f64);
        }
        builder
    }

    #[test]
    fn test_finish_complete_panel() {
        let panel = full_builder().finish().unwrap();
        assert_eq!(panel.wbc, 1.0);
        assert_eq!(panel.baso, 9.0);
        assert_eq!(panel.get(BiomarkerField::Plt), 4.0);
    }

    #[test]
    fn test_zero_counts_as_missing() {
        let mut builder = full_builder();
        builder.slots[BiomarkerField::Wbc.index()] = Some(0.0);

        let err = builder.finish().unwrap_err();
        assert_eq!(err.missing_fields(), &[BiomarkerField::Wbc]);
        assert!(!builder.is_set(BiomarkerField::Wbc));

        // A zero slot can still be filled by a later hit.
        assert!(builder.fill(BiomarkerField::Wbc, 6.1));
        assert_eq!(builder.finish().unwrap().wbc, 6.1);
    }

    #[test]
    fn test_fill_does_not_overwrite() {
        let mut builder = PanelBuilder::new();
        assert!(builder.fill(BiomarkerField::Hgb, 13.5));
        assert!(!builder.fill(BiomarkerField::Hgb, 99.0));
        assert_eq!(builder.get(BiomarkerField::Hgb), Some(13.5));
    }

    #[test]
    fn test_missing_message_lists_missing_and_found() {
        let mut builder = PanelBuilder::new();
        builder.fill(BiomarkerField::Rbc, 4.7);
        builder.fill(BiomarkerField::Eo, 2.0);

        let err = builder.finish().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields: WBC, HGB, PLT, NEUT, LYMPH, MONO, BASO. found fields: RBC, EO"
        );
    }

    #[test]
    fn test_serializes_with_canonical_keys() {
        let panel = full_builder().finish().unwrap();
        let json = serde_json::to_value(panel).unwrap();
        assert_eq!(json["WBC"], 1.0);
        assert_eq!(json["LYMPH"], 6.0);
        assert_eq!(json.as_object().unwrap().len(), 9);
    }
}
