//! Label-to-biomarker alias resolution.

use lazy_static::lazy_static;

use crate::models::config::AliasMatch;
use crate::models::panel::BiomarkerField;

/// Lower-case label variants, many-to-one onto biomarkers.
///
/// Order matters for [`AliasMatch::TableOrder`]: the first alias contained
/// in a label decides the field.
pub const FIELD_ALIASES: &[(&str, BiomarkerField)] = &[
    ("wbc", BiomarkerField::Wbc),
    ("white blood cell", BiomarkerField::Wbc),
    ("white blood cell count", BiomarkerField::Wbc),
    ("rbc", BiomarkerField::Rbc),
    ("red blood cell", BiomarkerField::Rbc),
    ("red blood cell count", BiomarkerField::Rbc),
    ("hgb", BiomarkerField::Hgb),
    ("hemoglobin", BiomarkerField::Hgb),
    ("hgb/hemoglobin", BiomarkerField::Hgb),
    ("plt", BiomarkerField::Plt),
    ("platelet", BiomarkerField::Plt),
    ("platelets", BiomarkerField::Plt),
    ("platelet count", BiomarkerField::Plt),
    ("neut", BiomarkerField::Neut),
    ("neutrophils", BiomarkerField::Neut),
    ("neutrophil", BiomarkerField::Neut),
    ("lymph", BiomarkerField::Lymph),
    ("lymphocytes", BiomarkerField::Lymph),
    ("lymphocyte", BiomarkerField::Lymph),
    ("mono", BiomarkerField::Mono),
    ("monocytes", BiomarkerField::Mono),
    ("monocyte", BiomarkerField::Mono),
    ("eo", BiomarkerField::Eo),
    ("eosinophils", BiomarkerField::Eo),
    ("eosinophil", BiomarkerField::Eo),
    ("baso", BiomarkerField::Baso),
    ("basophils", BiomarkerField::Baso),
    ("basophil", BiomarkerField::Baso),
];

lazy_static! {
    // Stable sort: equal-length aliases keep table order.
    static ref ALIASES_LONGEST_FIRST: Vec<(&'static str, BiomarkerField)> = {
        let mut aliases = FIELD_ALIASES.to_vec();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        aliases
    };
}

/// Resolves free-form labels to biomarker fields by substring containment.
#[derive(Debug, Clone, Copy, Default)]
pub struct AliasResolver {
    strategy: AliasMatch,
}

impl AliasResolver {
    /// Create a resolver with the given match strategy.
    pub fn new(strategy: AliasMatch) -> Self {
        Self { strategy }
    }

    /// Find the biomarker named anywhere in `label`, case-insensitive.
    pub fn resolve(&self, label: &str) -> Option<BiomarkerField> {
        let lower = label.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }

        let aliases: &[(&str, BiomarkerField)] = match self.strategy {
            AliasMatch::TableOrder => FIELD_ALIASES,
            AliasMatch::LongestFirst => &ALIASES_LONGEST_FIRST,
        };

        aliases
            .iter()
            .find(|(alias, _)| lower.contains(alias))
            .map(|&(_, field)| field)
    }
}
