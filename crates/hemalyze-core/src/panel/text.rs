//! Line scanner for free-text lab reports.

use tracing::{debug, trace};

use crate::models::config::AliasMatch;
use crate::models::panel::{BloodPanel, PanelBuilder};

use super::rules::{extract_value, parse_leading_float, AliasResolver, INLINE_VALUE};
use super::{PanelExtractor, Result};

/// Extracts a blood panel from text produced by a document-to-text step.
///
/// Reports put values either on the line after a label or inline with it
/// (`WBC: 5.0`), often both within one document, so every line is checked
/// both ways.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextScanner {
    resolver: AliasResolver,
}

impl TextScanner {
    /// Create a scanner using table-order alias matching.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alias match strategy.
    pub fn with_alias_match(mut self, strategy: AliasMatch) -> Self {
        self.resolver = AliasResolver::new(strategy);
        self
    }

    /// Scan pre-split lines.
    pub fn scan_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<BloodPanel> {
        let mut builder = PanelBuilder::new();

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.as_ref().trim();

            if let Some(field) = self.resolver.resolve(line) {
                if !builder.is_set(field) {
                    let value = extract_value(line).or_else(|| {
                        lines.get(i + 1).and_then(|next| extract_value(next.as_ref()))
                    });
                    if let Some(value) = value {
                        builder.fill(field, value);
                        trace!("{} = {} near line {}", field, value, i + 1);
                    }
                }
            }

            if let Some(caps) = INLINE_VALUE.captures(line) {
                if let Some(field) = self.resolver.resolve(&caps[1]) {
                    if !builder.is_set(field) {
                        if let Some(value) = parse_leading_float(&caps[2]) {
                            builder.fill(field, value);
                            trace!("{} = {} inline on line {}", field, value, i + 1);
                        }
                    }
                }
            }
        }

        let result = builder.finish();
        match &result {
            Ok(_) => debug!("Extracted complete panel from {} lines", lines.len()),
            Err(e) => debug!("Text extraction incomplete after {} lines: {}", lines.len(), e),
        }
        result
    }
}

impl PanelExtractor for TextScanner {
    type Input = str;

    fn extract(&self, text: &str) -> Result<BloodPanel> {
        let lines: Vec<&str> = text.split('\n').collect();
        self.scan_lines(&lines)
    }
}
