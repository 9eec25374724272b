//! Blood panel field extraction module.

mod table;
mod text;
pub mod rules;

pub use table::TableExtractor;
pub use text::TextScanner;

use crate::error::ExtractionError;
use crate::models::panel::BloodPanel;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for blood panel extractors.
pub trait PanelExtractor {
    /// Input the extractor reads from.
    type Input: ?Sized;

    /// Extract a complete panel, or report which fields are missing.
    fn extract(&self, input: &Self::Input) -> Result<BloodPanel>;
}
