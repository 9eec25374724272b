//! Data models.

pub mod config;
pub mod panel;
pub mod table;

pub use config::{AliasMatch, HemalyzeConfig};
pub use panel::{BiomarkerField, BloodPanel, PanelBuilder};
pub use table::{Row, Table};
