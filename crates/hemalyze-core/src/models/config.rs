//! Configuration structures for the extraction pipeline and remote services.

use serde::{Deserialize, Serialize};

/// Environment variable overriding the analysis service URL.
pub const API_URL_ENV: &str = "HEMALYZE_API_URL";

/// Main configuration for hemalyze.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemalyzeConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Blood panel analysis service.
    pub analysis: AnalysisConfig,

    /// Protein structure prediction service.
    pub folding: FoldingConfig,
}

/// How alias lookup resolves labels that match more than one alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasMatch {
    /// First alias in table order wins.
    #[default]
    TableOrder,
    /// Longer aliases are tried first, so specific labels win.
    LongestFirst,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Alias resolution order.
    pub alias_match: AliasMatch,
}

/// Analysis (classifier) service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Base URL of the service; `/api/analyze` and `/api/health` are appended.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Structure prediction service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldingConfig {
    /// Endpoint accepting a raw sequence and returning PDB text.
    pub endpoint: String,

    /// Request timeout in seconds. Folding long sequences is slow.
    pub timeout_secs: u64,
}

impl Default for FoldingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.esmatlas.com/foldSequence/v1/pdb/".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HemalyzeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Apply overrides from the environment.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.analysis.base_url = url.trim().to_string();
            }
        }
        self
    }
}
