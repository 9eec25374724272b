//! HTTP clients for the blood panel classifier and the structure prediction service.

use std::time::Duration;

use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use hemalyze_core::models::config::{AnalysisConfig, FoldingConfig};
use hemalyze_core::BloodPanel;

/// Diagnosis returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub success: bool,
    pub disease: String,
    pub cause: String,
    pub result_code: i64,
    pub input_values: BloodPanel,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the blood panel analysis service.
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(config: &AnalysisConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a complete panel and return the diagnosis.
    pub async fn analyze(&self, panel: &BloodPanel) -> anyhow::Result<AnalysisReport> {
        let url = format!("{}/api/analyze", self.base_url);
        info!("Sending blood panel to {}", url);

        let response = self
            .http
            .post(&url)
            .json(panel)
            .send()
            .await
            .with_context(|| format!("could not connect to analysis server at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "failed to analyze blood test".to_string());
            anyhow::bail!("analysis service returned {}: {}", status.as_u16(), message);
        }

        let report: AnalysisReport = response.json().await?;
        debug!("Analysis result code {} ({})", report.result_code, report.disease);
        Ok(report)
    }

    /// Whether the service answers its health endpoint.
    pub async fn health(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Health check failed: {}", e);
                false
            }
        }
    }
}

/// Client for the sequence-to-structure prediction service.
pub struct FoldClient {
    http: reqwest::Client,
    endpoint: String,
}

impl FoldClient {
    pub fn new(config: &FoldingConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Predict the structure of a cleaned sequence, returning PDB text.
    pub async fn predict(&self, sequence: &str) -> anyhow::Result<String> {
        info!("Requesting structure for {} residues", sequence.len());

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(sequence.to_string())
            .send()
            .await
            .with_context(|| format!("could not reach folding service at {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(
                "folding service error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            );
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn panel() -> BloodPanel {
        BloodPanel::from_values([6.2, 4.7, 13.5, 240.0, 58.0, 31.0, 7.0, 3.0, 1.0]).unwrap()
    }

    fn analysis_client(base_url: String) -> AnalysisClient {
        AnalysisClient::new(&AnalysisConfig {
            base_url,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/analyze")
                    .json_body(serde_json::to_value(panel()).unwrap());
                then.status(200).json_body(json!({
                    "success": true,
                    "disease": "Normal",
                    "cause": "- Normal \n",
                    "result_code": 13,
                    "input_values": serde_json::to_value(panel()).unwrap(),
                }));
            })
            .await;

        let report = analysis_client(server.base_url()).analyze(&panel()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(report.disease, "Normal");
        assert_eq!(report.result_code, 13);
        assert_eq!(report.input_values, panel());
    }

    #[tokio::test]
    async fn test_analyze_surfaces_service_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/analyze");
                then.status(400).json_body(json!({"error": "Missing required field: WBC"}));
            })
            .await;

        let err = analysis_client(server.base_url()).analyze(&panel()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "analysis service returned 400: Missing required field: WBC"
        );
    }

    #[tokio::test]
    async fn test_analyze_error_without_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/analyze");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let err = analysis_client(server.base_url()).analyze(&panel()).await.unwrap_err();
        assert!(err.to_string().contains("failed to analyze blood test"));
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200).json_body(json!({"status": "ok"}));
            })
            .await;

        assert!(analysis_client(server.base_url()).health().await);
        assert!(!analysis_client("http://127.0.0.1:1".to_string()).health().await);
    }

    #[tokio::test]
    async fn test_fold_predict() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/foldSequence/v1/pdb/")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body("MKTAYIAK");
                then.status(200).body("HEADER    PREDICTED\nEND\n");
            })
            .await;

        let client = FoldClient::new(&FoldingConfig {
            endpoint: server.url("/foldSequence/v1/pdb/"),
            timeout_secs: 5,
        })
        .unwrap();

        let pdb = client.predict("MKTAYIAK").await.unwrap();
        mock.assert_async().await;
        assert!(pdb.starts_with("HEADER"));
    }

    #[tokio::test]
    async fn test_fold_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/fold");
                then.status(503);
            })
            .await;

        let client = FoldClient::new(&FoldingConfig {
            endpoint: server.url("/fold"),
            timeout_secs: 5,
        })
        .unwrap();

        let err = client.predict("MKT").await.unwrap_err();
        assert_eq!(err.to_string(), "folding service error: 503 Service Unavailable");
    }
}
