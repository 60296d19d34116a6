//! HTTP-backed contract deployer.
//!
//! Forwards deployment jobs to an external build-and-broadcast service. The
//! service compiles the submitted source, signs the deployment transaction
//! with its own funded key, broadcasts it over the job's RPC endpoint and
//! replies with the contract address and transaction hash.
//!
//! Flow:
//! - The orchestrator resolves a chain reference to a [`NetworkProfile`]
//! - This module packs source and network into a [`BuildJob`]
//! - The job is POSTed to the service's `/deploy` route
//! - The response is parsed into a [`DeploymentReceipt`]

use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::deployer::ContractDeployer;
use crate::network::NetworkProfile;
use crate::types::{ConstructorArg, ContractSource, DeploymentReceipt};

/// Base URL of the deployment service.
pub const ENV_DEPLOYER_URL: &str = "DEPLOYER_URL";

/// Request timeout towards the deployment service, in seconds.
pub const ENV_DEPLOYER_TIMEOUT_SECS: &str = "DEPLOYER_TIMEOUT_SECS";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8090";

// Compilation plus confirmation wait routinely exceeds a minute on congested
// testnets, so the default is generous.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the HTTP deployer
#[derive(Clone, Debug)]
pub struct HttpDeployerConfig {
    /// Base URL of the deployment service.
    /// Default: http://127.0.0.1:8090
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpDeployerConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var(ENV_DEPLOYER_URL)
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            timeout_secs: std::env::var(ENV_DEPLOYER_TIMEOUT_SECS)
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Client for forwarding deployment jobs to the deployment service
#[derive(Clone)]
pub struct HttpDeployer {
    client: Client,
    config: HttpDeployerConfig,
}

/// One deployment job on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildJob<'a> {
    pub contract_name: &'a str,
    pub source_code: &'a str,
    pub constructor_args: &'a [ConstructorArg],
    pub chain_id: u64,
    pub chain_name: &'a str,
    pub rpc_url: &'a str,
}

/// Error type for deployment service operations
#[derive(Debug, thiserror::Error)]
pub enum HttpDeployerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response from deployment service: {0}")]
    InvalidResponse(String),
}

impl HttpDeployer {
    /// Create a new deployer with configuration taken from the environment
    pub fn new() -> Self {
        Self::with_config(HttpDeployerConfig::default())
    }

    /// Create a new deployer with custom configuration
    pub fn with_config(config: HttpDeployerConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            endpoint = %config.endpoint,
            "HTTP deployer initialized"
        );

        Self { client, config }
    }

    /// Check if the deployment service is reachable
    pub async fn health_check(&self) -> Result<bool, HttpDeployerError> {
        let url = format!("{}/health", self.config.endpoint);
        debug!(url = %url, "Checking deployment service health");

        let response = self.client.get(&url).send().await?;

        if response.status().is_success() {
            Ok(true)
        } else {
            warn!(
                status = %response.status(),
                "Deployment service health check failed"
            );
            Ok(false)
        }
    }

    /// Submit one job and wait for its receipt
    async fn submit(&self, job: &BuildJob<'_>) -> Result<DeploymentReceipt, HttpDeployerError> {
        let url = format!("{}/deploy", self.config.endpoint);
        info!(
            url = %url,
            contract = %job.contract_name,
            chain_id = job.chain_id,
            "Forwarding deployment job"
        );

        let response = self.client.post(&url).json(job).send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        debug!(
            status = %status,
            body_len = response_text.len(),
            "Received response from deployment service"
        );

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                HttpDeployerError::InvalidResponse(format!(
                    "Failed to parse deployment receipt: {} - body: {}",
                    e, response_text
                ))
            })
        } else {
            let reason = rejection_reason(&response_text)
                .unwrap_or_else(|| format!("deployment service returned status {status}"));
            warn!(
                status = %status,
                reason = %reason,
                "Deployment service rejected job"
            );
            Err(HttpDeployerError::Rejected(reason))
        }
    }
}

impl Default for HttpDeployer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractDeployer for HttpDeployer {
    type Error = HttpDeployerError;

    async fn deploy(
        &self,
        contract: &ContractSource,
        network: &NetworkProfile,
    ) -> Result<DeploymentReceipt, Self::Error> {
        let job = BuildJob {
            contract_name: &contract.name,
            source_code: &contract.source_code,
            constructor_args: &contract.constructor_args,
            chain_id: network.id,
            chain_name: &network.name,
            rpc_url: &network.rpc_url,
        };
        self.submit(&job).await
    }
}

/// Extracts a human-readable reason from an error body: the `error` field of
/// a JSON object when present, otherwise the non-empty raw body.
fn rejection_reason(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
            return Some(error.to_string());
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
