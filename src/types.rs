//! Request, response and outcome types for the deployment API.
//!
//! All wire payloads are camelCase JSON. A deployment request names one
//! contract and any number of chain references; the response carries exactly
//! one [`DeploymentOutcome`] per requested chain, in request order.

use alloy::primitives::{Address, TxHash};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::network::NetworkProfile;

/// A single constructor argument.
///
/// Arguments are either plain strings or arrays of strings, so tuple and
/// array constructor parameters survive the trip through JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstructorArg {
    Value(String),
    List(Vec<String>),
}

/// Inbound deployment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    /// Contract name, as declared in the source.
    pub name: String,
    /// Chain references in the order outcomes are expected back. Free text;
    /// duplicates are deployed independently.
    pub chains: Vec<String>,
    /// Full contract source.
    pub source_code: String,
    /// Constructor arguments, empty when absent.
    #[serde(default)]
    pub constructor_args: Vec<ConstructorArg>,
}

/// The contract handed to a deployer: source plus constructor arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSource {
    pub name: String,
    pub source_code: String,
    pub constructor_args: Vec<ConstructorArg>,
}

impl From<&DeployRequest> for ContractSource {
    fn from(request: &DeployRequest) -> Self {
        Self {
            name: request.name.clone(),
            source_code: request.source_code.clone(),
            constructor_args: request.constructor_args.clone(),
        }
    }
}

/// On-chain coordinates of a completed deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentReceipt {
    pub address: Address,
    pub transaction_hash: TxHash,
}

/// Per-chain result of a deployment batch.
///
/// A failed attempt is data, not an error: one failing chain never turns the
/// whole batch into an HTTP failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DeploymentOutcome {
    Success {
        network: NetworkProfile,
        address: Address,
        transaction_hash: TxHash,
        explorer_link: Url,
    },
    Failure {
        /// The chain reference as the caller wrote it.
        chain_reference: String,
        reason: String,
    },
}

impl DeploymentOutcome {
    pub fn success(network: NetworkProfile, receipt: DeploymentReceipt) -> Self {
        let explorer_link = network.contract_link(&receipt.address);
        DeploymentOutcome::Success {
            network,
            address: receipt.address,
            transaction_hash: receipt.transaction_hash,
            explorer_link,
        }
    }

    pub fn failure(chain_reference: impl Into<String>, reason: impl Into<String>) -> Self {
        DeploymentOutcome::Failure {
            chain_reference: chain_reference.into(),
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeploymentOutcome::Success { .. })
    }
}

/// Response to a structurally valid deployment request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployResponse {
    pub contracts: Vec<DeploymentOutcome>,
}

/// Error payload for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
