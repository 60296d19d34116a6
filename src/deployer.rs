//! Core trait defining the deployment capability boundary.
//!
//! Implementors of this trait own the entire journey of a single contract onto
//! a single network: compiling the source, signing the deployment transaction
//! and broadcasting it ([`ContractDeployer::deploy`]). The orchestrator treats
//! the capability as opaque and folds any error into a per-chain failure.

use std::fmt::{Debug, Display};
use std::future::Future;
use std::sync::Arc;

use crate::network::NetworkProfile;
use crate::types::{ContractSource, DeploymentReceipt};

/// Trait defining the asynchronous interface for contract deployers.
pub trait ContractDeployer {
    /// The error type returned by this deployer.
    type Error: Debug + Display;

    /// Deploys `contract` to the network described by `network`.
    ///
    /// # Returns
    ///
    /// A [`DeploymentReceipt`] with the contract address and the hash of the
    /// deployment transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if compilation, signing or broadcasting fails.
    fn deploy(
        &self,
        contract: &ContractSource,
        network: &NetworkProfile,
    ) -> impl Future<Output = Result<DeploymentReceipt, Self::Error>> + Send;
}

impl<T: ContractDeployer> ContractDeployer for Arc<T> {
    type Error = T::Error;

    fn deploy(
        &self,
        contract: &ContractSource,
        network: &NetworkProfile,
    ) -> impl Future<Output = Result<DeploymentReceipt, Self::Error>> + Send {
        self.as_ref().deploy(contract, network)
    }
}
