//! Deployment orchestration.
//!
//! A request names one contract and any number of chain references. The
//! orchestrator validates the request, spawns one deployment task per
//! reference and reassembles the outcomes in request order. Failures stay
//! where they happen: a task that errors or panics produces a failure outcome
//! in its own slot and never disturbs its siblings.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::deployer::ContractDeployer;
use crate::resolver::NetworkResolver;
use crate::types::{ContractSource, DeployRequest, DeploymentOutcome};

/// Reasons a request is rejected before any deployment is attempted.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("contract name must not be empty")]
    MissingContractName,

    #[error("contract source code must not be empty")]
    MissingSourceCode,
}

/// Fans deployment requests out across networks through a [`ContractDeployer`].
pub struct DeploymentOrchestrator<D> {
    resolver: NetworkResolver,
    deployer: Arc<D>,
}

impl<D> DeploymentOrchestrator<D>
where
    D: ContractDeployer + Send + Sync + 'static,
{
    pub fn new(resolver: NetworkResolver, deployer: D) -> Self {
        Self {
            resolver,
            deployer: Arc::new(deployer),
        }
    }

    pub fn resolver(&self) -> &NetworkResolver {
        &self.resolver
    }

    /// Deploys the requested contract to every referenced chain concurrently.
    ///
    /// Returns one outcome per reference, in request order; duplicates get
    /// independent deployments. An invalid request is rejected up front with
    /// a [`RequestError`] and reaches no deployer at all.
    #[instrument(skip_all, fields(contract = %request.name, chains = request.chains.len()))]
    pub async fn deploy(
        &self,
        request: &DeployRequest,
    ) -> Result<Vec<DeploymentOutcome>, RequestError> {
        validate(request)?;
        if request.chains.is_empty() {
            return Ok(Vec::new());
        }

        let contract = Arc::new(ContractSource::from(request));
        let mut handles = Vec::with_capacity(request.chains.len());
        for reference in &request.chains {
            let resolver = self.resolver.clone();
            let deployer = Arc::clone(&self.deployer);
            let contract = Arc::clone(&contract);
            let reference = reference.clone();
            handles.push(tokio::spawn(async move {
                attempt(resolver, deployer, contract, reference).await
            }));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, reference) in handles.into_iter().zip(&request.chains) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                // a panicked or cancelled task fails only its own slot
                Err(e) => {
                    warn!(chain = %reference, error = %e, "Deployment task aborted");
                    DeploymentOutcome::failure(reference, format!("deployment task aborted: {e}"))
                }
            };
            outcomes.push(outcome);
        }

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            succeeded,
            failed = outcomes.len() - succeeded,
            "Deployment batch finished"
        );
        Ok(outcomes)
    }
}

/// One deployment attempt. Resolution happens inside the spawned task so a
/// panic anywhere in the attempt surfaces as that slot's failure.
async fn attempt<D>(
    resolver: NetworkResolver,
    deployer: Arc<D>,
    contract: Arc<ContractSource>,
    reference: String,
) -> DeploymentOutcome
where
    D: ContractDeployer + Send + Sync + 'static,
{
    let network = resolver.resolve(&reference);
    info!(chain = %reference, network = %network.name, "Deploying contract");
    match deployer.deploy(&contract, &network).await {
        Ok(receipt) => {
            info!(
                network = %network.name,
                address = %receipt.address,
                tx = %receipt.transaction_hash,
                "Deployment succeeded"
            );
            DeploymentOutcome::success(network, receipt)
        }
        Err(e) => {
            warn!(
                chain = %reference,
                network = %network.name,
                error = %e,
                "Deployment failed"
            );
            DeploymentOutcome::failure(reference, e.to_string())
        }
    }
}

fn validate(request: &DeployRequest) -> Result<(), RequestError> {
    if request.name.is_empty() {
        return Err(RequestError::MissingContractName);
    }
    if request.source_code.is_empty() {
        return Err(RequestError::MissingSourceCode);
    }
    Ok(())
}
