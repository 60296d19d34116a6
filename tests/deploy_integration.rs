//! Integration tests for deployment orchestration
//!
//! These tests drive the orchestrator with a mock deployer and verify
//! ordering, isolation and concurrency of the per-chain fan-out.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};

use omnideploy::deployer::ContractDeployer;
use omnideploy::network::{NetworkCatalog, NetworkProfile, DEFAULT_NETWORK};
use omnideploy::orchestrator::{DeploymentOrchestrator, RequestError};
use omnideploy::resolver::NetworkResolver;
use omnideploy::types::{ContractSource, DeployRequest, DeploymentOutcome, DeploymentReceipt};

/// Scriptable deployer: fails or panics on configured networks, sleeps on
/// slow ones, counts every call.
#[derive(Default)]
struct MockDeployer {
    calls: Arc<AtomicUsize>,
    fail: HashSet<String>,
    panic_on: HashSet<String>,
    slow: HashMap<String, Duration>,
}

impl ContractDeployer for MockDeployer {
    type Error = String;

    async fn deploy(
        &self,
        _contract: &ContractSource,
        network: &NetworkProfile,
    ) -> Result<DeploymentReceipt, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on.contains(&network.name) {
            panic!("deployer exploded on {}", network.name);
        }
        if let Some(delay) = self.slow.get(&network.name) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail.contains(&network.name) {
            return Err(format!("no funds on {}", network.name));
        }
        Ok(DeploymentReceipt {
            address: Address::repeat_byte(network.id as u8),
            transaction_hash: TxHash::repeat_byte(0xee),
        })
    }
}

fn orchestrator(deployer: MockDeployer) -> DeploymentOrchestrator<MockDeployer> {
    let resolver = NetworkResolver::new(NetworkCatalog::builtin(), "test-key");
    DeploymentOrchestrator::new(resolver, deployer)
}

fn request(chains: &[&str]) -> DeployRequest {
    DeployRequest {
        name: "AppleToken".to_string(),
        chains: chains.iter().map(|c| c.to_string()).collect(),
        source_code: "pragma solidity ^0.8.0; contract AppleToken {}".to_string(),
        constructor_args: Vec::new(),
    }
}

fn success_network(outcome: &DeploymentOutcome) -> &str {
    match outcome {
        DeploymentOutcome::Success { network, .. } => &network.name,
        DeploymentOutcome::Failure {
            chain_reference,
            reason,
        } => panic!("expected success, got failure for {chain_reference}: {reason}"),
    }
}

#[tokio::test]
async fn outcomes_come_back_in_request_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deployer = MockDeployer {
        calls: Arc::clone(&calls),
        // the first-requested chain finishes last
        slow: HashMap::from([("Sepolia".to_string(), Duration::from_millis(25))]),
        ..Default::default()
    };
    let orchestrator = orchestrator(deployer);

    let outcomes = orchestrator
        .deploy(&request(&["Sepolia", "Ethereum", "Sepolia", "Mantle Testnet"]))
        .await
        .expect("valid request");

    let networks: Vec<&str> = outcomes.iter().map(success_network).collect();
    assert_eq!(
        networks,
        vec!["Sepolia", "Ethereum", "Sepolia", "Mantle Testnet"]
    );
    // duplicate references get independent deployments
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn one_failing_chain_never_aborts_the_others() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deployer = MockDeployer {
        calls: Arc::clone(&calls),
        fail: HashSet::from(["Goerli".to_string()]),
        ..Default::default()
    };
    let orchestrator = orchestrator(deployer);

    let outcomes = orchestrator
        .deploy(&request(&["Sepolia", "Goerli", "Ethereum"]))
        .await
        .expect("valid request");

    assert_eq!(outcomes.len(), 3);
    assert_eq!(success_network(&outcomes[0]), "Sepolia");
    match &outcomes[1] {
        DeploymentOutcome::Failure {
            chain_reference,
            reason,
        } => {
            assert_eq!(chain_reference, "Goerli");
            assert!(reason.contains("no funds"), "reason: {reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(success_network(&outcomes[2]), "Ethereum");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn a_panicking_deployment_fails_only_its_slot() {
    let deployer = MockDeployer {
        panic_on: HashSet::from(["Goerli".to_string()]),
        ..Default::default()
    };
    let orchestrator = orchestrator(deployer);

    let outcomes = orchestrator
        .deploy(&request(&["Sepolia", "Goerli", "Ethereum"]))
        .await
        .expect("valid request");

    assert_eq!(outcomes.len(), 3);
    assert_eq!(success_network(&outcomes[0]), "Sepolia");
    match &outcomes[1] {
        DeploymentOutcome::Failure {
            chain_reference,
            reason,
        } => {
            assert_eq!(chain_reference, "Goerli");
            assert!(reason.contains("aborted"), "reason: {reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(success_network(&outcomes[2]), "Ethereum");
}

#[tokio::test]
async fn empty_chain_list_deploys_nothing() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deployer = MockDeployer {
        calls: Arc::clone(&calls),
        ..Default::default()
    };
    let orchestrator = orchestrator(deployer);

    let outcomes = orchestrator
        .deploy(&request(&[]))
        .await
        .expect("valid request");

    assert!(outcomes.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_requests_reach_no_deployer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deployer = MockDeployer {
        calls: Arc::clone(&calls),
        ..Default::default()
    };
    let orchestrator = orchestrator(deployer);

    let mut nameless = request(&["Sepolia"]);
    nameless.name = String::new();
    assert!(matches!(
        orchestrator.deploy(&nameless).await,
        Err(RequestError::MissingContractName)
    ));

    let mut sourceless = request(&["Sepolia"]);
    sourceless.source_code = String::new();
    assert!(matches!(
        orchestrator.deploy(&sourceless).await,
        Err(RequestError::MissingSourceCode)
    ));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn misspelled_references_deploy_to_the_nearest_network() {
    let calls = Arc::new(AtomicUsize::new(0));
    let deployer = MockDeployer {
        calls: Arc::clone(&calls),
        ..Default::default()
    };
    let orchestrator = orchestrator(deployer);

    let outcomes = orchestrator
        .deploy(&request(&["sepola", "Mantle Testnt", "zzz-unknown-zzz"]))
        .await
        .expect("valid request");

    assert_eq!(success_network(&outcomes[0]), "Sepolia");
    assert_eq!(success_network(&outcomes[1]), "Mantle Testnet");
    // junk still lands on some catalog network and gets a real attempt
    assert!(outcomes[2].is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn empty_reference_lands_on_the_default_network() {
    let deployer = MockDeployer::default();
    let orchestrator = orchestrator(deployer);

    let outcomes = orchestrator
        .deploy(&request(&[""]))
        .await
        .expect("valid request");

    assert_eq!(outcomes.len(), 1);
    assert_eq!(success_network(&outcomes[0]), DEFAULT_NETWORK);
}

#[tokio::test(start_paused = true)]
async fn deployments_run_concurrently() {
    let slow = HashMap::from([
        ("Sepolia".to_string(), Duration::from_millis(100)),
        ("Ethereum".to_string(), Duration::from_millis(100)),
        ("Goerli".to_string(), Duration::from_millis(100)),
        ("Mumbai".to_string(), Duration::from_millis(100)),
    ]);
    let deployer = MockDeployer {
        slow,
        ..Default::default()
    };
    let orchestrator = orchestrator(deployer);

    let started = tokio::time::Instant::now();
    let outcomes = orchestrator
        .deploy(&request(&["Sepolia", "Ethereum", "Goerli", "Mumbai"]))
        .await
        .expect("valid request");
    let elapsed = started.elapsed();

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes.iter().all(|o| o.is_success()));
    // four 100ms deployments in sequence would take 400ms of virtual time
    assert!(
        elapsed < Duration::from_millis(150),
        "deployments appear to have run sequentially: {elapsed:?}"
    );
}
