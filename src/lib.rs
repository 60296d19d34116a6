//! Multi-chain smart contract deployment service.
//!
//! Omnideploy accepts a contract source and a list of free-text chain
//! references, resolves each reference against a validated network catalog
//! (forgiving typos and spelling variants), deploys to every referenced
//! network concurrently and reports one outcome per reference in request
//! order. A failing chain only ever fails its own slot.
//!
//! The crate is organized around two seams:
//!
//! - [`resolver::NetworkResolver`] turns chain references into
//!   [`network::NetworkProfile`]s and never fails.
//! - [`deployer::ContractDeployer`] is the capability that puts one contract
//!   onto one network; [`deployer_http::HttpDeployer`] implements it against
//!   an external build-and-broadcast service.
//!
//! [`orchestrator::DeploymentOrchestrator`] ties the two together, and
//! [`handlers`] exposes the result over HTTP.

pub mod deployer;
pub mod deployer_http;
pub mod handlers;
pub mod network;
pub mod openapi;
pub mod orchestrator;
pub mod resolver;
pub mod shutdown;
pub mod telemetry;
pub mod types;
