//! HTTP endpoints of the deployment service.
//!
//! The protocol-critical endpoint is `POST /deploy`, which accepts a contract
//! and a list of chain references and replies with one outcome per reference.
//! The remaining endpoints (`/networks`, `/health`, `/version`, `/`) exist for
//! discoverability and operations.
//!
//! All payloads are JSON with camelCase keys, compatible with the JavaScript
//! client SDK.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, instrument};

use std::sync::Arc;

use crate::deployer::ContractDeployer;
use crate::network::DEFAULT_NETWORK;
use crate::orchestrator::{DeploymentOrchestrator, RequestError};
use crate::types::{DeployRequest, DeployResponse, ErrorResponse};

pub fn routes<D>() -> Router<Arc<DeploymentOrchestrator<D>>>
where
    D: ContractDeployer + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(get_root))
        .route("/deploy", get(get_deploy_info))
        .route("/deploy", post(post_deploy::<D>))
        .route("/networks", get(get_networks::<D>))
        .route("/health", get(get_health))
        .route("/version", get(get_version))
}

/// `GET /`: Returns a service banner with the available endpoints.
#[instrument(skip_all)]
pub async fn get_root() -> impl IntoResponse {
    Json(json!({
        "service": "omnideploy",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "deploy": "POST /deploy",
            "networks": "GET /networks",
            "health": "GET /health",
            "version": "GET /version",
            "docs": "GET /docs"
        }
    }))
}

/// `GET /deploy`: Returns a machine-readable description of the `/deploy`
/// endpoint.
///
/// This is optional metadata and primarily useful for discoverability and
/// debugging tools.
#[instrument(skip_all)]
pub async fn get_deploy_info() -> impl IntoResponse {
    Json(json!({
        "endpoint": "/deploy",
        "description": "POST to deploy a contract to one or more networks",
        "body": {
            "name": "string",
            "chains": ["chain reference"],
            "sourceCode": "string",
            "constructorArgs": ["string or string[]"]
        }
    }))
}

/// `POST /deploy`: Deploys a contract to every referenced chain.
///
/// Replies 200 with per-chain outcomes for any structurally valid request,
/// failed chains included. Replies 400 only when the request itself is
/// invalid, before any deployment is attempted.
#[instrument(skip_all)]
pub async fn post_deploy<D>(
    State(orchestrator): State<Arc<DeploymentOrchestrator<D>>>,
    Json(request): Json<DeployRequest>,
) -> impl IntoResponse
where
    D: ContractDeployer + Send + Sync + 'static,
{
    info!(
        contract = %request.name,
        chains = request.chains.len(),
        "Received deployment request"
    );
    match orchestrator.deploy(&request).await {
        Ok(contracts) => Json(DeployResponse { contracts }).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /networks`: Returns the catalog of deployable networks.
#[instrument(skip_all)]
pub async fn get_networks<D>(
    State(orchestrator): State<Arc<DeploymentOrchestrator<D>>>,
) -> impl IntoResponse
where
    D: ContractDeployer + Send + Sync + 'static,
{
    let catalog = orchestrator.resolver().catalog();
    Json(json!({
        "networks": catalog.entries(),
        "default": DEFAULT_NETWORK
    }))
}

/// `GET /health`: Health check endpoint for load balancers and monitoring.
#[instrument(skip_all)]
pub async fn get_health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy"
    }))
}

/// `GET /version`: Returns the current version of the service.
#[instrument(skip_all)]
pub async fn get_version() -> impl IntoResponse {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION")
    }))
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
