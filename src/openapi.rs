//! OpenAPI/Swagger documentation for the deployment API.
//!
//! This module provides interactive API documentation via Swagger UI at `/docs`.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use axum::Router;

/// OpenAPI documentation for the deployment API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Omnideploy API",
        version = "0.1.0",
        description = r#"
Multi-chain smart contract deployment service.

## Overview

Omnideploy accepts a contract source and a list of chain references, resolves
each reference against its network catalog (tolerating typos and spelling
variants), deploys to every referenced network concurrently and reports one
outcome per reference. A failed deployment on one chain never aborts the
others.

## Chain references

References are free text. Resolution is case-insensitive and falls back to
the closest catalog name by edit distance, so `sepola`, `arbitrum-one` and
`POLYGON MAINNET` all land where you expect. An empty reference selects the
default network (Mantle Testnet).

## Core Endpoints

- `POST /deploy` - Deploy a contract to one or more networks
- `GET /networks` - List the network catalog
"#,
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Deploy", description = "Contract deployment"),
        (name = "Discovery", description = "Network catalog discovery"),
        (name = "Health", description = "Service health and status")
    ),
    paths(
        path_deploy_get,
        path_deploy_post,
        path_networks,
        path_version,
        path_health,
    )
)]
pub struct ApiDoc;

// ============================================================================
// Deploy Endpoints
// ============================================================================

#[utoipa::path(
    get,
    path = "/deploy",
    tag = "Deploy",
    summary = "Get deployment schema",
    description = "Returns the JSON schema for deployment requests.",
    responses(
        (status = 200, description = "Deployment schema", body = Object)
    )
)]
async fn path_deploy_get() {}

#[utoipa::path(
    post,
    path = "/deploy",
    tag = "Deploy",
    summary = "Deploy a contract to one or more networks",
    description = r#"
Deploys a contract concurrently to every chain referenced in the request.

**Per-chain isolation:** each chain gets its own deployment attempt; a chain
that fails reports a `failure` outcome in its slot while the others proceed.
The response always carries exactly one outcome per requested chain, in
request order.

**Request body:**
```json
{
  "name": "AppleToken",
  "chains": ["Sepolia", "mantle testnet", "arbitrum-one"],
  "sourceCode": "pragma solidity ^0.8.0; contract AppleToken { ... }",
  "constructorArgs": ["1000000"]
}
```
"#,
    request_body(content = Object, description = "Deployment request"),
    responses(
        (status = 200, description = "One outcome per requested chain", body = Object,
            example = json!({
                "contracts": [
                    {
                        "status": "success",
                        "network": {
                            "id": 11155111,
                            "name": "Sepolia",
                            "nativeCurrency": {"name": "Sepolia Ether", "symbol": "ETH", "decimals": 18},
                            "explorerUrl": "https://sepolia.etherscan.io/"
                        },
                        "address": "0x...",
                        "transactionHash": "0x...",
                        "explorerLink": "https://sepolia.etherscan.io/address/0x..."
                    },
                    {
                        "status": "failure",
                        "chainReference": "mantle testnet",
                        "reason": "deployment service returned status 502 Bad Gateway"
                    }
                ]
            })
        ),
        (status = 400, description = "Invalid request", body = Object,
            example = json!({
                "error": "contract name must not be empty"
            })
        )
    )
)]
async fn path_deploy_post() {}

// ============================================================================
// Discovery Endpoints
// ============================================================================

#[utoipa::path(
    get,
    path = "/networks",
    tag = "Discovery",
    summary = "List the network catalog",
    description = "Returns every deployable network with its chain id, RPC templates and explorers, plus the name of the default network.",
    responses(
        (status = 200, description = "Network catalog", body = Object)
    )
)]
async fn path_networks() {}

#[utoipa::path(
    get,
    path = "/version",
    tag = "Health",
    summary = "Service version",
    description = "Returns the running service version.",
    responses(
        (status = 200, description = "Version", body = Object,
            example = json!({
                "version": "0.1.0"
            })
        )
    )
)]
async fn path_version() {}

// ============================================================================
// Health Endpoints
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "Health check",
    description = "Returns the health status of the deployment service.",
    responses(
        (status = 200, description = "Service is healthy", body = Object,
            example = json!({
                "status": "healthy"
            })
        )
    )
)]
async fn path_health() {}

/// Create the Swagger UI router
pub fn swagger_routes() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
