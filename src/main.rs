//! Deployment service HTTP entrypoint.
//!
//! This binary launches an Axum-based HTTP server that accepts smart contract
//! deployment requests and fans them out across EVM networks.
//!
//! Endpoints:
//! - `GET /deploy` – Deployment request schema
//! - `POST /deploy` – Deploy a contract to one or more networks
//! - `GET /networks` – List the network catalog
//! - `GET /health` – Health check
//! - `GET /version` – Service version
//! - `GET /docs` – Interactive API documentation
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `HOST`, `PORT` control binding address
//! - `INFURA_API_KEY` fills RPC URL templates
//! - `NETWORK_CATALOG` overrides the embedded network catalog
//! - `DEPLOYER_URL`, `DEPLOYER_TIMEOUT_SECS` locate the build service

use axum::http::Method;
use axum::Router;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors;

use omnideploy::deployer_http::HttpDeployer;
use omnideploy::handlers;
use omnideploy::openapi;
use omnideploy::orchestrator::DeploymentOrchestrator;
use omnideploy::resolver::NetworkResolver;
use omnideploy::shutdown::Shutdown;
use omnideploy::telemetry::Telemetry;

/// Initializes the deployment server.
///
/// - Loads `.env` variables.
/// - Initializes tracing.
/// - Loads and validates the network catalog.
/// - Starts an Axum HTTP server with the deployment handlers.
///
/// Binds to the address specified by the `HOST` and `PORT` env vars.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env variables
    dotenv().ok();

    let telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    // Abort if the catalog is unusable; every resolution depends on it
    let resolver = match NetworkResolver::from_env() {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!("Failed to load network catalog: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        networks = resolver.catalog().len(),
        "Network catalog loaded"
    );

    let deployer = HttpDeployer::new();
    match deployer.health_check().await {
        Ok(true) => tracing::info!("Deployment service reachable"),
        Ok(false) => tracing::warn!("Deployment service unhealthy, continuing anyway"),
        Err(e) => tracing::warn!("Deployment service unreachable: {}", e),
    }

    let orchestrator = Arc::new(DeploymentOrchestrator::new(resolver, deployer));

    let http_endpoints = Router::new()
        .merge(handlers::routes().with_state(orchestrator))
        .merge(openapi::swagger_routes())
        .layer(telemetry.http_tracing())
        .layer(
            cors::CorsLayer::new()
                .allow_origin(cors::Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(cors::Any),
        );

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::new(host.parse().expect("HOST must be a valid IP address"), port);
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        });

    let shutdown = Shutdown::try_new()?;
    let cancellation_token = shutdown.cancellation_token();
    let graceful_shutdown = async move { cancellation_token.cancelled().await };
    axum::serve(listener, http_endpoints)
        .with_graceful_shutdown(graceful_shutdown)
        .await?;

    Ok(())
}
