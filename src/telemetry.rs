//! Tracing setup and HTTP request telemetry.
//!
//! Logging is line-oriented through `tracing-subscriber`, filtered by the
//! `RUST_LOG` environment variable with an `info` default.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Process-wide telemetry configuration.
pub struct Telemetry {
    name: &'static str,
    version: &'static str,
}

impl Telemetry {
    pub fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Installs the global tracing subscriber. Call once, at startup.
    pub fn register(self) -> Self {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
        tracing::info!(
            name = self.name,
            version = self.version,
            "Telemetry initialized"
        );
        self
    }

    /// Request/response tracing layer for the HTTP server.
    pub fn http_tracing(&self) -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
        TraceLayer::new_for_http()
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new()
    }
}
