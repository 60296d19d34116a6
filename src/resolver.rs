//! Chain reference resolution.
//!
//! Resolution is total: every reference maps to some catalog entry. Exact
//! case-insensitive name matches win outright; anything else falls back to
//! the entry with the smallest Levenshtein distance over normalized names,
//! with catalog order breaking ties. An empty reference selects the default
//! network.

use std::sync::Arc;

use strsim::levenshtein;
use tracing::debug;

use crate::network::{CatalogError, NetworkCatalog, NetworkEntry, NetworkProfile};

/// Provider API key substituted into RPC URL templates. Optional; without it
/// the placeholder is replaced with an empty string.
pub const ENV_RPC_API_KEY: &str = "INFURA_API_KEY";

/// Maps free-text chain references onto catalog entries.
///
/// Cheap to clone; the catalog is shared.
#[derive(Debug, Clone)]
pub struct NetworkResolver {
    catalog: Arc<NetworkCatalog>,
    rpc_api_key: String,
}

impl NetworkResolver {
    pub fn new(catalog: NetworkCatalog, rpc_api_key: impl Into<String>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            rpc_api_key: rpc_api_key.into(),
        }
    }

    /// Builds a resolver from the environment: catalog override through
    /// `NETWORK_CATALOG`, API key through `INFURA_API_KEY`.
    pub fn from_env() -> Result<Self, CatalogError> {
        let catalog = NetworkCatalog::from_env()?;
        let rpc_api_key = std::env::var(ENV_RPC_API_KEY).unwrap_or_default();
        Ok(Self::new(catalog, rpc_api_key))
    }

    pub fn catalog(&self) -> &NetworkCatalog {
        &self.catalog
    }

    /// Resolves a chain reference to a network profile.
    pub fn resolve(&self, reference: &str) -> NetworkProfile {
        let entry = if reference.is_empty() {
            self.catalog.default_entry()
        } else {
            self.catalog
                .find_by_name(reference)
                .unwrap_or_else(|| self.nearest_entry(reference))
        };
        debug!(reference, network = %entry.name, "Resolved chain reference");
        entry.profile(&self.rpc_api_key)
    }

    /// The entry whose normalized name has the smallest edit distance to the
    /// normalized reference. Earlier entries win ties.
    fn nearest_entry(&self, reference: &str) -> &NetworkEntry {
        let wanted = normalize(reference);
        let mut best: Option<(&NetworkEntry, usize)> = None;
        for entry in self.catalog.entries() {
            let distance = levenshtein(&wanted, &normalize(&entry.name));
            if best.is_none_or(|(_, current)| distance < current) {
                best = Some((entry, distance));
            }
        }
        match best {
            Some((entry, _)) => entry,
            // catalogs are validated non-empty
            None => self.catalog.default_entry(),
        }
    }
}

/// Lowercases and strips `-` and `_` so spelling variants of the same name
/// compare equal. Whitespace stays significant.
fn normalize(reference: &str) -> String {
    reference.to_lowercase().replace('-', "").replace('_', "")
}

// ============================================================================
// Tests
// ============================================================================
