//! Network catalog: the static registry of deployable networks.
//!
//! The catalog is loaded once at process start, validated, and then shared
//! read-only by every resolution call. Entries mirror the chainlist shape:
//! a unique name, a chain id, the native currency, an ordered list of RPC URL
//! templates and an ordered list of block explorers.

use alloy::primitives::Address;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Name of the catalog entry used when a reference is empty and as the
/// fallback of last resort.
pub const DEFAULT_NETWORK: &str = "Mantle Testnet";

/// Placeholder token inside RPC URL templates, replaced with the configured
/// provider API key when a profile is built.
pub const RPC_API_KEY_PLACEHOLDER: &str = "${INFURA_API_KEY}";

/// Optional path to a catalog JSON file overriding the embedded one.
pub const ENV_NETWORK_CATALOG: &str = "NETWORK_CATALOG";

const BUILTIN_CATALOG: &str = include_str!("../config/networks.json");

/// Native currency of a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A block explorer for a network. The first explorer of an entry is the
/// primary one and the source of contract links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerEntry {
    pub name: String,
    pub url: Url,
}

/// One network in the catalog.
///
/// Entries held by a [`NetworkCatalog`] are validated: they carry at least one
/// RPC template and at least one explorer, and their names and chain ids are
/// unique within the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    pub name: String,
    pub chain_id: u64,
    pub native_currency: NativeCurrency,
    pub rpc: Vec<String>,
    pub explorers: Vec<ExplorerEntry>,
}

impl NetworkEntry {
    /// Projects this entry into a [`NetworkProfile`], substituting the
    /// API-key placeholder in the primary RPC template.
    ///
    /// Only meaningful for entries of a validated [`NetworkCatalog`].
    pub fn profile(&self, rpc_api_key: &str) -> NetworkProfile {
        let rpc_url = self
            .rpc
            .first()
            .map(|template| template.replace(RPC_API_KEY_PLACEHOLDER, rpc_api_key))
            .unwrap_or_default();
        let explorer_url = self
            .explorers
            .first()
            .expect("validated catalog entries carry at least one explorer")
            .url
            .clone();
        NetworkProfile {
            id: self.chain_id,
            name: self.name.clone(),
            native_currency: self.native_currency.clone(),
            rpc_url,
            explorer_url,
        }
    }
}

/// A resolved, ready-to-use projection of a catalog entry.
///
/// Built fresh per resolution call; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub id: u64,
    pub name: String,
    pub native_currency: NativeCurrency,
    /// RPC endpoint with the API-key placeholder already substituted. May
    /// embed the provider key, so it never leaves the process over HTTP.
    #[serde(skip)]
    pub rpc_url: String,
    pub explorer_url: Url,
}

impl NetworkProfile {
    /// Explorer page of a deployed contract on this network.
    pub fn contract_link(&self, address: &Address) -> Url {
        let mut link = self.explorer_url.clone();
        if let Ok(mut segments) = link.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("address")
                .push(&address.to_string());
        }
        link
    }
}

/// Error type for catalog loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read network catalog from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse network catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("network catalog is empty")]
    Empty,

    #[error("duplicate network name in catalog: {0}")]
    DuplicateName(String),

    #[error("duplicate chain id in catalog: {0}")]
    DuplicateChainId(u64),

    #[error("network {0} has no RPC endpoints")]
    MissingRpc(String),

    #[error("network {0} has no explorers")]
    MissingExplorer(String),

    #[error("default network {0} is not in the catalog")]
    MissingDefault(&'static str),
}

/// The ordered, immutable set of networks this service can deploy to.
///
/// Iteration order is the declaration order of the source file and is the
/// documented tie-break for approximate name matching.
#[derive(Debug, Clone)]
pub struct NetworkCatalog {
    entries: Vec<NetworkEntry>,
    default_index: usize,
}

impl NetworkCatalog {
    /// Validates and wraps a list of entries.
    pub fn from_entries(entries: Vec<NetworkEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.rpc.is_empty() {
                return Err(CatalogError::MissingRpc(entry.name.clone()));
            }
            if entry.explorers.is_empty() {
                return Err(CatalogError::MissingExplorer(entry.name.clone()));
            }
            for other in &entries[..i] {
                if other.name.eq_ignore_ascii_case(&entry.name) {
                    return Err(CatalogError::DuplicateName(entry.name.clone()));
                }
                if other.chain_id == entry.chain_id {
                    return Err(CatalogError::DuplicateChainId(entry.chain_id));
                }
            }
        }
        let default_index = entries
            .iter()
            .position(|entry| entry.name.eq_ignore_ascii_case(DEFAULT_NETWORK))
            .ok_or(CatalogError::MissingDefault(DEFAULT_NETWORK))?;
        Ok(Self {
            entries,
            default_index,
        })
    }

    /// Parses a catalog from its JSON representation: an array of entries.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<NetworkEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Loads a catalog from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Loads the catalog named by `NETWORK_CATALOG`, or the embedded one.
    pub fn from_env() -> Result<Self, CatalogError> {
        match std::env::var(ENV_NETWORK_CATALOG) {
            Ok(path) => {
                tracing::info!(path = %path, "Loading network catalog override");
                Self::from_path(path)
            }
            Err(_) => Ok(Self::builtin()),
        }
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        static BUILTIN: Lazy<NetworkCatalog> = Lazy::new(|| {
            NetworkCatalog::from_json(BUILTIN_CATALOG)
                .expect("embedded network catalog is valid")
        });
        BUILTIN.clone()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[NetworkEntry] {
        &self.entries
    }

    /// The designated fallback entry.
    pub fn default_entry(&self) -> &NetworkEntry {
        &self.entries[self.default_index]
    }

    /// Case-insensitive lookup by exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&NetworkEntry> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
