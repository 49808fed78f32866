//! Chain registry: maps feed chain ids and Hebrew brand markers to
//! [`StoreChain`] values.
//!
//! Loaded from a YAML file (`config/chains.yaml` by default) so new chains
//! can be onboarded without a code change.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::items::StoreChain;
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Official issuer code used in feed filenames and store records,
    /// e.g. `"7290058140886"`.
    pub chain_id: String,
    /// Display name.
    pub name: String,
    pub brand: StoreChain,
    /// Tokens scanned for in sub-chain and store names during branding
    /// extraction. Matching is case-insensitive substring containment.
    pub markers: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChainsFile {
    pub chains: Vec<ChainConfig>,
}

/// Validated, queryable set of chain configurations.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: Vec<ChainConfig>,
}

impl ChainRegistry {
    #[must_use]
    pub fn new(chains: Vec<ChainConfig>) -> Self {
        Self { chains }
    }

    #[must_use]
    pub fn chains(&self) -> &[ChainConfig] {
        &self.chains
    }

    /// Resolves a feed chain id to its brand. Unregistered ids are
    /// `Unknown`, never an error.
    #[must_use]
    pub fn brand_for_chain_id(&self, chain_id: &str) -> StoreChain {
        self.chains
            .iter()
            .find(|c| c.chain_id == chain_id.trim())
            .map_or(StoreChain::Unknown, |c| c.brand)
    }

    /// Lexically scans `name` for any registered marker token and returns
    /// the matching brand. Unmatched names are `Unknown`, never an error.
    #[must_use]
    pub fn brand_for_name(&self, name: &str) -> StoreChain {
        let lower = name.to_lowercase();
        for chain in &self.chains {
            if chain
                .markers
                .iter()
                .any(|marker| lower.contains(&marker.to_lowercase()))
            {
                return chain.brand;
            }
        }
        StoreChain::Unknown
    }

    /// Display name for a feed chain id, when registered.
    #[must_use]
    pub fn name_for_chain_id(&self, chain_id: &str) -> Option<&str> {
        self.chains
            .iter()
            .find(|c| c.chain_id == chain_id.trim())
            .map(|c| c.name.as_str())
    }
}

/// Load and validate the chain registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_chains(path: &Path) -> Result<ChainRegistry, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ChainsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let chains_file: ChainsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ChainsFileParse)?;

    validate_chains(&chains_file)?;

    Ok(ChainRegistry::new(chains_file.chains))
}

fn validate_chains(chains_file: &ChainsFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for chain in &chains_file.chains {
        if chain.chain_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "chain_id must be non-empty".to_string(),
            ));
        }

        if !chain.chain_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "chain_id '{}' must be numeric",
                chain.chain_id
            )));
        }

        if chain.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "chain '{}' has an empty name",
                chain.chain_id
            )));
        }

        if chain.markers.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "chain '{}' has an empty marker token",
                chain.name
            )));
        }

        if !seen_ids.insert(chain.chain_id.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate chain_id: '{}'",
                chain.chain_id
            )));
        }
    }

    Ok(())
}
