//! Canonical chain → sub-chain → store hierarchy.
//!
//! Ownership is exclusive at each level: a `Chain` owns its `SubChain`s,
//! each of which owns its `Store`s. Aggregates (`total_stores`,
//! `store_count`, `cities`) are methods so they can never drift from the
//! data they summarize.

use serde::{Deserialize, Serialize};

use crate::items::StoreChain;

/// Physical address of a store, retained even when invalid so that
/// consumers can still display the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAddress {
    pub street: Option<String>,
    pub street_number: Option<String>,
    /// Full address line as published, cleaned.
    pub full_address: String,
    /// City in the feed's primary script (Hebrew), cleaned.
    pub city: String,
    /// City transliteration or secondary-script form, when published.
    pub city_latin: Option<String>,
    pub zip_code: Option<String>,
    /// Zip is 7 numeric digits and not the all-zero sentinel.
    pub is_valid_zip_code: bool,
    /// Address is non-empty after cleaning and not a placeholder artifact.
    pub is_valid_address: bool,
}

/// A single store within a sub-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: String,
    /// Matches the owning chain's id; stamped during normalization.
    pub chain_id: String,
    /// Matches the owning sub-chain's id; stamped during normalization.
    pub sub_chain_id: String,
    pub store_name: String,
    pub address: StoreAddress,
    /// Branding classification from a lexical scan of the store name.
    pub brand: StoreChain,
}

/// A sub-chain (banner) grouping stores under a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubChain {
    pub sub_chain_id: String,
    pub sub_chain_name: String,
    pub brand: StoreChain,
    pub stores: Vec<Store>,
}

impl SubChain {
    /// Number of stores in this sub-chain.
    #[must_use]
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Cities served by this sub-chain, deduplicated in order of first
    /// appearance. Empty city strings are skipped.
    #[must_use]
    pub fn cities(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for store in &self.stores {
            let city = store.address.city.as_str();
            if !city.is_empty() && !seen.contains(&city) {
                seen.push(city);
            }
        }
        seen
    }
}

/// A retail chain with its full sub-chain and store hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    pub chain_id: String,
    pub chain_name: String,
    pub brand: StoreChain,
    pub sub_chains: Vec<SubChain>,
}

impl Chain {
    /// Total stores across all sub-chains.
    #[must_use]
    pub fn total_stores(&self) -> usize {
        self.sub_chains.iter().map(SubChain::store_count).sum()
    }

    /// Union of all sub-chain cities, first-appearance order across the
    /// sub-chains in their stored order.
    #[must_use]
    pub fn cities(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for sub_chain in &self.sub_chains {
            for city in sub_chain.cities() {
                if !seen.contains(&city) {
                    seen.push(city);
                }
            }
        }
        seen
    }
}
