//! Store hierarchy normalization: a raw chain → sub-chain → store tree to
//! its canonical form.
//!
//! Chains never reject. Bad addresses and mismatched ids are retained and
//! flagged so downstream consumers can still display every store.

use smartcart_core::{Chain, Store, StoreAddress, StoreChain, SubChain};
use tracing::debug;

use crate::context::NormalizeContext;
use crate::outcome::{FieldRepair, Outcome};
use crate::raw::{RawChainRecord, RawStoreRecord, RawSubChainRecord};
use crate::text::{clean_text, is_corruption_sentinel, normalize_placeholder};

/// Required zip length: Israeli postal codes are 7 digits.
const ZIP_LENGTH: usize = 7;

/// A normalized chain together with its audit outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedChain {
    pub chain: Chain,
    pub outcome: Outcome,
}

/// Normalizes one raw chain tree, depth-first: chain, then each sub-chain,
/// then each store. Every store is stamped with its ancestors' ids.
#[must_use]
pub fn normalize_chain(raw: &RawChainRecord, ctx: &NormalizeContext<'_>) -> NormalizedChain {
    let mut repairs: Vec<FieldRepair> = Vec::new();

    let chain_id = clean_text(&raw.chain_id);
    let chain_name = clean_text(&raw.chain_name);

    let chain_brand = match ctx.chains {
        Some(registry) => {
            let by_id = registry.brand_for_chain_id(&chain_id);
            if by_id == StoreChain::Unknown {
                registry.brand_for_name(&chain_name)
            } else {
                by_id
            }
        }
        None => StoreChain::Unknown,
    };

    let sub_chains = raw
        .sub_chains
        .iter()
        .map(|sub| normalize_sub_chain(sub, &chain_id, chain_brand, ctx, &mut repairs))
        .collect();

    let chain = Chain {
        chain_id,
        chain_name,
        brand: chain_brand,
        sub_chains,
    };

    let outcome = Outcome::from_repairs(repairs);
    if let Outcome::Repaired(list) = &outcome {
        debug!(chain_id = %chain.chain_id, repairs = ?list, "chain repaired");
    }

    NormalizedChain { chain, outcome }
}

fn normalize_sub_chain(
    raw: &RawSubChainRecord,
    chain_id: &str,
    chain_brand: StoreChain,
    ctx: &NormalizeContext<'_>,
    repairs: &mut Vec<FieldRepair>,
) -> SubChain {
    let sub_chain_id = clean_text(&raw.sub_chain_id);
    let sub_chain_name = clean_text(&raw.sub_chain_name);

    // Branding extraction: the sub-chain's own name wins over the chain's
    // classification, since banners may carry a different brand.
    let brand = match ctx.chains.map(|r| r.brand_for_name(&sub_chain_name)) {
        Some(found) if found != StoreChain::Unknown => found,
        _ => chain_brand,
    };

    let stores = raw
        .stores
        .iter()
        .map(|store| normalize_store(store, chain_id, &sub_chain_id, brand, ctx, repairs))
        .collect();

    SubChain {
        sub_chain_id,
        sub_chain_name,
        brand,
        stores,
    }
}

fn normalize_store(
    raw: &RawStoreRecord,
    chain_id: &str,
    sub_chain_id: &str,
    sub_chain_brand: StoreChain,
    ctx: &NormalizeContext<'_>,
    repairs: &mut Vec<FieldRepair>,
) -> Store {
    let store_name = clean_text(&raw.store_name);

    // The stamped ancestor ids are authoritative; a record contradicting
    // them is repaired, not dropped.
    let raw_chain_id = clean_text(&raw.chain_id);
    if !raw_chain_id.is_empty() && raw_chain_id != chain_id {
        repairs.push(FieldRepair::StoreIdMismatch);
    }
    let raw_sub_chain_id = clean_text(&raw.sub_chain_id);
    if !raw_sub_chain_id.is_empty() && raw_sub_chain_id != sub_chain_id {
        repairs.push(FieldRepair::StoreIdMismatch);
    }

    let address = normalize_address(raw, repairs);

    let brand = match ctx.chains.map(|r| r.brand_for_name(&store_name)) {
        Some(found) if found != StoreChain::Unknown => found,
        _ => sub_chain_brand,
    };

    Store {
        store_id: clean_text(&raw.store_id),
        chain_id: chain_id.to_string(),
        sub_chain_id: sub_chain_id.to_string(),
        store_name,
        address,
        brand,
    }
}

fn normalize_address(raw: &RawStoreRecord, repairs: &mut Vec<FieldRepair>) -> StoreAddress {
    let full_address = clean_text(&raw.address);
    let is_valid_address = normalize_placeholder(&raw.address).is_some();
    if !is_valid_address {
        repairs.push(FieldRepair::AddressInvalid);
    }

    let zip = clean_text(&raw.zip_code);
    let is_valid_zip_code = zip.len() == ZIP_LENGTH
        && zip.chars().all(|c| c.is_ascii_digit())
        && !is_corruption_sentinel(&zip);
    if !is_valid_zip_code {
        repairs.push(FieldRepair::ZipCodeInvalid);
    }

    StoreAddress {
        street: normalize_placeholder(&raw.street),
        street_number: normalize_placeholder(&raw.street_number),
        full_address,
        city: clean_text(&raw.city),
        city_latin: normalize_placeholder(&raw.english_city),
        zip_code: if zip.is_empty() { None } else { Some(zip) },
        is_valid_zip_code,
        is_valid_address,
    }
}
