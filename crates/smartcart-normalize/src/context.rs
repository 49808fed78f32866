//! Injected collaborators for the normalization pass.
//!
//! The pipeline is deterministic: it never reads the system clock and never
//! hard-wires a classifier or price source. Everything a normalizer needs
//! beyond the raw record rides in a [`NormalizeContext`], so the same input
//! and context always produce the same output.

use chrono::{DateTime, Utc};
use smartcart_core::{ChainRegistry, ProductCategory};

/// Assigns a product category from an item name.
///
/// Implemented by the calling system (e.g. an ML service wrapper); the core
/// only carries the result. Absence of a classifier leaves categories unset.
pub trait CategoryClassifier {
    fn classify(&self, name: &str) -> Option<ProductCategory>;
}

/// Resolves an item's base price, for promotion savings computation.
///
/// Implemented over the caller's item catalog. `None` means the price is
/// unknown there, in which case savings fields stay unset. Zero is a valid
/// savings value and must not stand in for "unknown".
pub trait ItemPriceLookup {
    fn price_for(&self, item_code: &str) -> Option<f64>;
}

/// Read-only collaborators shared by one normalization pass.
#[derive(Clone, Copy)]
pub struct NormalizeContext<'a> {
    /// The pass's notion of "now", used for `is_active` and as the fallback
    /// update timestamp. Injected so reruns are reproducible.
    pub now: DateTime<Utc>,
    pub classifier: Option<&'a dyn CategoryClassifier>,
    pub price_lookup: Option<&'a dyn ItemPriceLookup>,
    pub chains: Option<&'a ChainRegistry>,
}

impl<'a> NormalizeContext<'a> {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            classifier: None,
            price_lookup: None,
            chains: None,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: &'a dyn CategoryClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    #[must_use]
    pub fn with_price_lookup(mut self, price_lookup: &'a dyn ItemPriceLookup) -> Self {
        self.price_lookup = Some(price_lookup);
        self
    }

    #[must_use]
    pub fn with_chains(mut self, chains: &'a ChainRegistry) -> Self {
        self.chains = Some(chains);
        self
    }
}

impl std::fmt::Debug for NormalizeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizeContext")
            .field("now", &self.now)
            .field("classifier", &self.classifier.map(|_| "<injected>"))
            .field("price_lookup", &self.price_lookup.map(|_| "<injected>"))
            .field("chains", &self.chains.map(|_| "<injected>"))
            .finish()
    }
}
