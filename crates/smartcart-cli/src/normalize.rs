//! The `normalize` command: feed XML files in, canonical entities and a
//! batch report out.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tracing::{info, warn};

use smartcart_core::AppConfig;
use smartcart_feed::{parse_price_feed, parse_promo_feed, parse_store_feed};
use smartcart_normalize::{
    run_chains, run_items, run_promotions, BatchReport, ItemPriceLookup, NormalizeContext,
};

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Price feed (PriceFull) XML file.
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Promotion feed (PromoFull) XML file.
    #[arg(long)]
    pub promotions: Option<PathBuf>,

    /// Store-hierarchy feed XML file.
    #[arg(long)]
    pub stores: Option<PathBuf>,

    /// Write the JSON run report here instead of stdout.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Per-feed batch reports for one run.
#[derive(Debug, Serialize)]
struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    items: Option<BatchReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    promotions: Option<BatchReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chains: Option<BatchReport>,
}

/// Price lookup over the catalog normalized earlier in the same run, so
/// promotion savings can be derived without a persistence layer.
struct CatalogLookup {
    prices: HashMap<String, f64>,
}

impl ItemPriceLookup for CatalogLookup {
    fn price_for(&self, item_code: &str) -> Option<f64> {
        self.prices.get(item_code).copied()
    }
}

pub fn run(args: &NormalizeArgs, config: &AppConfig) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.prices.is_some() || args.promotions.is_some() || args.stores.is_some(),
        "nothing to do: pass at least one of --prices, --promotions, --stores"
    );

    // A missing registry only costs branding classification; the run
    // continues without it.
    let registry = match smartcart_core::load_chains(&config.chains_path) {
        Ok(registry) => Some(registry),
        Err(err) => {
            warn!(error = %err, "chain registry unavailable; branding will be unknown");
            None
        }
    };

    let now = Utc::now();
    let mut ctx = NormalizeContext::new(now);
    if let Some(registry) = registry.as_ref() {
        ctx = ctx.with_chains(registry);
    }

    let mut report = RunReport {
        items: None,
        promotions: None,
        chains: None,
    };
    let mut catalog: Option<CatalogLookup> = None;

    if let Some(path) = &args.prices {
        let xml = std::fs::read_to_string(path)
            .with_context(|| format!("reading price feed {}", path.display()))?;
        let feed = parse_price_feed(&xml)?;
        let batch = run_items(&feed.items, &feed.store_id, &feed.chain_id, &ctx);

        catalog = Some(CatalogLookup {
            prices: batch
                .items
                .iter()
                .map(|n| (n.item.item_code.clone(), n.item.price))
                .collect(),
        });
        report.items = Some(batch.report);
    }

    if let Some(path) = &args.promotions {
        let xml = std::fs::read_to_string(path)
            .with_context(|| format!("reading promotion feed {}", path.display()))?;
        let feed = parse_promo_feed(&xml)?;

        let promo_ctx = match catalog.as_ref() {
            Some(lookup) => ctx.with_price_lookup(lookup),
            None => ctx,
        };
        let batch = run_promotions(&feed.promotions, &promo_ctx);
        report.promotions = Some(batch.report);
    }

    if let Some(path) = &args.stores {
        let xml = std::fs::read_to_string(path)
            .with_context(|| format!("reading store feed {}", path.display()))?;
        let chain = parse_store_feed(&xml)?;
        let batch = run_chains(std::slice::from_ref(&chain), &ctx);
        report.chains = Some(batch.report);
    }

    let json = serde_json::to_string_pretty(&report)?;
    match &args.report {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("writing report to {}", path.display()))?;
            info!(path = %path.display(), "run report written");
        }
        None => println!("{json}"),
    }

    enforce_rejection_policy(&report, config.max_rejection_rate)
}

/// The caller-side hard-failure policy: the pipeline never aborts a batch,
/// but a run whose rejection rate exceeds the configured ceiling fails here.
fn enforce_rejection_policy(report: &RunReport, max_rate: f64) -> anyhow::Result<()> {
    for (name, batch) in [
        ("items", report.items.as_ref()),
        ("promotions", report.promotions.as_ref()),
        ("chains", report.chains.as_ref()),
    ] {
        let Some(batch) = batch else { continue };
        let rate = batch.rejection_rate();
        if rate > max_rate {
            anyhow::bail!(
                "{name} rejection rate {rate:.2} exceeds the configured ceiling {max_rate:.2}"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcart_normalize::Rejection;

    fn report_with(rejected: usize, accepted: usize) -> BatchReport {
        BatchReport {
            accepted_count: accepted,
            repaired_count: 0,
            rejected_count: rejected,
            rejections: (0..rejected)
                .map(|i| Rejection {
                    record_id: format!("#{i}"),
                    reason: "test".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn policy_passes_under_ceiling() {
        let report = RunReport {
            items: Some(report_with(1, 9)),
            promotions: None,
            chains: None,
        };
        assert!(enforce_rejection_policy(&report, 0.25).is_ok());
    }

    #[test]
    fn policy_fails_over_ceiling() {
        let report = RunReport {
            items: Some(report_with(5, 5)),
            promotions: None,
            chains: None,
        };
        let err = enforce_rejection_policy(&report, 0.25).unwrap_err();
        assert!(err.to_string().contains("rejection rate"));
    }

    #[test]
    fn catalog_lookup_resolves_known_codes() {
        let lookup = CatalogLookup {
            prices: HashMap::from([("7290000000001".to_string(), 16.0)]),
        };
        assert_eq!(lookup.price_for("7290000000001"), Some(16.0));
        assert_eq!(lookup.price_for("missing"), None);
    }
}
