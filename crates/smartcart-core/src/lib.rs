pub mod app_config;
pub mod chains;
pub mod config;
pub mod items;
pub mod promotions;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use chains::{ChainConfig, ChainRegistry, load_chains};
pub use config::{load_app_config, load_app_config_from_env};
pub use items::{GroceryItem, ItemType, ProductCategory, StandardUnit, StoreChain, UnitType};
pub use promotions::{Promotion, PromotionRestrictions, PromotionType};
pub use stores::{Chain, Store, StoreAddress, SubChain};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read chains file {path}: {source}")]
    ChainsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse chains file: {0}")]
    ChainsFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
