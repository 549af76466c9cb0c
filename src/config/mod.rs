//! Configuration loading and management for the compensation engine.
//!
//! This module loads the periodically-updated statutory amounts from YAML
//! files, and exposes the compiled-in defaults when no files are given.
//!
//! # Example
//!
//! ```no_run
//! use compensation_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/argentina").unwrap();
//! println!("Loaded regime: {}", config.regime().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AmountsConfig, DEFAULT_COMPENSATION_50_66, DEFAULT_COMPENSATION_TOTAL, DEFAULT_MINIMUM_FLOOR,
    RegimeConfig, RegimeMetadata, StatutoryAmounts,
};
