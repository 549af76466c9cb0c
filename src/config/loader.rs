//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading statutory
//! amounts from YAML files, or falling back to the compiled-in defaults.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{AmountsConfig, RegimeConfig, RegimeMetadata, StatutoryAmounts};

/// Loads and provides access to the statutory amounts.
///
/// # Directory Structure
///
/// ```text
/// config/argentina/
/// ├── regime.yaml          # Regime metadata
/// └── amounts/
///     └── 2024-09-01.yaml  # Amounts effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use compensation_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/argentina").unwrap();
///
/// let latest = loader.amounts_for(None).unwrap();
/// println!("Floor: {}", latest.minimum_floor);
///
/// let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
/// let then = loader.amounts_for(Some(date)).unwrap();
/// println!("Floor on {}: {}", date, then.minimum_floor);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RegimeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if `regime.yaml` or the `amounts` directory is missing, if any
    /// file contains invalid YAML, or if no amount files are present.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<RegimeMetadata>(&path.join("regime.yaml"))?;
        let amounts = Self::load_amounts(&path.join("amounts"))?;

        Ok(Self {
            config: RegimeConfig::new(metadata, amounts),
        })
    }

    /// Returns a loader holding only the compiled-in default amounts.
    ///
    /// The defaults apply to every date.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::config::{ConfigLoader, StatutoryAmounts};
    ///
    /// let loader = ConfigLoader::builtin();
    /// assert_eq!(*loader.amounts_for(None).unwrap(), StatutoryAmounts::default());
    /// ```
    pub fn builtin() -> Self {
        Self::from_amounts(StatutoryAmounts::default())
    }

    /// Returns a loader holding a single set of amounts that applies to every date.
    pub fn from_amounts(amounts: StatutoryAmounts) -> Self {
        let amounts = AmountsConfig {
            effective_date: NaiveDate::MIN,
            amounts,
        };
        Self::from_config(RegimeConfig::new(RegimeMetadata::builtin(), vec![amounts]))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: RegimeConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every amounts file from the amounts directory.
    fn load_amounts(amounts_dir: &Path) -> EngineResult<Vec<AmountsConfig>> {
        let amounts_dir_str = amounts_dir.display().to_string();

        let entries = fs::read_dir(amounts_dir).map_err(|_| EngineError::ConfigNotFound {
            path: amounts_dir_str.clone(),
        })?;

        let mut amounts = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: amounts_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                amounts.push(Self::load_yaml::<AmountsConfig>(&path)?);
            }
        }

        if amounts.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no amount files found)", amounts_dir_str),
            });
        }

        Ok(amounts)
    }

    /// Returns the underlying regime configuration.
    pub fn config(&self) -> &RegimeConfig {
        &self.config
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        self.config.regime()
    }

    /// Gets the statutory amounts to use for a calculation.
    ///
    /// With a date, returns the most recent amounts effective on or before
    /// it; without one, returns the latest amounts.
    pub fn amounts_for(&self, date: Option<NaiveDate>) -> EngineResult<&StatutoryAmounts> {
        let amounts = self.config.amounts();

        let found = match date {
            Some(date) => amounts
                .iter()
                .rev()
                .find(|a| a.effective_date <= date)
                .ok_or(EngineError::RatesNotFound { date })?,
            None => amounts.last().ok_or_else(|| EngineError::ConfigNotFound {
                path: "no statutory amounts loaded".to_string(),
            })?,
        };

        Ok(&found.amounts)
    }
}
