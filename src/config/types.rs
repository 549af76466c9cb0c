//! Configuration types for the statutory amounts.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Built-in statutory floor for a 100% incapacity (Decree 669/19 update).
pub const DEFAULT_MINIMUM_FLOOR: i64 = 55_699_217;

/// Built-in additional compensation for incapacities strictly between 50% and 66%.
pub const DEFAULT_COMPENSATION_50_66: i64 = 24_755_211;

/// Built-in additional compensation for incapacities of 66% or more.
pub const DEFAULT_COMPENSATION_TOTAL: i64 = 30_944_014;

/// Metadata about the statutory regime the amounts belong to.
#[derive(Debug, Clone, Deserialize)]
pub struct RegimeMetadata {
    /// Short regime code (e.g., "LRT-26773").
    pub code: String,
    /// Human-readable name of the regime.
    pub name: String,
    /// Version label of the configuration.
    pub version: String,
    /// URL to the official regulation.
    pub source_url: String,
}

impl RegimeMetadata {
    /// Metadata describing the compiled-in defaults.
    pub fn builtin() -> Self {
        Self {
            code: "LRT-26773".to_string(),
            name: "Ley de Riesgos del Trabajo 24.557 / 26.773".to_string(),
            version: "builtin".to_string(),
            source_url: "https://www.argentina.gob.ar/normativa/nacional/ley-26773-203798"
                .to_string(),
        }
    }
}

/// The monetary constants used by the incapacity calculation.
///
/// These amounts are periodically updated by regulation, so they are
/// configuration rather than code. [`StatutoryAmounts::default`] returns
/// the compiled-in values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatutoryAmounts {
    /// Floor for a 100% incapacity; scaled by the disability percentage.
    pub minimum_floor: Decimal,
    /// Fixed compensation for incapacities in the open band (50%, 66%).
    pub compensation_50_66: Decimal,
    /// Fixed compensation for incapacities of 66% or more.
    pub compensation_total: Decimal,
}

impl Default for StatutoryAmounts {
    fn default() -> Self {
        Self {
            minimum_floor: Decimal::from(DEFAULT_MINIMUM_FLOOR),
            compensation_50_66: Decimal::from(DEFAULT_COMPENSATION_50_66),
            compensation_total: Decimal::from(DEFAULT_COMPENSATION_TOTAL),
        }
    }
}

/// An amounts file: statutory amounts effective from a given date.
#[derive(Debug, Clone, Deserialize)]
pub struct AmountsConfig {
    /// The date from which these amounts apply.
    pub effective_date: NaiveDate,
    /// The amounts themselves.
    pub amounts: StatutoryAmounts,
}

/// The complete regime configuration.
///
/// Amount sets are kept sorted oldest first.
#[derive(Debug, Clone)]
pub struct RegimeConfig {
    metadata: RegimeMetadata,
    amounts: Vec<AmountsConfig>,
}

impl RegimeConfig {
    /// Creates a new RegimeConfig, sorting amount sets by effective date.
    pub fn new(metadata: RegimeMetadata, amounts: Vec<AmountsConfig>) -> Self {
        let mut sorted = amounts;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            amounts: sorted,
        }
    }

    /// Returns the regime metadata.
    pub fn regime(&self) -> &RegimeMetadata {
        &self.metadata
    }

    /// Returns all amount sets, oldest first.
    pub fn amounts(&self) -> &[AmountsConfig] {
        &self.amounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_amounts_match_builtin_constants() {
        let amounts = StatutoryAmounts::default();
        assert_eq!(amounts.minimum_floor, Decimal::from(55_699_217));
        assert_eq!(amounts.compensation_50_66, Decimal::from(24_755_211));
        assert_eq!(amounts.compensation_total, Decimal::from(30_944_014));
    }

    #[test]
    fn test_regime_config_sorts_amounts_by_date() {
        let older = AmountsConfig {
            effective_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            amounts: StatutoryAmounts::default(),
        };
        let newer = AmountsConfig {
            effective_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            amounts: StatutoryAmounts::default(),
        };

        let config = RegimeConfig::new(RegimeMetadata::builtin(), vec![newer, older]);
        assert_eq!(
            config.amounts()[0].effective_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_amounts_config_parses_from_yaml() {
        let yaml = r#"
effective_date: 2024-09-01
amounts:
  minimum_floor: 55699217
  compensation_50_66: 24755211
  compensation_total: 30944014
"#;
        let config: AmountsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.amounts, StatutoryAmounts::default());
    }
}
