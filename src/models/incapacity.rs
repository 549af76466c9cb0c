//! Incapacity benefit models.
//!
//! This module defines the input and result types for the permanent
//! labour incapacity (ILP) benefit calculation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The cause of the incapacity.
///
/// Only work accidents and occupational diseases attract the additional
/// 20% indemnity; commute accidents and other causes do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContingencyType {
    /// Accident at the workplace or while performing work.
    #[serde(rename = "accidente_trabajo")]
    WorkAccident,
    /// Disease listed as occupational.
    #[serde(rename = "enfermedad_profesional")]
    OccupationalDisease,
    /// Accident on the way to or from work (in itinere).
    #[serde(rename = "accidente_in_itinere")]
    CommuteAccident,
    /// Any other contingency.
    #[serde(rename = "otro")]
    Other,
}

impl ContingencyType {
    /// All contingency types, in wire order.
    pub const ALL: [ContingencyType; 4] = [
        ContingencyType::WorkAccident,
        ContingencyType::OccupationalDisease,
        ContingencyType::CommuteAccident,
        ContingencyType::Other,
    ];

    /// Returns the wire name of the contingency type.
    ///
    /// # Examples
    ///
    /// ```
    /// use compensation_engine::models::ContingencyType;
    ///
    /// assert_eq!(ContingencyType::CommuteAccident.as_str(), "accidente_in_itinere");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ContingencyType::WorkAccident => "accidente_trabajo",
            ContingencyType::OccupationalDisease => "enfermedad_profesional",
            ContingencyType::CommuteAccident => "accidente_in_itinere",
            ContingencyType::Other => "otro",
        }
    }

    /// Returns true if this contingency attracts the additional indemnity.
    pub fn qualifies_for_additional_indemnity(&self) -> bool {
        matches!(
            self,
            ContingencyType::WorkAccident | ContingencyType::OccupationalDisease
        )
    }
}

impl fmt::Display for ContingencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContingencyType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContingencyType::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                EngineError::invalid_input(
                    "tipoContingencia",
                    format!(
                        "unknown contingency type '{}' (expected one of: accidente_trabajo, \
                         enfermedad_profesional, accidente_in_itinere, otro)",
                        s
                    ),
                )
            })
    }
}

/// Input to the incapacity benefit calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncapacityInput {
    /// Monthly income basis (VIB).
    pub base_income: Decimal,
    /// Degree of permanent incapacity, 0 to 100.
    pub disability_percentage: Decimal,
    /// Age at the PMI (medical stabilization) date.
    pub age: Decimal,
    /// Cause of the incapacity.
    pub contingency_type: ContingencyType,
}

/// Result of the incapacity benefit calculation.
///
/// Amounts are computed with exact decimal arithmetic and serialized as
/// JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncapacityResult {
    /// Output of the core formula `53 × VIB × % × (65 / age)`.
    #[serde(rename = "prestacionBasica", with = "rust_decimal::serde::float")]
    pub basic_benefit: Decimal,
    /// Statutory floor scaled by the disability percentage.
    #[serde(rename = "pisoMinimo", with = "rust_decimal::serde::float")]
    pub minimum_floor: Decimal,
    /// Fixed bonus for the mid and high disability bands.
    #[serde(rename = "compensacionAdicional", with = "rust_decimal::serde::float")]
    pub additional_compensation: Decimal,
    /// 20% surcharge for work accidents and occupational diseases.
    #[serde(rename = "indemnizacionAdicional", with = "rust_decimal::serde::float")]
    pub additional_indemnity: Decimal,
    /// `max(basic, floor) + compensation + indemnity`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contingency_type_serializes_to_wire_names() {
        let json = serde_json::to_string(&ContingencyType::WorkAccident).unwrap();
        assert_eq!(json, "\"accidente_trabajo\"");

        let json = serde_json::to_string(&ContingencyType::CommuteAccident).unwrap();
        assert_eq!(json, "\"accidente_in_itinere\"");
    }

    #[test]
    fn test_contingency_type_from_str_roundtrips_every_variant() {
        for contingency in ContingencyType::ALL {
            assert_eq!(
                ContingencyType::from_str(contingency.as_str()).unwrap(),
                contingency
            );
        }
    }

    #[test]
    fn test_unknown_contingency_type_names_field() {
        let err = ContingencyType::from_str("accidente_domestico").unwrap_err();
        match err {
            EngineError::InvalidInput { field, message } => {
                assert_eq!(field, "tipoContingencia");
                assert!(message.contains("accidente_domestico"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_only_work_related_contingencies_qualify() {
        assert!(ContingencyType::WorkAccident.qualifies_for_additional_indemnity());
        assert!(ContingencyType::OccupationalDisease.qualifies_for_additional_indemnity());
        assert!(!ContingencyType::CommuteAccident.qualifies_for_additional_indemnity());
        assert!(!ContingencyType::Other.qualifies_for_additional_indemnity());
    }

    #[test]
    fn test_result_serializes_with_spanish_names_as_numbers() {
        let result = IncapacityResult {
            basic_benefit: Decimal::new(24_115_000, 0),
            minimum_floor: Decimal::new(389_894_519, 1),
            additional_compensation: Decimal::new(30_944_014, 0),
            additional_indemnity: Decimal::new(1_398_669_318, 2),
            total: Decimal::new(8_392_015_908, 2),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["prestacionBasica"].as_f64().unwrap(), 24_115_000.0);
        assert_eq!(value["pisoMinimo"].as_f64().unwrap(), 38_989_451.9);
        assert_eq!(value["total"].as_f64().unwrap(), 83_920_159.08);
    }
}
