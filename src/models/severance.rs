//! Severance (termination indemnity) models.
//!
//! This module defines the input, aggravating-factor flags, and result
//! types for the severance calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as the type's default, the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The twelve independently togglable aggravating-factor flags.
///
/// Every flag defaults to `false`, so a request may omit the whole object
/// or any subset of its fields, or send any of them as `null`.
///
/// # Example
///
/// ```
/// use compensation_engine::models::AggravatingFactors;
///
/// let flags: AggravatingFactors = serde_json::from_str(r#"{"matrimonio": true}"#).unwrap();
/// assert!(flags.marriage);
/// assert!(!flags.elected_official);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AggravatingFactors {
    /// Registration intimation sent (Law 24.013); gates articles 8, 9 and 10.
    #[serde(rename = "ley24013_intimacion", deserialize_with = "null_as_default")]
    pub registration_intimation: bool,
    /// Law 24.013 art. 8: employment not registered at all.
    #[serde(rename = "ley24013_art8", deserialize_with = "null_as_default")]
    pub unregistered_art8: bool,
    /// Law 24.013 art. 9: registered with a later start date.
    #[serde(rename = "ley24013_art9", deserialize_with = "null_as_default")]
    pub late_registration_art9: bool,
    /// Law 24.013 art. 10: registered with a lower salary.
    #[serde(rename = "ley24013_art10", deserialize_with = "null_as_default")]
    pub underpaid_registration_art10: bool,
    /// Law 24.013 art. 15: dismissal within two years of the intimation.
    #[serde(rename = "ley24013_art15", deserialize_with = "null_as_default")]
    pub dismissal_after_intimation_art15: bool,
    /// Law 25.323 art. 1: unregistered or defectively registered employment.
    #[serde(rename = "ley25323_art1", deserialize_with = "null_as_default")]
    pub defective_registration_law25323: bool,
    /// Law 25.323 art. 2: indemnities not paid after intimation.
    #[serde(rename = "intimacionPago", deserialize_with = "null_as_default")]
    pub payment_intimation: bool,
    /// LCT art. 80: work certificates not delivered.
    #[serde(rename = "certificadosArt80", deserialize_with = "null_as_default")]
    pub certificates_art80: bool,
    /// Dismissal during pregnancy or maternity protection.
    #[serde(rename = "embarazoMaternidad", deserialize_with = "null_as_default")]
    pub pregnancy_maternity: bool,
    /// Dismissal on grounds of marriage.
    #[serde(rename = "matrimonio", deserialize_with = "null_as_default")]
    pub marriage: bool,
    /// Union election candidate.
    #[serde(rename = "postulanteCandidato", deserialize_with = "null_as_default")]
    pub union_candidate: bool,
    /// Elected union official.
    #[serde(rename = "electo", deserialize_with = "null_as_default")]
    pub elected_official: bool,
}

/// Input to the severance calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeveranceInput {
    /// Best normal and habitual monthly gross salary.
    pub salary: Decimal,
    /// First day of employment.
    pub start_date: NaiveDate,
    /// Termination date.
    pub end_date: NaiveDate,
    /// Whether statutory prior notice was given.
    pub notice_given: bool,
    /// Aggravating-factor flags.
    pub aggravating_factors: AggravatingFactors,
}

/// Aggravating surcharges grouped into their four named subtotals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggravatingBreakdown {
    /// Laws 24.013 and 25.323 surcharges for unregistered work.
    #[serde(rename = "trabajoNoRegistrado", with = "rust_decimal::serde::float")]
    pub unregistered_work: Decimal,
    /// Payment intimation fine and art. 80 certificates fine.
    #[serde(rename = "otrasInfracciones", with = "rust_decimal::serde::float")]
    pub other_infractions: Decimal,
    /// Pregnancy/maternity and marriage protections.
    #[serde(rename = "indemnizacionesAgravadas", with = "rust_decimal::serde::float")]
    pub aggravated_indemnities: Decimal,
    /// Union candidate and elected official stability.
    #[serde(rename = "estabilidadSocial", with = "rust_decimal::serde::float")]
    pub social_stability: Decimal,
}

impl AggravatingBreakdown {
    /// Sum of the four subtotals, or `None` if it does not fit in a [`Decimal`].
    pub fn total(&self) -> Option<Decimal> {
        [
            self.other_infractions,
            self.aggravated_indemnities,
            self.social_stability,
        ]
        .into_iter()
        .try_fold(self.unregistered_work, Decimal::checked_add)
    }
}

/// Completed years and leftover months of service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    /// Whole years of service.
    #[serde(rename = "anios")]
    pub full_years: u32,
    /// Whole months beyond the last full year (0 to 11).
    #[serde(rename = "meses")]
    pub extra_months: u32,
}

/// A single line in the itemised severance breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    /// Name of the component.
    #[serde(rename = "concepto")]
    pub concept: String,
    /// Amount of the component.
    #[serde(rename = "monto", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// How the amount was derived.
    #[serde(rename = "descripcion")]
    pub description: String,
}

/// Result of the severance calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceResult {
    /// Years-of-service indemnity (LCT art. 245).
    #[serde(rename = "indemnizacionAntiguedad", with = "rust_decimal::serde::float")]
    pub seniority_indemnity: Decimal,
    /// Basic indemnity; the same amount as `seniority_indemnity`, kept for
    /// clients that read it under this name. Not counted again in `total`.
    #[serde(rename = "indemnizacionBasica", with = "rust_decimal::serde::float")]
    pub basic_indemnity: Decimal,
    /// Payment in lieu of notice; zero when notice was given.
    #[serde(rename = "sustitutivaPreaviso", with = "rust_decimal::serde::float")]
    pub notice_substitute: Decimal,
    /// SAC accrued on the notice substitute.
    #[serde(rename = "sacPreaviso", with = "rust_decimal::serde::float")]
    pub notice_sac: Decimal,
    /// Pay for the days worked in the final month.
    #[serde(rename = "diasTrabajadosMes", with = "rust_decimal::serde::float")]
    pub worked_days_pay: Decimal,
    /// Pay for the remaining days of the final month.
    #[serde(rename = "integracionMesDespido", with = "rust_decimal::serde::float")]
    pub month_integration: Decimal,
    /// SAC accrued on the month integration.
    #[serde(rename = "sacIntegracionMes", with = "rust_decimal::serde::float")]
    pub integration_sac: Decimal,
    /// Proportional SAC for the semester containing the termination date.
    #[serde(rename = "sacProporcional", with = "rust_decimal::serde::float")]
    pub semester_sac: Decimal,
    /// Pay for proportional untaken vacation days.
    #[serde(rename = "vacacionesNoGozadas", with = "rust_decimal::serde::float")]
    pub untaken_vacation_pay: Decimal,
    /// Vacation indemnity; mirrors `untaken_vacation_pay` and is not counted
    /// again in `total`.
    #[serde(rename = "indemnizacionVacaciones", with = "rust_decimal::serde::float")]
    pub vacation_indemnity: Decimal,
    /// SAC accrued on the untaken vacation pay.
    #[serde(rename = "sacVacacionesNoGozadas", with = "rust_decimal::serde::float")]
    pub vacation_sac: Decimal,
    /// The four aggravating-factor subtotals.
    #[serde(rename = "agravantes")]
    pub aggravating_factors: AggravatingBreakdown,
    /// Sum of every SAC component.
    #[serde(rename = "indemnizacionSAC", with = "rust_decimal::serde::float")]
    pub total_sac: Decimal,
    /// Tenure used for the seniority indemnity.
    #[serde(rename = "antiguedad")]
    pub tenure: Tenure,
    /// Itemised breakdown of the total.
    #[serde(rename = "desglose")]
    pub breakdown: Vec<BreakdownLine>,
    /// Sum of every component and aggravating subtotal.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_default_to_false() {
        let flags: AggravatingFactors = serde_json::from_str("{}").unwrap();
        assert_eq!(flags, AggravatingFactors::default());
    }

    #[test]
    fn test_null_flags_default_to_false() {
        let flags: AggravatingFactors =
            serde_json::from_str(r#"{"matrimonio": null, "electo": true}"#).unwrap();
        assert!(!flags.marriage);
        assert!(flags.elected_official);
    }

    #[test]
    fn test_non_boolean_flag_is_rejected() {
        let err = serde_json::from_str::<AggravatingFactors>(r#"{"matrimonio": "si"}"#).unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));
    }

    #[test]
    fn test_flags_deserialize_from_wire_names() {
        let flags: AggravatingFactors = serde_json::from_str(
            r#"{
                "ley24013_intimacion": true,
                "ley24013_art8": true,
                "ley25323_art1": true,
                "intimacionPago": true,
                "matrimonio": true
            }"#,
        )
        .unwrap();

        assert!(flags.registration_intimation);
        assert!(flags.unregistered_art8);
        assert!(flags.defective_registration_law25323);
        assert!(flags.payment_intimation);
        assert!(flags.marriage);
        assert!(!flags.late_registration_art9);
        assert!(!flags.elected_official);
    }

    #[test]
    fn test_breakdown_total_sums_subtotals() {
        let breakdown = AggravatingBreakdown {
            unregistered_work: Decimal::new(125_000, 0),
            other_infractions: Decimal::new(1_500_000, 0),
            aggravated_indemnities: Decimal::new(3_000_000, 0),
            social_stability: Decimal::ZERO,
        };
        assert_eq!(breakdown.total(), Some(Decimal::new(4_625_000, 0)));
    }

    #[test]
    fn test_breakdown_total_overflow_is_none() {
        let breakdown = AggravatingBreakdown {
            unregistered_work: Decimal::MAX,
            social_stability: Decimal::ONE,
            ..Default::default()
        };
        assert_eq!(breakdown.total(), None);
    }

    #[test]
    fn test_tenure_serializes_as_anios_meses() {
        let tenure = Tenure {
            full_years: 2,
            extra_months: 3,
        };
        let value = serde_json::to_value(tenure).unwrap();
        assert_eq!(value["anios"], 2);
        assert_eq!(value["meses"], 3);
    }

    #[test]
    fn test_breakdown_line_serializes_amount_as_number() {
        let line = BreakdownLine {
            concept: "SAC Preaviso".to_string(),
            amount: Decimal::new(4_166_667, 2),
            description: "SAC sobre preaviso (1/12)".to_string(),
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["concepto"], "SAC Preaviso");
        assert_eq!(value["monto"].as_f64().unwrap(), 41_666.67);
    }
}
