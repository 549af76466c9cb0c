//! Aggravating-factor surcharges on severance.
//!
//! Each of the twelve flags contributes independently to one of four named
//! subtotals. No flag excludes another; the only coupling is that articles
//! 8, 9 and 10 of Law 24.013 apply only together with the registration
//! intimation flag.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AggravatingBreakdown, AggravatingFactors};

/// Share of salary added per Law 24.013 article (8, 9, 10).
pub const REGISTRATION_ARTICLE_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Multiplier applied to seniority plus notice under Law 24.013 art. 15.
pub const ART15_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Share of the dismissal base added under Law 25.323 art. 2.
pub const PAYMENT_INTIMATION_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Salaries owed for undelivered work certificates (LCT art. 80).
pub const CERTIFICATES_SALARIES: u32 = 3;

/// Salaries owed for dismissal during pregnancy or maternity.
pub const PREGNANCY_SALARIES: u32 = 6;

/// Salaries owed for dismissal on grounds of marriage.
pub const MARRIAGE_SALARIES: u32 = 3;

/// Salaries owed to a union election candidate.
pub const CANDIDATE_SALARIES: u32 = 12;

/// Salaries owed to an elected union official.
pub const ELECTED_SALARIES: u32 = 24;

/// Severance components the surcharges are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggravatingBase {
    /// Monthly salary.
    pub salary: Decimal,
    /// Seniority indemnity.
    pub seniority_indemnity: Decimal,
    /// Payment in lieu of notice.
    pub notice_substitute: Decimal,
    /// Final month integration.
    pub month_integration: Decimal,
}

fn salary_too_large() -> EngineError {
    EngineError::value_too_large("salario")
}

fn salaries(salary: Decimal, count: u32) -> EngineResult<Decimal> {
    salary
        .checked_mul(Decimal::from(count))
        .ok_or_else(salary_too_large)
}

fn scaled(amount: Decimal, factor: Decimal) -> EngineResult<Decimal> {
    amount.checked_mul(factor).ok_or_else(salary_too_large)
}

fn add(subtotal: &mut Decimal, amount: Decimal) -> EngineResult<()> {
    *subtotal = subtotal.checked_add(amount).ok_or_else(salary_too_large)?;
    Ok(())
}

/// Computes the four aggravating subtotals for the active flags.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming `salario` when a subtotal, or
/// their sum, does not fit in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::{AggravatingBase, calculate_aggravating_factors};
/// use compensation_engine::models::AggravatingFactors;
/// use rust_decimal::Decimal;
///
/// let base = AggravatingBase {
///     salary: Decimal::from(100_000),
///     seniority_indemnity: Decimal::from(300_000),
///     notice_substitute: Decimal::from(100_000),
///     month_integration: Decimal::ZERO,
/// };
/// let flags = AggravatingFactors { marriage: true, ..Default::default() };
///
/// let breakdown = calculate_aggravating_factors(&flags, &base).unwrap();
/// assert_eq!(breakdown.aggravated_indemnities, Decimal::from(300_000));
/// assert_eq!(breakdown.unregistered_work, Decimal::ZERO);
/// ```
pub fn calculate_aggravating_factors(
    factors: &AggravatingFactors,
    base: &AggravatingBase,
) -> EngineResult<AggravatingBreakdown> {
    let salary = base.salary;
    let mut breakdown = AggravatingBreakdown::default();

    // Law 24.013 arts. 8-10 need the intimation to have been sent.
    if factors.registration_intimation {
        for article in [
            factors.unregistered_art8,
            factors.late_registration_art9,
            factors.underpaid_registration_art10,
        ] {
            if article {
                add(
                    &mut breakdown.unregistered_work,
                    scaled(salary, REGISTRATION_ARTICLE_RATE)?,
                )?;
            }
        }
    }
    if factors.dismissal_after_intimation_art15 {
        let doubled = base
            .seniority_indemnity
            .checked_add(base.notice_substitute)
            .ok_or_else(salary_too_large)?;
        add(
            &mut breakdown.unregistered_work,
            scaled(doubled, ART15_MULTIPLIER)?,
        )?;
    }
    if factors.defective_registration_law25323 {
        add(&mut breakdown.unregistered_work, base.seniority_indemnity)?;
    }

    if factors.payment_intimation {
        let fine_base = [base.notice_substitute, base.month_integration]
            .into_iter()
            .try_fold(base.seniority_indemnity, Decimal::checked_add)
            .ok_or_else(salary_too_large)?;
        add(
            &mut breakdown.other_infractions,
            scaled(fine_base, PAYMENT_INTIMATION_RATE)?,
        )?;
    }
    if factors.certificates_art80 {
        add(
            &mut breakdown.other_infractions,
            salaries(salary, CERTIFICATES_SALARIES)?,
        )?;
    }

    if factors.pregnancy_maternity {
        add(
            &mut breakdown.aggravated_indemnities,
            salaries(salary, PREGNANCY_SALARIES)?,
        )?;
    }
    if factors.marriage {
        add(
            &mut breakdown.aggravated_indemnities,
            salaries(salary, MARRIAGE_SALARIES)?,
        )?;
    }

    if factors.union_candidate {
        add(
            &mut breakdown.social_stability,
            salaries(salary, CANDIDATE_SALARIES)?,
        )?;
    }
    if factors.elected_official {
        add(
            &mut breakdown.social_stability,
            salaries(salary, ELECTED_SALARIES)?,
        )?;
    }

    breakdown.total().ok_or_else(salary_too_large)?;
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn base() -> AggravatingBase {
        AggravatingBase {
            salary: dec(500_000),
            seniority_indemnity: dec(1_000_000),
            notice_substitute: dec(500_000),
            month_integration: dec(200_000),
        }
    }

    #[test]
    fn test_no_flags_yield_zero_subtotals() {
        let breakdown =
            calculate_aggravating_factors(&AggravatingFactors::default(), &base()).unwrap();
        assert_eq!(breakdown, AggravatingBreakdown::default());
        assert_eq!(breakdown.total(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_registration_articles_require_intimation() {
        let flags = AggravatingFactors {
            unregistered_art8: true,
            late_registration_art9: true,
            underpaid_registration_art10: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.unregistered_work, Decimal::ZERO);
    }

    #[test]
    fn test_intimation_alone_adds_nothing() {
        let flags = AggravatingFactors {
            registration_intimation: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.unregistered_work, Decimal::ZERO);
    }

    #[test]
    fn test_each_registration_article_adds_a_quarter_salary() {
        let flags = AggravatingFactors {
            registration_intimation: true,
            unregistered_art8: true,
            late_registration_art9: true,
            underpaid_registration_art10: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.unregistered_work, dec(375_000));
    }

    #[test]
    fn test_art15_doubles_seniority_plus_notice() {
        let flags = AggravatingFactors {
            dismissal_after_intimation_art15: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.unregistered_work, dec(3_000_000));
    }

    #[test]
    fn test_law25323_adds_seniority_once() {
        let flags = AggravatingFactors {
            defective_registration_law25323: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.unregistered_work, dec(1_000_000));
    }

    #[test]
    fn test_art15_and_law25323_stack() {
        let flags = AggravatingFactors {
            dismissal_after_intimation_art15: true,
            defective_registration_law25323: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.unregistered_work, dec(4_000_000));
    }

    #[test]
    fn test_payment_intimation_is_half_of_dismissal_base() {
        let flags = AggravatingFactors {
            payment_intimation: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.other_infractions, dec(850_000));
    }

    #[test]
    fn test_certificates_add_three_salaries() {
        let flags = AggravatingFactors {
            certificates_art80: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.other_infractions, dec(1_500_000));
    }

    #[test]
    fn test_protected_dismissals() {
        let flags = AggravatingFactors {
            pregnancy_maternity: true,
            marriage: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.aggravated_indemnities, dec(4_500_000));
        assert_eq!(breakdown.social_stability, Decimal::ZERO);
    }

    #[test]
    fn test_union_stability() {
        let flags = AggravatingFactors {
            union_candidate: true,
            elected_official: true,
            ..Default::default()
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();
        assert_eq!(breakdown.social_stability, dec(18_000_000));
    }

    #[test]
    fn test_all_flags_sum_every_surcharge() {
        let flags = AggravatingFactors {
            registration_intimation: true,
            unregistered_art8: true,
            late_registration_art9: true,
            underpaid_registration_art10: true,
            dismissal_after_intimation_art15: true,
            defective_registration_law25323: true,
            payment_intimation: true,
            certificates_art80: true,
            pregnancy_maternity: true,
            marriage: true,
            union_candidate: true,
            elected_official: true,
        };
        let breakdown = calculate_aggravating_factors(&flags, &base()).unwrap();

        assert_eq!(breakdown.unregistered_work, dec(4_375_000));
        assert_eq!(breakdown.other_infractions, dec(2_350_000));
        assert_eq!(breakdown.aggravated_indemnities, dec(4_500_000));
        assert_eq!(breakdown.social_stability, dec(18_000_000));
    }

    #[test]
    fn test_union_stability_overflow_names_salary() {
        let huge = Decimal::MAX / Decimal::TEN;
        let flags = AggravatingFactors {
            elected_official: true,
            ..Default::default()
        };
        let err = calculate_aggravating_factors(
            &flags,
            &AggravatingBase {
                salary: huge,
                seniority_indemnity: huge,
                notice_substitute: huge,
                month_integration: Decimal::ZERO,
            },
        )
        .unwrap_err();

        assert!(matches!(err, EngineError::InvalidInput { ref field, .. } if field == "salario"));
    }

    #[test]
    fn test_subtotals_that_fit_alone_but_not_together_are_rejected() {
        let flags = AggravatingFactors {
            defective_registration_law25323: true,
            certificates_art80: true,
            ..Default::default()
        };
        let base = AggravatingBase {
            salary: Decimal::MAX / Decimal::from(9),
            seniority_indemnity: Decimal::MAX - Decimal::ONE,
            notice_substitute: Decimal::ZERO,
            month_integration: Decimal::ZERO,
        };

        assert!(calculate_aggravating_factors(&flags, &base).is_err());
    }
}
