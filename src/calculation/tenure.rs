//! Tenure and seniority indemnity calculation.
//!
//! Tenure is measured with a 365.25-day year, and the seniority indemnity
//! (LCT art. 245) pays one salary per year of service, counting a leftover
//! fraction of three months or more as a full year.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::Tenure;

/// Length of a tenure year in days.
pub const TENURE_YEAR_DAYS: Decimal = Decimal::from_parts(36525, 0, 0, false, 2);

/// Leftover months at which a partial year counts as a full one.
pub const SENIORITY_ROUND_UP_MONTHS: u32 = 3;

/// Computes whole years and leftover months between two dates.
///
/// `tenureYears = days / 365.25`, `fullYears = floor(tenureYears)`,
/// `extraMonths = floor(fraction × 12)`. Dates out of order yield zero tenure.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::calculate_tenure;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let tenure = calculate_tenure(start, end);
/// assert_eq!(tenure.full_years, 2);
/// assert_eq!(tenure.extra_months, 0);
/// ```
pub fn calculate_tenure(start_date: NaiveDate, end_date: NaiveDate) -> Tenure {
    let days = Decimal::from((end_date - start_date).num_days().max(0));
    let tenure_years = days / TENURE_YEAR_DAYS;
    let full_years = tenure_years.floor();
    let extra_months = ((tenure_years - full_years) * Decimal::from(12)).floor();

    Tenure {
        full_years: full_years.to_u32().unwrap_or_default(),
        extra_months: extra_months.to_u32().unwrap_or_default(),
    }
}

/// Returns the number of salaries owed as seniority indemnity.
pub fn seniority_years(tenure: &Tenure) -> u32 {
    if tenure.extra_months >= SENIORITY_ROUND_UP_MONTHS {
        tenure.full_years + 1
    } else {
        tenure.full_years
    }
}

/// Computes the seniority indemnity: one salary per (rounded) year of service.
///
/// Returns `None` when the product does not fit in a [`Decimal`].
pub fn seniority_indemnity(salary: Decimal, tenure: &Tenure) -> Option<Decimal> {
    salary.checked_mul(Decimal::from(seniority_years(tenure)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_two_calendar_years_have_no_extra_months() {
        let tenure = calculate_tenure(date(2023, 1, 1), date(2025, 1, 1));
        assert_eq!(
            tenure,
            Tenure {
                full_years: 2,
                extra_months: 0
            }
        );
    }

    /// 822 days / 365.25 = 2.2505 years -> 3 extra months.
    #[test]
    fn test_822_days_reach_three_extra_months() {
        let tenure = calculate_tenure(date(2023, 1, 1), date(2025, 4, 2));
        assert_eq!(tenure.full_years, 2);
        assert_eq!(tenure.extra_months, 3);
    }

    /// 821 days / 365.25 = 2.2478 years -> only 2 extra months, even though
    /// the calendar says "2 years 3 months".
    #[test]
    fn test_calendar_two_years_three_months_is_two_extra_months() {
        let tenure = calculate_tenure(date(2023, 1, 1), date(2025, 4, 1));
        assert_eq!(tenure.full_years, 2);
        assert_eq!(tenure.extra_months, 2);
    }

    #[test]
    fn test_less_than_a_year() {
        let tenure = calculate_tenure(date(2024, 1, 1), date(2024, 3, 15));
        assert_eq!(tenure.full_years, 0);
        assert_eq!(tenure.extra_months, 2);
    }

    #[test]
    fn test_reversed_dates_yield_zero() {
        let tenure = calculate_tenure(date(2025, 1, 1), date(2024, 1, 1));
        assert_eq!(
            tenure,
            Tenure {
                full_years: 0,
                extra_months: 0
            }
        );
    }

    #[test]
    fn test_three_extra_months_round_up() {
        let tenure = Tenure {
            full_years: 2,
            extra_months: 3,
        };
        assert_eq!(seniority_years(&tenure), 3);
        assert_eq!(
            seniority_indemnity(Decimal::from(500_000), &tenure),
            Some(Decimal::from(1_500_000))
        );
    }

    #[test]
    fn test_two_extra_months_do_not_round_up() {
        let tenure = Tenure {
            full_years: 2,
            extra_months: 2,
        };
        assert_eq!(seniority_years(&tenure), 2);
        assert_eq!(
            seniority_indemnity(Decimal::from(500_000), &tenure),
            Some(Decimal::from(1_000_000))
        );
    }

    #[test]
    fn test_seniority_indemnity_overflow_is_none() {
        let tenure = Tenure {
            full_years: 40,
            extra_months: 0,
        };
        assert_eq!(seniority_indemnity(Decimal::MAX / Decimal::TEN, &tenure), None);
        assert_eq!(
            seniority_indemnity(Decimal::MAX, &Tenure { full_years: 1, extra_months: 0 }),
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn test_tenure_year_days_is_365_25() {
        assert_eq!(TENURE_YEAR_DAYS.to_string(), "365.25");
    }
}
