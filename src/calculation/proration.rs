//! Calendar proration of the final month, semester SAC, and vacation.
//!
//! Unlike tenure, these components use exact calendar day counts, so leap
//! years change the results.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Annual vacation entitlement in days.
pub const ANNUAL_VACATION_DAYS: u32 = 14;

/// Divisor turning a monthly salary into a vacation day's pay (LCT art. 155).
pub const VACATION_DAY_DIVISOR: u32 = 25;

/// Months over which the SAC (aguinaldo) accrues.
pub const SAC_MONTHS: u32 = 12;

/// Returns the SAC accrued on an amount (`amount / 12`).
pub fn sac_on(amount: Decimal) -> Decimal {
    amount / Decimal::from(SAC_MONTHS)
}

/// Counts days from `from` to `to`, both inclusive.
pub fn inclusive_days(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}

/// Returns the number of days in the month containing `date`.
///
/// Returns `None` only at the edge of chrono's supported calendar range.
pub fn days_in_month(date: NaiveDate) -> Option<u32> {
    let first = date.with_day(1)?;
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

fn out_of_range() -> EngineError {
    EngineError::invalid_input("fechaEgreso", "outside the supported calendar range")
}

fn salary_too_large() -> EngineError {
    EngineError::value_too_large("salario")
}

/// Returns the first and last day of the semester containing `date`.
///
/// January to June is the first semester; July to December the second.
pub fn semester_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let year = date.year();
    if date.month() >= 7 {
        Some((
            NaiveDate::from_ymd_opt(year, 7, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ))
    } else {
        Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 6, 30)?,
        ))
    }
}

/// The result of prorating the final month of employment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalMonthProration {
    /// Days worked in the final month (the termination day-of-month).
    pub worked_days: u32,
    /// Total days in the final month.
    pub days_in_month: u32,
    /// `salary / days_in_month × worked_days`.
    pub worked_days_pay: Decimal,
    /// `salary - worked_days_pay`.
    pub month_integration: Decimal,
    /// SAC on the month integration.
    pub integration_sac: Decimal,
}

/// Prorates the final month around the termination date.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::prorate_final_month;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let end = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
/// let result = prorate_final_month(Decimal::from(300_000), end).unwrap();
/// assert_eq!(result.worked_days_pay, Decimal::from(150_000));
/// assert_eq!(result.month_integration, Decimal::from(150_000));
/// ```
pub fn prorate_final_month(
    salary: Decimal,
    end_date: NaiveDate,
) -> EngineResult<FinalMonthProration> {
    let worked_days = end_date.day();
    let days_in_month = days_in_month(end_date).ok_or_else(out_of_range)?;

    let worked_days_pay = (salary / Decimal::from(days_in_month))
        .checked_mul(Decimal::from(worked_days))
        .ok_or_else(salary_too_large)?;
    let month_integration = salary
        .checked_sub(worked_days_pay)
        .ok_or_else(salary_too_large)?;

    Ok(FinalMonthProration {
        worked_days,
        days_in_month,
        worked_days_pay,
        month_integration,
        integration_sac: sac_on(month_integration),
    })
}

/// The proportional SAC for the semester containing the termination date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterSac {
    /// Days from semester start through the termination date, inclusive.
    pub days_worked: i64,
    /// Days in the semester, inclusive.
    pub total_days: i64,
    /// `(salary / 2) × days_worked / total_days`.
    pub amount: Decimal,
}

/// Computes the proportional semester SAC.
pub fn semester_sac(salary: Decimal, end_date: NaiveDate) -> EngineResult<SemesterSac> {
    let (start, end) = semester_bounds(end_date).ok_or_else(out_of_range)?;
    let days_worked = inclusive_days(start, end_date);
    let total_days = inclusive_days(start, end);

    let amount = (salary / Decimal::TWO)
        .checked_mul(Decimal::from(days_worked) / Decimal::from(total_days))
        .ok_or_else(salary_too_large)?;

    Ok(SemesterSac {
        days_worked,
        total_days,
        amount,
    })
}

/// Untaken proportional vacation for the termination year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationProration {
    /// Days from January 1 through the termination date, inclusive.
    pub days_worked: i64,
    /// Days in the termination year (365 or 366).
    pub days_in_year: i64,
    /// `14 × days_worked / days_in_year`.
    pub prorated_days: Decimal,
    /// `(salary / 25) × prorated_days`.
    pub pay: Decimal,
    /// SAC on the vacation pay.
    pub sac: Decimal,
}

/// Computes pay for untaken proportional vacation days.
pub fn prorate_vacation(salary: Decimal, end_date: NaiveDate) -> EngineResult<VacationProration> {
    let year = end_date.year();
    let year_start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(out_of_range)?;
    let year_end = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(out_of_range)?;

    let days_worked = inclusive_days(year_start, end_date);
    let days_in_year = inclusive_days(year_start, year_end);

    let prorated_days = Decimal::from(ANNUAL_VACATION_DAYS)
        * (Decimal::from(days_worked) / Decimal::from(days_in_year));
    let pay = (salary / Decimal::from(VACATION_DAY_DIVISOR))
        .checked_mul(prorated_days)
        .ok_or_else(salary_too_large)?;

    Ok(VacationProration {
        days_worked,
        days_in_year,
        prorated_days,
        pay,
        sac: sac_on(pay),
    })
}
