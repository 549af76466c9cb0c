//! Severance (dismissal without cause) calculation.
//!
//! Combines the seniority indemnity, notice substitute, final-month
//! proration, proportional SAC, untaken vacation, and the aggravating
//! surcharges into a single itemised result.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakdownLine, SeveranceInput, SeveranceResult};

use super::aggravating::{AggravatingBase, calculate_aggravating_factors};
use super::proration::{prorate_final_month, prorate_vacation, sac_on, semester_sac};
use super::tenure::{calculate_tenure, seniority_indemnity};

fn validate(input: &SeveranceInput) -> EngineResult<()> {
    if input.salary <= Decimal::ZERO {
        return Err(EngineError::invalid_input("salario", "must be greater than zero"));
    }
    if input.end_date <= input.start_date {
        return Err(EngineError::invalid_input(
            "fechaEgreso",
            format!(
                "must be after fechaIngreso ({} is not after {})",
                input.end_date, input.start_date
            ),
        ));
    }
    Ok(())
}

fn salary_too_large() -> EngineError {
    EngineError::value_too_large("salario")
}

fn checked_sum(amounts: &[Decimal]) -> EngineResult<Decimal> {
    amounts
        .iter()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
        .ok_or_else(salary_too_large)
}

fn line(concept: &str, amount: Decimal, description: impl Into<String>) -> BreakdownLine {
    BreakdownLine {
        concept: concept.to_string(),
        amount,
        description: description.into(),
    }
}

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Calculates the severance owed on termination.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming `salario` when the salary is
/// not positive or too large for the amounts derived from it, or
/// `fechaEgreso` when it is not after `fechaIngreso`.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::calculate_severance;
/// use compensation_engine::models::{AggravatingFactors, SeveranceInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = SeveranceInput {
///     salary: Decimal::from(500_000),
///     start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     notice_given: true,
///     aggravating_factors: AggravatingFactors::default(),
/// };
///
/// let result = calculate_severance(&input).unwrap();
/// assert_eq!(result.seniority_indemnity, Decimal::from(1_000_000));
/// assert_eq!(result.notice_substitute, Decimal::ZERO);
/// ```
pub fn calculate_severance(input: &SeveranceInput) -> EngineResult<SeveranceResult> {
    validate(input)?;

    let salary = input.salary;

    let tenure = calculate_tenure(input.start_date, input.end_date);
    let seniority_indemnity =
        seniority_indemnity(salary, &tenure).ok_or_else(salary_too_large)?;

    let notice_substitute = if input.notice_given {
        Decimal::ZERO
    } else {
        salary
    };
    let notice_sac = sac_on(notice_substitute);

    let final_month = prorate_final_month(salary, input.end_date)?;
    let semester = semester_sac(salary, input.end_date)?;
    let vacation = prorate_vacation(salary, input.end_date)?;

    let aggravating = calculate_aggravating_factors(
        &input.aggravating_factors,
        &AggravatingBase {
            salary,
            seniority_indemnity,
            notice_substitute,
            month_integration: final_month.month_integration,
        },
    )?;

    let total_sac = checked_sum(&[
        notice_sac,
        final_month.integration_sac,
        semester.amount,
        vacation.sac,
    ])?;

    let total = checked_sum(&[
        seniority_indemnity,
        notice_substitute,
        notice_sac,
        final_month.worked_days_pay,
        final_month.month_integration,
        final_month.integration_sac,
        semester.amount,
        vacation.pay,
        vacation.sac,
        aggravating.total().ok_or_else(salary_too_large)?,
    ])?;

    let mut breakdown = vec![
        line(
            "Antigüedad Art. 245",
            seniority_indemnity,
            format!(
                "{} y {} × salario",
                plural(tenure.full_years, "año", "años"),
                plural(tenure.extra_months, "mes", "meses")
            ),
        ),
        line(
            "Sustitutiva de Preaviso",
            notice_substitute,
            if input.notice_given {
                "Con preaviso (sin indemnización)"
            } else {
                "Sin preaviso (1 mes de salario)"
            },
        ),
        line("SAC Preaviso", notice_sac, "SAC sobre preaviso (1/12)"),
        line(
            "Días Trabajados del Mes",
            final_month.worked_days_pay,
            format!(
                "{} de {} días del mes de despido",
                final_month.worked_days, final_month.days_in_month
            ),
        ),
        line(
            "Integración Mes de Despido",
            final_month.month_integration,
            "Salario - días trabajados del mes",
        ),
        line(
            "SAC Integración Mes de Despido",
            final_month.integration_sac,
            "SAC sobre integración del mes (1/12)",
        ),
        line(
            "SAC Proporcional",
            semester.amount,
            format!(
                "SAC proporcional por {} de {} días del semestre",
                semester.days_worked, semester.total_days
            ),
        ),
        line(
            "Vacaciones No Gozadas",
            vacation.pay,
            format!(
                "{} días proporcionales de vacaciones",
                vacation.prorated_days.round_dp(2)
            ),
        ),
        line(
            "SAC Vacaciones No Gozadas",
            vacation.sac,
            "SAC sobre vacaciones no gozadas (1/12)",
        ),
    ];

    let aggravating_lines = [
        (
            "Agravantes - Trabajo No Registrado",
            aggravating.unregistered_work,
            "Ley 24.013 y 25.323 - Trabajo no registrado",
        ),
        (
            "Agravantes - Otras Infracciones",
            aggravating.other_infractions,
            "Ley 25.323 y 25.345 - Infracciones adicionales",
        ),
        (
            "Agravantes - Indemnizaciones Agravadas",
            aggravating.aggravated_indemnities,
            "Embarazo/Maternidad y Matrimonio",
        ),
        (
            "Agravantes - Estabilidad Social",
            aggravating.social_stability,
            "Postulante/Candidato y Electo",
        ),
    ];
    breakdown.extend(
        aggravating_lines
            .into_iter()
            .filter(|(_, amount, _)| *amount > Decimal::ZERO)
            .map(|(concept, amount, description)| line(concept, amount, description)),
    );

    Ok(SeveranceResult {
        seniority_indemnity,
        basic_indemnity: seniority_indemnity,
        notice_substitute,
        notice_sac,
        worked_days_pay: final_month.worked_days_pay,
        month_integration: final_month.month_integration,
        integration_sac: final_month.integration_sac,
        semester_sac: semester.amount,
        untaken_vacation_pay: vacation.pay,
        vacation_indemnity: vacation.pay,
        vacation_sac: vacation.sac,
        aggravating_factors: aggravating,
        total_sac,
        tenure,
        breakdown,
        total,
    })
}
