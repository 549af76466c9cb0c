//! Permanent labour incapacity (ILP) benefit calculation.
//!
//! Implements the lump-sum formula of Law 24.557 art. 14 as updated by
//! Law 26.773 and Decree 669/19: `53 × VIB × % × (65 / age)`, floored by
//! the statutory minimum, plus the band compensation and, for work-related
//! contingencies, the 20% additional indemnity of Law 26.773 art. 3.

use rust_decimal::Decimal;

use crate::config::StatutoryAmounts;
use crate::error::{EngineError, EngineResult};
use crate::models::{IncapacityInput, IncapacityResult};

/// Fixed multiplier of the benefit formula.
pub const BENEFIT_MULTIPLIER: Decimal = Decimal::from_parts(53, 0, 0, false, 0);

/// Reference age the claimant's age is compared against.
pub const REFERENCE_AGE: Decimal = Decimal::from_parts(65, 0, 0, false, 0);

/// Exclusive lower bound of the mid compensation band.
pub const MID_BAND_LOWER: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Inclusive lower bound of the total compensation band.
pub const TOTAL_BAND_LOWER: Decimal = Decimal::from_parts(66, 0, 0, false, 0);

/// Rate of the additional indemnity for work-related contingencies.
pub const ADDITIONAL_INDEMNITY_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// Returns the fixed band compensation for a disability percentage.
///
/// Strictly between 50 and 66 pays `compensation_50_66`; 66 and above pays
/// `compensation_total`; anything else (including exactly 50) pays nothing.
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::additional_compensation;
/// use compensation_engine::config::StatutoryAmounts;
/// use rust_decimal::Decimal;
///
/// let amounts = StatutoryAmounts::default();
/// assert_eq!(additional_compensation(Decimal::from(50), &amounts), Decimal::ZERO);
/// assert_eq!(additional_compensation(Decimal::from(66), &amounts), amounts.compensation_total);
/// ```
pub fn additional_compensation(disability_percentage: Decimal, amounts: &StatutoryAmounts) -> Decimal {
    if disability_percentage >= TOTAL_BAND_LOWER {
        amounts.compensation_total
    } else if disability_percentage > MID_BAND_LOWER {
        amounts.compensation_50_66
    } else {
        Decimal::ZERO
    }
}

fn validate(input: &IncapacityInput) -> EngineResult<()> {
    if input.base_income <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "ingresoBase",
            "must be greater than zero",
        ));
    }
    if input.disability_percentage < Decimal::ZERO
        || input.disability_percentage > Decimal::ONE_HUNDRED
    {
        return Err(EngineError::invalid_input(
            "porcentajeIncapacidad",
            "must be between 0 and 100",
        ));
    }
    if input.age <= Decimal::ZERO {
        return Err(EngineError::invalid_input("edad", "must be greater than zero"));
    }
    Ok(())
}

/// Calculates the incapacity benefit.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] naming `ingresoBase`,
/// `porcentajeIncapacidad` or `edad` when a value is out of range, including
/// an income or age that would push the benefit past the range of
/// [`Decimal`].
///
/// # Examples
///
/// ```
/// use compensation_engine::calculation::calculate_incapacity;
/// use compensation_engine::config::StatutoryAmounts;
/// use compensation_engine::models::{ContingencyType, IncapacityInput};
/// use rust_decimal::Decimal;
///
/// let input = IncapacityInput {
///     base_income: Decimal::from(500_000),
///     disability_percentage: Decimal::from(70),
///     age: Decimal::from(50),
///     contingency_type: ContingencyType::WorkAccident,
/// };
///
/// let result = calculate_incapacity(&input, &StatutoryAmounts::default()).unwrap();
/// assert_eq!(result.basic_benefit, Decimal::from(24_115_000));
/// assert_eq!(result.total, Decimal::new(8_392_015_908, 2));
/// ```
pub fn calculate_incapacity(
    input: &IncapacityInput,
    amounts: &StatutoryAmounts,
) -> EngineResult<IncapacityResult> {
    validate(input)?;

    let too_large = |field: &str| EngineError::value_too_large(field);
    let fraction = input.disability_percentage / Decimal::ONE_HUNDRED;

    let age_factor = REFERENCE_AGE
        .checked_div(input.age)
        .ok_or_else(|| too_large("edad"))?;
    let scaled_income = BENEFIT_MULTIPLIER
        .checked_mul(input.base_income)
        .map(|income| income * fraction)
        .ok_or_else(|| too_large("ingresoBase"))?;
    // Blame the age when it is what pushed the product past the limit.
    let basic_benefit = scaled_income.checked_mul(age_factor).ok_or_else(|| {
        too_large(if age_factor > Decimal::ONE { "edad" } else { "ingresoBase" })
    })?;

    let minimum_floor = amounts.minimum_floor * fraction;
    let additional_compensation = additional_compensation(input.disability_percentage, amounts);

    let base = basic_benefit
        .max(minimum_floor)
        .checked_add(additional_compensation)
        .ok_or_else(|| too_large("ingresoBase"))?;

    let additional_indemnity = if input.contingency_type.qualifies_for_additional_indemnity()
        && input.disability_percentage > Decimal::ZERO
    {
        base * ADDITIONAL_INDEMNITY_RATE
    } else {
        Decimal::ZERO
    };
    let total = base
        .checked_add(additional_indemnity)
        .ok_or_else(|| too_large("ingresoBase"))?;

    Ok(IncapacityResult {
        basic_benefit,
        minimum_floor,
        additional_compensation,
        additional_indemnity,
        total,
    })
}
