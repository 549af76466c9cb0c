//! Calculation logic for the compensation engine.
//!
//! This module contains the two pure calculators, incapacity benefit and
//! severance, along with the tenure, calendar proration, and aggravating
//! factor helpers the severance calculation is built from. Nothing in here
//! performs I/O or logging.

mod aggravating;
mod incapacity;
mod proration;
mod severance;
mod tenure;

pub use aggravating::{
    ART15_MULTIPLIER, AggravatingBase, CANDIDATE_SALARIES, CERTIFICATES_SALARIES,
    ELECTED_SALARIES, MARRIAGE_SALARIES, PAYMENT_INTIMATION_RATE, PREGNANCY_SALARIES,
    REGISTRATION_ARTICLE_RATE, calculate_aggravating_factors,
};
pub use incapacity::{
    ADDITIONAL_INDEMNITY_RATE, BENEFIT_MULTIPLIER, MID_BAND_LOWER, REFERENCE_AGE,
    TOTAL_BAND_LOWER, additional_compensation, calculate_incapacity,
};
pub use proration::{
    ANNUAL_VACATION_DAYS, FinalMonthProration, SAC_MONTHS, SemesterSac, VACATION_DAY_DIVISOR,
    VacationProration, days_in_month, inclusive_days, prorate_final_month, prorate_vacation,
    sac_on, semester_bounds, semester_sac,
};
pub use severance::calculate_severance;
pub use tenure::{
    SENIORITY_ROUND_UP_MONTHS, TENURE_YEAR_DAYS, calculate_tenure, seniority_indemnity,
    seniority_years,
};
