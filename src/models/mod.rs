//! Core data models for the compensation engine.
//!
//! This module contains the inputs and results of both calculators.

mod incapacity;
mod severance;

pub use incapacity::{ContingencyType, IncapacityInput, IncapacityResult};
pub(crate) use severance::null_as_default;
pub use severance::{
    AggravatingBreakdown, AggravatingFactors, BreakdownLine, SeveranceInput, SeveranceResult,
    Tenure,
};
