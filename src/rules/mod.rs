//! Statutory Social Security rules: FRA schedule, claiming adjustments,
//! COLA math, and the published wage-index tables

mod benefit_math;
mod fra;
mod wage_index;

pub use benefit_math::{
    benefit_after_claim, drc_factor, early_reduction_factor, monthly_benefit_at_claim,
    months_from_fra, pia_at_claim_base, preclaim_cola_factor, survivor_reduction_factor,
};
pub use fra::{
    full_retirement_age, full_retirement_age_months, restricted_application_allowed,
    DELAYED_CREDIT_RATE, EARLY_REDUCTION_RATE_BEYOND_36, EARLY_REDUCTION_RATE_FIRST_36,
    SURVIVOR_MAX_REDUCTION, SURVIVOR_REDUCTION_RATE,
};
pub use wage_index::{awi_for, bend_points_for, taxable_maximum_for, PIA_FACTORS};

pub(crate) use benefit_math::{round1, round2};
