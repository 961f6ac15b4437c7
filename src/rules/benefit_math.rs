//! Pure claiming-adjustment math shared by every calculator
//!
//! All functions here are total and side-effect free:
//! - `months_from_fra` / `early_reduction_factor` / `drc_factor` price the
//!   filing-age adjustment against the Primary Insurance Amount
//! - `preclaim_cola_factor` models the statutory COLA freeze at ages 60-61
//! - `benefit_after_claim` compounds post-claim COLAs once per full year
//!
//! Nothing in this module rounds. Currency rounding happens once, in the
//! result structs that cross an output boundary.

use super::fra::{
    DELAYED_CREDIT_RATE, EARLY_REDUCTION_RATE_BEYOND_36, EARLY_REDUCTION_RATE_FIRST_36,
    SURVIVOR_MAX_REDUCTION, SURVIVOR_REDUCTION_RATE,
};

/// Whole months between FRA and the claim age. Positive when claiming after
/// FRA, negative when claiming early.
pub fn months_from_fra(claim_age_years: f64, fra_years: f64) -> i32 {
    ((claim_age_years - fra_years) * 12.0).round() as i32
}

/// Early-filing reduction multiplier, at most 1.0.
///
/// The first 36 months before FRA reduce at 5/9 of 1% per month, months
/// beyond that at 5/12 of 1% per month. Takes the signed months-from-FRA
/// value; non-negative input means no reduction.
pub fn early_reduction_factor(months_from_fra: i32) -> f64 {
    let months_early = f64::from(months_from_fra.min(0).unsigned_abs());
    let first_36 = months_early.min(36.0);
    let beyond_36 = (months_early - 36.0).max(0.0);
    let reduction =
        first_36 * EARLY_REDUCTION_RATE_FIRST_36 + beyond_36 * EARLY_REDUCTION_RATE_BEYOND_36;
    (1.0 - reduction).max(0.0)
}

/// Delayed-retirement-credit multiplier, at least 1.0. Simple
/// (non-compounding) accrual of 2/3 of 1% per month past FRA.
pub fn drc_factor(months_from_fra: i32) -> f64 {
    1.0 + DELAYED_CREDIT_RATE * f64::from(months_from_fra.max(0))
}

/// Survivor-benefit reduction multiplier for claiming before FRA.
///
/// Takes months early as a non-negative count. The reduction accrues at
/// 0.396% per month and caps at 28.5% total; survivors never use the
/// standard early-filing schedule.
pub fn survivor_reduction_factor(months_early: i32) -> f64 {
    let reduction = f64::from(months_early.max(0)) * SURVIVOR_REDUCTION_RATE;
    1.0 - reduction.min(SURVIVOR_MAX_REDUCTION)
}

/// Compounded COLA growth between the current age and the claim age, with
/// the statutory freeze window at ages 60 and 61.
///
/// Years before age 60 compound fractionally; ages 60-61 contribute no
/// growth; each whole year from 62 up to the claim age compounds again.
pub fn preclaim_cola_factor(claim_age_years: f64, current_age_years: f64, annual_rate: f64) -> f64 {
    let pre60_years = (claim_age_years.min(60.0) - current_age_years).max(0.0);
    let cola_years_from_62 = (claim_age_years.floor() as i32 - 62).max(0);
    (1.0 + annual_rate).powf(pre60_years) * (1.0 + annual_rate).powi(cola_years_from_62)
}

/// PIA carried forward to the claim age by pre-claim COLAs, before any
/// early-reduction or delayed-credit adjustment.
pub fn pia_at_claim_base(
    pia_at_fra: f64,
    claim_age_years: f64,
    current_age_years: f64,
    annual_rate: f64,
) -> f64 {
    pia_at_fra * preclaim_cola_factor(claim_age_years, current_age_years, annual_rate)
}

/// Monthly benefit at the moment of claiming: inflate the PIA to the claim
/// age, then apply delayed credits at or after FRA or the early reduction
/// before it.
pub fn monthly_benefit_at_claim(
    pia_at_fra: f64,
    claim_age_years: f64,
    current_age_years: f64,
    annual_rate: f64,
    fra_years: f64,
) -> f64 {
    let base = pia_at_claim_base(pia_at_fra, claim_age_years, current_age_years, annual_rate);
    let months = months_from_fra(claim_age_years, fra_years);
    if months >= 0 {
        base * drc_factor(months)
    } else {
        base * early_reduction_factor(months)
    }
}

/// Post-claim COLA: one compounding step per full year since claiming.
pub fn benefit_after_claim(monthly_at_claim: f64, years_after_claim: i32, annual_rate: f64) -> f64 {
    monthly_at_claim * (1.0 + annual_rate).powi(years_after_claim.max(0))
}

/// Round a currency amount to cents. Output-boundary use only.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round an age or year count to one decimal. Output-boundary use only.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
