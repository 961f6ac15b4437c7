//! Year-by-year benefit timeline construction
//!
//! One builder serves every strategy family: own-benefit lifetimes,
//! survivor/own crossover phases, ex-spouse switching phases, and
//! child-in-care runs. Strategies that pay two streams in sequence call it
//! once per phase and concatenate the segments.

use chrono::{Datelike, Months, NaiveDate};

use crate::person::PersonBenefitProfile;
use crate::rules::{benefit_after_claim, round2};

use super::types::{BenefitPhase, TimelineSegment, YearEntry};

/// Count payable months in the half-open interval `[start, end)`.
///
/// Advances month by month with end-of-month clamping, so a start on the
/// 31st steps through shorter months on their last day. Zero when `start`
/// is not strictly before `end`.
pub fn months_in_period(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months = 0;
    let mut current = start;
    while current < end {
        months += 1;
        current = current + Months::new(1);
    }
    months
}

/// Build the yearly payment schedule for one benefit phase.
///
/// `end` is exclusive. The benefit starts at `initial_monthly` and takes
/// one COLA step at each January boundary after the start year, so the
/// partial first calendar year always pays the initial amount. Each entry
/// covers one calendar year with its own month count; the month the claim
/// starts in is paid in full.
pub fn build_benefit_timeline(
    profile: &PersonBenefitProfile,
    start: NaiveDate,
    end: NaiveDate,
    initial_monthly: f64,
    inflation_rate: f64,
    phase: BenefitPhase,
) -> TimelineSegment {
    let mut entries = Vec::new();
    let mut total = 0.0;
    let mut final_monthly = initial_monthly;

    let mut current = start;
    let mut years_after_claim = 0;

    while current < end {
        let current_benefit =
            benefit_after_claim(initial_monthly, years_after_claim, inflation_rate);
        final_monthly = current_benefit;

        let period_end = january_first(current.year() + 1).min(end);
        let months = months_in_period(current, period_end);

        if months > 0 {
            let year_total = current_benefit * f64::from(months);
            total += year_total;
            entries.push(YearEntry {
                year: current.year(),
                age: profile.age_at(current),
                monthly_benefit: round2(current_benefit),
                months_paid: months,
                annual_total: round2(year_total),
                phase,
            });
        }

        years_after_claim += 1;
        current = period_end;
    }

    TimelineSegment {
        total: round2(total),
        final_monthly: round2(final_monthly),
        entries,
    }
}

fn january_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("January 1st is a valid date")
}
