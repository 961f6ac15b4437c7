//! AIME and PIA computation over an earnings history
//!
//! AIME averages the top 35 indexed years over 420 months; the PIA applies
//! the 90%/32%/15% bend-point brackets for the indexing year. The disability
//! variant shortens the averaging window to the computation years elapsed
//! since age 22, less dropout years.

use serde::{Deserialize, Serialize};

use crate::rules::{bend_points_for, round2, PIA_FACTORS};

use super::history::{EarningsHistory, EarningsRecord, IndexedEarning};

/// Top-of-career years averaged for a retirement PIA.
pub const RETIREMENT_COMPUTATION_YEARS: u32 = 35;

/// Dollar contribution of each PIA bracket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BracketBreakdown {
    pub first_bracket: f64,
    pub second_bracket: f64,
    pub third_bracket: f64,
}

/// AIME/PIA result with the years that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AimeAndPia {
    pub aime: f64,
    pub pia: f64,
    pub top_years: Vec<IndexedEarning>,
    pub zero_years_in_top: usize,
    pub lowest_year_in_top: f64,
    pub calculation_details: BracketBreakdown,
}

/// Before/after PIA figures for a what-if comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PiaSnapshot {
    pub aime: f64,
    pub pia: f64,
}

/// Benefit impact of an earnings change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WhatIfImpact {
    pub aime_change: f64,
    pub pia_change: f64,
    pub monthly_benefit_change: f64,
    pub annual_benefit_change: f64,
    pub lifetime_impact_25_years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfComparison {
    pub original: PiaSnapshot,
    pub modified: PiaSnapshot,
    pub impact: WhatIfImpact,
    pub analysis: AimeAndPia,
}

/// Disability PIA with the shortened computation window that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisabilityPia {
    pub onset_year: i32,
    pub indexing_year: i32,
    pub elapsed_years: u32,
    pub dropout_years: u32,
    pub computation_years: u32,
    pub result: AimeAndPia,
}

/// Retirement AIME and PIA. `None` for an empty history.
pub fn aime_and_pia(history: &EarningsHistory, indexing_year: i32) -> Option<AimeAndPia> {
    if history.is_empty() {
        return None;
    }
    let top = top_indexed_years(
        history,
        indexing_year,
        RETIREMENT_COMPUTATION_YEARS as usize,
    );
    Some(summarize(top, RETIREMENT_COMPUTATION_YEARS, indexing_year))
}

/// PIA impact of replacing the history with a modified earnings list.
pub fn what_if_scenario(
    history: &EarningsHistory,
    modified_records: Vec<EarningsRecord>,
    indexing_year: i32,
) -> Option<WhatIfComparison> {
    let original = aime_and_pia(history, indexing_year)?;
    let modified_history = EarningsHistory::new(modified_records);
    let analysis = aime_and_pia(&modified_history, indexing_year)?;

    let pia_change = round2(analysis.pia - original.pia);
    Some(WhatIfComparison {
        original: PiaSnapshot {
            aime: original.aime,
            pia: original.pia,
        },
        modified: PiaSnapshot {
            aime: analysis.aime,
            pia: analysis.pia,
        },
        impact: WhatIfImpact {
            aime_change: round2(analysis.aime - original.aime),
            pia_change,
            monthly_benefit_change: pia_change,
            annual_benefit_change: round2((analysis.pia - original.pia) * 12.0),
            lifetime_impact_25_years: round2((analysis.pia - original.pia) * 12.0 * 25.0),
        },
        analysis,
    })
}

/// Disability PIA: indexing frozen at onset − 2, averaging window equal to
/// the years elapsed from age 22 through the year before onset, less one
/// dropout year per five elapsed (at most five), never fewer than two.
pub fn disability_aime_and_pia(
    history: &EarningsHistory,
    birth_year: i32,
    onset_year: i32,
) -> Option<DisabilityPia> {
    if history.is_empty() {
        return None;
    }
    let indexing_year = onset_year - 2;
    let elapsed_years = (onset_year - birth_year - 22).max(0) as u32;
    let dropout_years = (elapsed_years / 5).min(5);
    let computation_years = (elapsed_years - dropout_years).max(2);

    let top = top_indexed_years(history, indexing_year, computation_years as usize);
    Some(DisabilityPia {
        onset_year,
        indexing_year,
        elapsed_years,
        dropout_years,
        computation_years,
        result: summarize(top, computation_years, indexing_year),
    })
}

fn top_indexed_years(
    history: &EarningsHistory,
    indexing_year: i32,
    count: usize,
) -> Vec<IndexedEarning> {
    let mut indexed = history.indexed_earnings(indexing_year);
    indexed.sort_by(|a, b| b.indexed_earnings.total_cmp(&a.indexed_earnings));
    indexed.truncate(count);
    indexed
}

fn summarize(top: Vec<IndexedEarning>, divisor_years: u32, indexing_year: i32) -> AimeAndPia {
    let total: f64 = top.iter().map(|year| year.indexed_earnings).sum();
    let aime = total / (f64::from(divisor_years) * 12.0);
    let (pia, calculation_details) = pia_from_aime(aime, indexing_year);

    AimeAndPia {
        aime: round2(aime),
        pia,
        zero_years_in_top: top.iter().filter(|year| year.is_zero).count(),
        lowest_year_in_top: top
            .iter()
            .map(|year| year.indexed_earnings)
            .fold(f64::INFINITY, f64::min),
        calculation_details,
        top_years: top,
    }
}

fn pia_from_aime(aime: f64, indexing_year: i32) -> (f64, BracketBreakdown) {
    let (first_bend, second_bend) = bend_points_for(indexing_year);
    let first = aime.min(first_bend) * PIA_FACTORS[0];
    let second = (aime - first_bend).clamp(0.0, second_bend - first_bend) * PIA_FACTORS[1];
    let third = (aime - second_bend).max(0.0) * PIA_FACTORS[2];

    let breakdown = BracketBreakdown {
        first_bracket: round2(first),
        second_bracket: round2(second),
        third_bracket: round2(third),
    };
    (round2(first + second + third), breakdown)
}
