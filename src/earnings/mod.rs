//! Earnings-history PIA engine: wage indexing, AIME, bend-point PIA, and
//! what-if impact analysis

mod history;
mod pia;

pub use history::{EarningsHistory, EarningsRecord, IndexedEarning};
pub use pia::{
    aime_and_pia, disability_aime_and_pia, what_if_scenario, AimeAndPia, BracketBreakdown,
    DisabilityPia, PiaSnapshot, WhatIfComparison, WhatIfImpact, RETIREMENT_COMPUTATION_YEARS,
};
