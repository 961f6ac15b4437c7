//! Benefit timeline result structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which benefit stream a timeline entry pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitPhase {
    /// The claimant's own retirement benefit
    Own,
    /// Ex-spouse benefit for a divorced claimant
    ExSpouse,
    /// Survivor benefit for a widowed claimant
    Survivor,
    /// Child-in-care benefit, payable at any age with no reduction
    ChildInCare,
}

impl BenefitPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            BenefitPhase::Own => "own",
            BenefitPhase::ExSpouse => "ex_spouse",
            BenefitPhase::Survivor => "survivor",
            BenefitPhase::ChildInCare => "child_in_care",
        }
    }
}

/// One calendar year of payments within a benefit timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearEntry {
    /// Calendar year
    pub year: i32,
    /// Age when this year's payments start, one decimal
    pub age: f64,
    /// Monthly benefit in effect for the year, after COLAs
    pub monthly_benefit: f64,
    /// Months actually paid in this calendar year, 1 to 12
    pub months_paid: u32,
    /// `monthly_benefit` times `months_paid`
    pub annual_total: f64,
    /// Benefit stream paying this year
    pub phase: BenefitPhase,
}

/// A contiguous run of payments for a single benefit phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Year-by-year breakdown, in calendar order
    pub entries: Vec<YearEntry>,
    /// Sum of every payment in the segment
    pub total: f64,
    /// Monthly benefit in effect when the segment ends
    pub final_monthly: f64,
}

/// Lifetime own-benefit projection for one claiming decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifetimeBenefitResult {
    /// Every payment from claim to assumed death
    pub total_lifetime_benefits: f64,
    /// Monthly benefit in the first month of payments
    pub initial_monthly_benefit: f64,
    /// Monthly benefit in the last year of payments
    pub final_monthly_benefit: f64,
    /// Year-by-year payment schedule
    pub annual_breakdown: Vec<YearEntry>,
    /// Date benefits start
    pub claiming_date: NaiveDate,
    /// Assumed death date (longevity birthday)
    pub death_date: NaiveDate,
    /// Whole years of benefits collected
    pub years_of_benefits: i32,
}
