//! SSDI-to-retirement comparison
//!
//! SSDI pays 100% of PIA regardless of age and converts to a retirement
//! benefit at FRA. The open question for a disabled beneficiary is whether
//! to suspend at FRA, forgo payments until 70, and restart with delayed
//! retirement credits. This module simulates both paths month by month.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::person::PersonBenefitProfile;
use crate::rules::{drc_factor, early_reduction_factor};

/// Reduced retirement benefit available today, for claimants already 62+.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlyRetirementOption {
    pub eligible: bool,
    pub monthly_amount: f64,
    pub reduction_percent: f64,
}

/// SSDI continuing as an unreduced retirement benefit at FRA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardPathOutcome {
    /// Monthly benefit at 70 in today's dollars
    pub monthly_at_70: f64,
    pub lifetime_total: f64,
}

/// Suspend at FRA, reinstate at 70 with the maximum delayed credits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspensionPathOutcome {
    /// Monthly benefit at 70 in today's dollars
    pub monthly_at_70: f64,
    pub lifetime_total: f64,
    /// First simulated age where the suspension path's cumulative income
    /// catches the standard path. None if it never does before longevity.
    pub break_even_age: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsdiStrategies {
    pub standard: StandardPathOutcome,
    pub suspension: SuspensionPathOutcome,
}

/// January monthly amount per path, one row per age year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsdiYearSnapshot {
    pub age: u32,
    pub standard_monthly: f64,
    pub suspension_monthly: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SsdiComparison {
    pub current_age: f64,
    pub fra_age: f64,
    pub ssdi_monthly_benefit: f64,
    pub early_retirement: EarlyRetirementOption,
    pub strategies: SsdiStrategies,
    pub timeline: Vec<SsdiYearSnapshot>,
}

/// Comparison calculator for an SSDI beneficiary.
#[derive(Debug, Clone)]
pub struct DisabilityCalculator {
    pub profile: PersonBenefitProfile,
    pub valuation_date: NaiveDate,
}

impl DisabilityCalculator {
    pub fn new(profile: PersonBenefitProfile) -> Self {
        Self::at_valuation_date(profile, Local::now().date_naive())
    }

    pub fn at_valuation_date(profile: PersonBenefitProfile, valuation_date: NaiveDate) -> Self {
        DisabilityCalculator {
            profile,
            valuation_date,
        }
    }

    /// Compare staying on the standard SSDI-to-retirement path against
    /// suspending at FRA and reinstating at 70.
    pub fn ssdi_comparison(&self, inflation_rate: f64, longevity_age: u32) -> SsdiComparison {
        let fra_numeric = self.profile.fra_as_years();
        let age_in_months = self.profile.age_in_months(self.valuation_date);
        let current_age_years = age_in_months / 12;
        let current_age_numeric = f64::from(age_in_months) / 12.0;

        let mut early_retirement = EarlyRetirementOption {
            eligible: false,
            monthly_amount: 0.0,
            reduction_percent: 0.0,
        };
        if current_age_numeric >= 62.0 {
            early_retirement.eligible = true;
            let months_offset = ((current_age_numeric - fra_numeric) * 12.0).round() as i32;
            if months_offset < 0 {
                let multiplier = early_reduction_factor(months_offset);
                early_retirement.monthly_amount = self.profile.pia * multiplier;
                early_retirement.reduction_percent = (1.0 - multiplier) * 100.0;
            } else {
                early_retirement.monthly_amount = self.profile.pia;
            }
        }

        let months_fra_to_70 = ((70.0 - fra_numeric) * 12.0).round() as i32;
        let max_drc_factor = drc_factor(months_fra_to_70);

        let mut cumulative_standard = 0.0;
        let mut cumulative_suspension = 0.0;
        let mut break_even_age = None;
        let mut timeline = Vec::new();

        for age in current_age_years..=longevity_age as i32 {
            let mut snapshot = SsdiYearSnapshot {
                age: age as u32,
                standard_monthly: 0.0,
                suspension_monthly: 0.0,
            };
            for month in 0..12 {
                let sim_age = f64::from(age) + f64::from(month) / 12.0;
                let years_from_now = sim_age - current_age_numeric;
                if years_from_now < 0.0 {
                    continue;
                }
                let inflation_factor = (1.0 + inflation_rate).powf(years_from_now);

                let standard_monthly = self.profile.pia * inflation_factor;
                let suspension_monthly = if sim_age < fra_numeric {
                    self.profile.pia * inflation_factor
                } else if sim_age >= 70.0 {
                    self.profile.pia * max_drc_factor * inflation_factor
                } else {
                    0.0
                };

                cumulative_standard += standard_monthly;
                cumulative_suspension += suspension_monthly;

                // The suspension path only gains ground after reinstatement
                if break_even_age.is_none()
                    && sim_age >= 70.0
                    && cumulative_suspension >= cumulative_standard
                {
                    break_even_age = Some(sim_age);
                }

                if month == 0 {
                    snapshot.standard_monthly = standard_monthly;
                    snapshot.suspension_monthly = suspension_monthly;
                }
            }
            timeline.push(snapshot);
        }

        SsdiComparison {
            current_age: current_age_numeric,
            fra_age: fra_numeric,
            ssdi_monthly_benefit: self.profile.pia,
            early_retirement,
            strategies: SsdiStrategies {
                standard: StandardPathOutcome {
                    monthly_at_70: self.profile.pia,
                    lifetime_total: cumulative_standard,
                },
                suspension: SuspensionPathOutcome {
                    monthly_at_70: self.profile.pia * max_drc_factor,
                    lifetime_total: cumulative_suspension,
                    break_even_age,
                },
            },
            timeline,
        }
    }
}
