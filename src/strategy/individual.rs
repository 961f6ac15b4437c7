//! Own-benefit calculator for a single claimant
//!
//! Holds a [`PersonBenefitProfile`] plus the valuation date every
//! current-age-dependent calculation is anchored to. The relationship
//! calculators (divorced, widowed, household, disability) each hold one of
//! these per person and delegate the own-benefit math here.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::person::{months_between, ClaimingScenario, PersonBenefitProfile};
use crate::rules::{drc_factor, early_reduction_factor, monthly_benefit_at_claim, round2};
use crate::timeline::{build_benefit_timeline, BenefitPhase, LifetimeBenefitResult};

/// Lifetime value of delaying a claim by exactly one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitOneMonthAnalysis {
    /// Monthly benefit claiming at the current age
    pub current_monthly_benefit: f64,
    /// Monthly benefit claiming one month later
    pub next_month_benefit: f64,
    pub monthly_increase: f64,
    pub annual_increase: f64,
    /// Change in total lifetime benefits from waiting the extra month
    pub lifetime_value_of_waiting: f64,
    pub recommendation: String,
}

/// Own-benefit calculator: claiming adjustments, COLA growth, and lifetime
/// projections for one person.
#[derive(Debug, Clone)]
pub struct IndividualCalculator {
    pub profile: PersonBenefitProfile,
    /// The date "today" is evaluated at. Fixed at construction so repeated
    /// runs over the same inputs reproduce exactly.
    pub valuation_date: NaiveDate,
}

impl IndividualCalculator {
    /// Calculator valued as of today.
    pub fn new(profile: PersonBenefitProfile) -> Self {
        Self::at_valuation_date(profile, Local::now().date_naive())
    }

    /// Calculator valued at an explicit date.
    pub fn at_valuation_date(profile: PersonBenefitProfile, valuation_date: NaiveDate) -> Self {
        IndividualCalculator {
            profile,
            valuation_date,
        }
    }

    /// Early-filing reduction factor for a claiming date. 1.0 at or after
    /// FRA.
    pub fn reduction_factor(&self, claiming_date: NaiveDate) -> f64 {
        if claiming_date >= self.profile.fra_date {
            return 1.0;
        }
        let months_early = months_between(claiming_date, self.profile.fra_date);
        early_reduction_factor(-months_early)
    }

    /// Delayed-credit factor for a claiming date. 1.0 at or before FRA;
    /// credits stop accruing at age 70.
    pub fn delayed_credit_factor(&self, claiming_date: NaiveDate) -> f64 {
        if claiming_date <= self.profile.fra_date {
            return 1.0;
        }
        let effective = claiming_date.min(self.profile.age_70_date());
        drc_factor(months_between(self.profile.fra_date, effective))
    }

    /// PIA grown by compounded COLAs for each whole year from age 62 to the
    /// claiming age, with no freeze window. This is the base the spousal,
    /// ex-spouse, and survivor formulas all start from.
    pub fn inflated_pia(&self, claiming_age_years: u32, inflation_rate: f64) -> f64 {
        let cola_years = claiming_age_years.saturating_sub(62);
        self.profile.pia * (1.0 + inflation_rate).powi(cola_years as i32)
    }

    /// Monthly own benefit at the moment of claiming: pre-claim COLAs with
    /// the age 60-61 freeze, then the early reduction or delayed credits.
    pub fn monthly_benefit(&self, scenario: ClaimingScenario) -> f64 {
        let claiming_date = self
            .profile
            .claiming_date(scenario.age_years, scenario.age_months);
        let claim_age_years = f64::from(self.profile.age_in_months(claiming_date)) / 12.0;
        let current_age_years = f64::from(self.profile.age_in_months(self.valuation_date)) / 12.0;
        monthly_benefit_at_claim(
            self.profile.pia,
            claim_age_years,
            current_age_years,
            scenario.inflation_rate,
            self.profile.fra_as_years(),
        )
    }

    /// Project the full lifetime of own-benefit payments for a scenario.
    ///
    /// The timeline runs from the claiming date to the longevity birthday,
    /// exclusive, with post-claim COLAs stepping at January boundaries.
    pub fn lifetime_benefits(
        &self,
        scenario: ClaimingScenario,
        longevity_age: u32,
    ) -> LifetimeBenefitResult {
        let monthly = self.monthly_benefit(scenario);
        let claiming_date = self
            .profile
            .claiming_date(scenario.age_years, scenario.age_months);
        let death_date = self.profile.date_at_age(longevity_age);
        let segment = build_benefit_timeline(
            &self.profile,
            claiming_date,
            death_date,
            monthly,
            scenario.inflation_rate,
            BenefitPhase::Own,
        );
        LifetimeBenefitResult {
            total_lifetime_benefits: segment.total,
            initial_monthly_benefit: round2(monthly),
            final_monthly_benefit: segment.final_monthly,
            annual_breakdown: segment.entries,
            claiming_date,
            death_date,
            years_of_benefits: longevity_age as i32 - scenario.age_years as i32,
        }
    }

    /// What one more month of waiting buys, for month-by-month claiming
    /// decisions near a planned date.
    pub fn wait_one_month_analysis(
        &self,
        age_years: u32,
        age_months: u32,
        longevity_age: u32,
        inflation_rate: f64,
    ) -> WaitOneMonthAnalysis {
        let now = ClaimingScenario::new(age_years, age_months, inflation_rate);
        let next = if age_months + 1 >= 12 {
            ClaimingScenario::new(age_years + 1, 0, inflation_rate)
        } else {
            ClaimingScenario::new(age_years, age_months + 1, inflation_rate)
        };

        let current_benefit = self.monthly_benefit(now);
        let next_benefit = self.monthly_benefit(next);
        let current_lifetime = self.lifetime_benefits(now, longevity_age);
        let next_lifetime = self.lifetime_benefits(next, longevity_age);

        let monthly_increase = next_benefit - current_benefit;
        let lifetime_value =
            next_lifetime.total_lifetime_benefits - current_lifetime.total_lifetime_benefits;

        let recommendation = if lifetime_value > 5000.0 {
            format!(
                "Consider waiting - one month delay adds ${:.0} lifetime value",
                lifetime_value
            )
        } else if lifetime_value > 1000.0 {
            format!(
                "Moderate benefit to waiting - adds ${:.0} over lifetime",
                lifetime_value
            )
        } else {
            format!(
                "Minimal benefit to waiting - only ${:.0} additional lifetime value",
                lifetime_value
            )
        };

        WaitOneMonthAnalysis {
            current_monthly_benefit: round2(current_benefit),
            next_month_benefit: round2(next_benefit),
            monthly_increase: round2(monthly_increase),
            annual_increase: round2(monthly_increase * 12.0),
            lifetime_value_of_waiting: round2(lifetime_value),
            recommendation,
        }
    }

    /// Combined COLA and claiming-age adjustment as a percentage of the raw
    /// PIA. Negative for early claims, positive for delayed ones.
    pub fn adjustment_percent(&self, claiming_age_years: u32, inflation_rate: f64) -> f64 {
        let benefit = self.monthly_benefit(ClaimingScenario::at_age(claiming_age_years, inflation_rate));
        round2((benefit / self.profile.pia - 1.0) * 100.0)
    }
}
