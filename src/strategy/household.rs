//! Married-couple household analysis
//!
//! Combines two individual calculators. The spousal benefit is excess-only:
//! half the primary earner's inflated PIA, reduced for the spouse's own
//! early filing, minus the spouse's own benefit, floored at zero. The
//! household aggregate sums each spouse's independent own-benefit lifetime
//! total and compares three canned claiming scenarios.

use serde::{Deserialize, Serialize};

use crate::person::ClaimingScenario;
use crate::rules::round2;
use crate::timeline::LifetimeBenefitResult;

use super::divorced::SPOUSAL_FRACTION;
use super::individual::IndividualCalculator;

/// Combined lifetime totals for one claiming-age combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdBenefitSummary {
    pub total_household_benefits: f64,
    pub spouse1_benefits: LifetimeBenefitResult,
    pub spouse2_benefits: Option<LifetimeBenefitResult>,
}

/// The three comparison scenarios every household analysis reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdScenarios {
    pub both_at_62: HouseholdBenefitSummary,
    pub both_at_70: HouseholdBenefitSummary,
    /// Higher-PIA spouse delays to 70 while the other claims at 62. Absent
    /// for single-person households.
    pub optimized_mixed: Option<HouseholdBenefitSummary>,
}

/// A household benefit summary together with the comparison scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HouseholdAnalysis {
    #[serde(flatten)]
    pub summary: HouseholdBenefitSummary,
    pub optimization_scenarios: HouseholdScenarios,
}

/// Household calculator over one or two individual calculators.
#[derive(Debug, Clone)]
pub struct HouseholdCalculator {
    pub spouse1: IndividualCalculator,
    pub spouse2: Option<IndividualCalculator>,
}

impl HouseholdCalculator {
    pub fn single(spouse1: IndividualCalculator) -> Self {
        HouseholdCalculator {
            spouse1,
            spouse2: None,
        }
    }

    pub fn couple(spouse1: IndividualCalculator, spouse2: IndividualCalculator) -> Self {
        HouseholdCalculator {
            spouse1,
            spouse2: Some(spouse2),
        }
    }

    pub fn is_married(&self) -> bool {
        self.spouse2.is_some()
    }

    /// Excess-only spousal top-up: half the primary's PIA inflated to the
    /// primary's claiming year, reduced for the spouse's own early filing,
    /// minus the spouse's own benefit. Never negative, zero when single.
    pub fn spousal_benefit(
        &self,
        spouse: &IndividualCalculator,
        primary: &IndividualCalculator,
        spouse_claiming_age: u32,
        primary_claiming_age: u32,
        inflation_rate: f64,
    ) -> f64 {
        if !self.is_married() {
            return 0.0;
        }
        let spousal_pia =
            primary.inflated_pia(primary_claiming_age, inflation_rate) * SPOUSAL_FRACTION;
        let spouse_claiming_date = spouse.profile.claiming_date(spouse_claiming_age, 0);
        let spousal_amount = spousal_pia * spouse.reduction_factor(spouse_claiming_date);

        let own_benefit =
            spouse.monthly_benefit(ClaimingScenario::at_age(spouse_claiming_age, inflation_rate));
        (spousal_amount - own_benefit).max(0.0)
    }

    /// Lifetime totals for one claiming-age combination. Each spouse's
    /// stream is projected independently over their own longevity; the
    /// spousal top-up is not layered into the aggregate.
    pub fn household_benefits(
        &self,
        spouse1_claiming_age: u32,
        spouse2_claiming_age: Option<u32>,
        longevity_ages: (u32, u32),
        inflation_rate: f64,
    ) -> HouseholdBenefitSummary {
        let spouse1_benefits = self.spouse1.lifetime_benefits(
            ClaimingScenario::at_age(spouse1_claiming_age, inflation_rate),
            longevity_ages.0,
        );
        let spouse2_benefits = self.spouse2.as_ref().zip(spouse2_claiming_age).map(
            |(spouse2, claiming_age)| {
                spouse2.lifetime_benefits(
                    ClaimingScenario::at_age(claiming_age, inflation_rate),
                    longevity_ages.1,
                )
            },
        );

        let mut total = spouse1_benefits.total_lifetime_benefits;
        if let Some(spouse2) = &spouse2_benefits {
            total += spouse2.total_lifetime_benefits;
        }
        HouseholdBenefitSummary {
            total_household_benefits: round2(total),
            spouse1_benefits,
            spouse2_benefits,
        }
    }

    /// A household summary for the given combination plus the three
    /// comparison scenarios.
    pub fn household_analysis(
        &self,
        spouse1_claiming_age: u32,
        spouse2_claiming_age: Option<u32>,
        longevity_ages: (u32, u32),
        inflation_rate: f64,
    ) -> HouseholdAnalysis {
        HouseholdAnalysis {
            summary: self.household_benefits(
                spouse1_claiming_age,
                spouse2_claiming_age,
                longevity_ages,
                inflation_rate,
            ),
            optimization_scenarios: self.optimization_scenarios(longevity_ages, inflation_rate),
        }
    }

    fn optimization_scenarios(
        &self,
        longevity_ages: (u32, u32),
        inflation_rate: f64,
    ) -> HouseholdScenarios {
        let spouse2_at = |age: u32| self.spouse2.as_ref().map(|_| age);

        let both_at_62 =
            self.household_benefits(62, spouse2_at(62), longevity_ages, inflation_rate);
        let both_at_70 =
            self.household_benefits(70, spouse2_at(70), longevity_ages, inflation_rate);

        let optimized_mixed = self.spouse2.as_ref().map(|spouse2| {
            // The higher earner's stream benefits most from delayed credits
            let (spouse1_age, spouse2_age) = if self.spouse1.profile.pia > spouse2.profile.pia {
                (70, 62)
            } else {
                (62, 70)
            };
            self.household_benefits(
                spouse1_age,
                Some(spouse2_age),
                longevity_ages,
                inflation_rate,
            )
        });

        HouseholdScenarios {
            both_at_62,
            both_at_70,
            optimized_mixed,
        }
    }
}
