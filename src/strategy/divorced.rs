//! Ex-spouse benefit calculator for divorced claimants
//!
//! Eligibility gates: a marriage of 10+ years, not currently remarried, and
//! age 62+ unless a child under 16 is in the claimant's care. Deemed filing
//! applies, so the strategy search prices the larger of the own and
//! ex-spouse benefit at each claiming age rather than letting them be
//! claimed separately. Births before January 2, 1954 keep the
//! restricted-application carve-out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::person::{add_months, ClaimingScenario};
use crate::rules::{restricted_application_allowed, round1, round2};
use crate::timeline::{build_benefit_timeline, BenefitPhase};

use super::individual::IndividualCalculator;
use super::types::{EligibilityVerdict, OptimizationResult, StrategyCandidate, StrategyKind};

/// Spousal and ex-spousal benefits pay half of the worker's PIA
pub const SPOUSAL_FRACTION: f64 = 0.5;

/// Age a child in care stops qualifying the claimant
pub const CHILD_IN_CARE_AGE_LIMIT: f64 = 16.0;

/// Child-in-care benefit details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildInCareBenefit {
    pub eligible: bool,
    pub reason: String,
    /// Half the ex-spouse PIA, inflated to present, with no age reduction
    pub monthly_benefit: f64,
    /// Whole months until the child turns 16
    pub months_of_benefits: u32,
    pub years_of_benefits: f64,
    /// `monthly_benefit` times `months_of_benefits`
    pub total_lifetime_value: f64,
    pub child_current_age: f64,
}

impl ChildInCareBenefit {
    fn ineligible(reason: String, child_current_age: f64) -> Self {
        ChildInCareBenefit {
            eligible: false,
            reason,
            monthly_benefit: 0.0,
            months_of_benefits: 0,
            years_of_benefits: 0.0,
            total_lifetime_value: 0.0,
            child_current_age: round1(child_current_age),
        }
    }
}

/// Strategy search output for a divorced claimant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivorcedOptimization {
    #[serde(flatten)]
    pub result: OptimizationResult,
    /// Populated when a qualifying child-in-care benefit exists
    pub child_in_care: Option<ChildInCareBenefit>,
}

/// Ex-spouse benefit calculator built around the claimant's own
/// [`IndividualCalculator`].
#[derive(Debug, Clone)]
pub struct DivorcedCalculator {
    pub own: IndividualCalculator,
    /// Ex-spouse's PIA at their FRA
    pub ex_spouse_pia: f64,
    /// Length of the ended marriage in whole years
    pub marriage_duration_years: u32,
    /// Date the divorce was finalized
    pub divorce_date: NaiveDate,
    /// Whether the claimant has remarried
    pub is_remarried: bool,
    /// Birth date of a child in the claimant's care, if any
    pub child_birth_date: Option<NaiveDate>,
    /// Skip the age-62 floor so forward-planning runs can price strategies
    /// for a claimant who has not reached 62 yet
    pub ignore_age_check: bool,
}

impl DivorcedCalculator {
    pub fn new(
        own: IndividualCalculator,
        ex_spouse_pia: f64,
        marriage_duration_years: u32,
        divorce_date: NaiveDate,
        is_remarried: bool,
    ) -> Self {
        DivorcedCalculator {
            own,
            ex_spouse_pia,
            marriage_duration_years,
            divorce_date,
            is_remarried,
            child_birth_date: None,
            ignore_age_check: false,
        }
    }

    /// Same calculator with a child in the claimant's care.
    pub fn with_child(mut self, child_birth_date: NaiveDate) -> Self {
        self.child_birth_date = Some(child_birth_date);
        self
    }

    /// Same calculator with the age-62 floor disabled.
    pub fn with_age_check_ignored(mut self) -> Self {
        self.ignore_age_check = true;
        self
    }

    fn current_age(&self) -> f64 {
        self.own.profile.age_years_at(self.own.valuation_date)
    }

    fn child_age(&self) -> Option<f64> {
        self.child_birth_date
            .map(|birth| (self.own.valuation_date - birth).num_days() as f64 / 365.25)
    }

    /// Whether a child under 16 is in the claimant's care.
    pub fn has_child_in_care(&self) -> bool {
        self.child_age()
            .is_some_and(|age| age < CHILD_IN_CARE_AGE_LIMIT)
    }

    /// Gate the ex-spouse benefit: marriage length, remarriage, then the
    /// age-62 floor with its child-in-care bypass.
    pub fn check_ex_spouse_eligibility(&self) -> EligibilityVerdict {
        if self.marriage_duration_years < 10 {
            return EligibilityVerdict::ineligible(format!(
                "Marriage lasted only {} years (need 10+)",
                self.marriage_duration_years
            ));
        }
        if self.is_remarried {
            return EligibilityVerdict::ineligible(
                "Cannot claim ex-spouse benefits while remarried",
            );
        }
        let current_age = self.current_age();
        if current_age < 62.0 && !self.has_child_in_care() && !self.ignore_age_check {
            return EligibilityVerdict::ineligible(format!(
                "Must be age 62+ to claim (currently {})",
                current_age as i32
            ));
        }
        EligibilityVerdict::eligible("Eligible for ex-spouse benefits")
    }

    /// Gate the child-in-care benefit, which has no age floor of its own.
    pub fn check_child_in_care_eligibility(&self) -> EligibilityVerdict {
        let child_age = match self.child_age() {
            None => return EligibilityVerdict::ineligible("No child under 16"),
            Some(age) => age,
        };
        if child_age >= CHILD_IN_CARE_AGE_LIMIT {
            return EligibilityVerdict::ineligible(format!(
                "Child is {} years old (must be under 16)",
                child_age as i32
            ));
        }
        if self.marriage_duration_years < 10 {
            return EligibilityVerdict::ineligible(format!(
                "Marriage lasted only {} years (need 10+)",
                self.marriage_duration_years
            ));
        }
        if self.is_remarried {
            return EligibilityVerdict::ineligible(
                "Cannot claim child-in-care benefits while remarried",
            );
        }
        let years_remaining = CHILD_IN_CARE_AGE_LIMIT - child_age;
        EligibilityVerdict::eligible(format!(
            "Eligible NOW for child-in-care benefits (child under 16 for {:.1} more years)",
            years_remaining
        ))
    }

    /// Monthly ex-spouse benefit for a whole-year claiming age: half the
    /// ex-spouse PIA, inflated from 62, reduced on the claimant's own FRA
    /// schedule when claimed early. Delayed credits never apply.
    pub fn ex_spouse_benefit(&self, claiming_age_years: u32, inflation_rate: f64) -> f64 {
        let claiming_date = self.own.profile.date_at_age(claiming_age_years);
        self.ex_spouse_benefit_on(claiming_date, claiming_age_years, inflation_rate)
    }

    fn ex_spouse_benefit_on(
        &self,
        claiming_date: NaiveDate,
        claiming_age_years: u32,
        inflation_rate: f64,
    ) -> f64 {
        let cola_years = claiming_age_years.saturating_sub(62);
        let inflated_pia = self.ex_spouse_pia * (1.0 + inflation_rate).powi(cola_years as i32);
        let spousal = inflated_pia * SPOUSAL_FRACTION;
        if claiming_date < self.own.profile.fra_date {
            spousal * self.own.reduction_factor(claiming_date)
        } else {
            spousal
        }
    }

    /// Child-in-care benefit: half the ex-spouse PIA inflated to the present
    /// with no age reduction, payable from now until the child's 16th
    /// birthday.
    pub fn child_in_care_benefit(&self, inflation_rate: f64) -> ChildInCareBenefit {
        if !self.has_child_in_care() {
            let child_age = self.child_age().unwrap_or(0.0);
            return ChildInCareBenefit::ineligible("No child under 16".to_string(), child_age);
        }
        let child_age = self.child_age().unwrap_or(0.0);
        let verdict = self.check_child_in_care_eligibility();
        if !verdict.eligible {
            return ChildInCareBenefit::ineligible(verdict.reason, child_age);
        }

        let years_remaining = CHILD_IN_CARE_AGE_LIMIT - child_age;
        let months_of_benefits = (years_remaining * 12.0) as u32;

        let years_since_62 = (self.current_age() - 62.0).max(0.0);
        let inflated_pia = self.ex_spouse_pia * (1.0 + inflation_rate).powf(years_since_62);
        let monthly_benefit = inflated_pia * SPOUSAL_FRACTION;

        ChildInCareBenefit {
            eligible: true,
            reason: verdict.reason,
            monthly_benefit: round2(monthly_benefit),
            months_of_benefits,
            years_of_benefits: round1(years_remaining),
            total_lifetime_value: round2(monthly_benefit * f64::from(months_of_benefits)),
            child_current_age: round1(child_age),
        }
    }

    /// Search the claiming strategies available to a divorced claimant.
    ///
    /// At each of ages 62, FRA, and 70 deemed filing pays the larger of the
    /// own and ex-spouse benefits, so one candidate is priced per age,
    /// labeled by the dominant side. When the claimant is not eligible for
    /// ex-spouse benefits the candidates fall back to the own benefit alone.
    /// Claimants born before January 2, 1954 also get the restricted
    /// application: ex-spouse benefit from FRA while the own benefit earns
    /// delayed credits to 70. A child-in-care candidate is added whenever
    /// that benefit is payable today.
    pub fn optimal_strategy(&self, longevity_age: u32, inflation_rate: f64) -> DivorcedOptimization {
        let eligibility = self.check_ex_spouse_eligibility();
        let profile = &self.own.profile;
        let death_date = profile.date_at_age(longevity_age);
        let mut candidates = Vec::new();

        for age in [62, profile.fra_years, 70] {
            if age > longevity_age {
                continue;
            }
            let own_monthly = self
                .own
                .monthly_benefit(ClaimingScenario::at_age(age, inflation_rate));
            let ex_monthly = if eligibility.eligible {
                self.ex_spouse_benefit(age, inflation_rate)
            } else {
                0.0
            };
            let (monthly, kind, phase, which) = if ex_monthly > own_monthly {
                (
                    ex_monthly,
                    StrategyKind::ExSpouse,
                    BenefitPhase::ExSpouse,
                    "ex-spouse benefit",
                )
            } else {
                (own_monthly, StrategyKind::Own, BenefitPhase::Own, "own benefit")
            };
            let segment = build_benefit_timeline(
                profile,
                profile.date_at_age(age),
                death_date,
                monthly,
                inflation_rate,
                phase,
            );
            candidates.push(StrategyCandidate {
                label: format!("Claim at {} ({})", age, which),
                kind,
                claiming_age: age,
                switch_age: None,
                initial_monthly: round2(monthly),
                switched_monthly: None,
                lifetime_total: segment.total,
                timeline: segment.entries,
                note: None,
            });
        }

        if eligibility.eligible
            && restricted_application_allowed(profile.birth_date)
            && longevity_age >= 70
        {
            let ex_at_fra =
                self.ex_spouse_benefit_on(profile.fra_date, profile.fra_years, inflation_rate);
            let own_at_70 = self
                .own
                .monthly_benefit(ClaimingScenario::at_age(70, inflation_rate));
            let ex_phase = build_benefit_timeline(
                profile,
                profile.fra_date,
                profile.age_70_date(),
                ex_at_fra,
                inflation_rate,
                BenefitPhase::ExSpouse,
            );
            let own_phase = build_benefit_timeline(
                profile,
                profile.age_70_date(),
                death_date,
                own_at_70,
                inflation_rate,
                BenefitPhase::Own,
            );
            let mut timeline = ex_phase.entries;
            timeline.extend(own_phase.entries);
            candidates.push(StrategyCandidate {
                label: format!(
                    "Restricted application: ex-spouse at {}, own at 70",
                    profile.fra_years
                ),
                kind: StrategyKind::RestrictedApplication,
                claiming_age: profile.fra_years,
                switch_age: Some(70),
                initial_monthly: round2(ex_at_fra),
                switched_monthly: Some(round2(own_at_70)),
                lifetime_total: round2(ex_phase.total + own_phase.total),
                timeline,
                note: None,
            });
        }

        let detail = self.child_in_care_benefit(inflation_rate);
        let child_in_care = if detail.eligible { Some(detail) } else { None };
        if let (Some(detail), Some(child_birth)) = (&child_in_care, self.child_birth_date) {
            let sixteenth_birthday = add_months(child_birth, 192);
            let segment = build_benefit_timeline(
                profile,
                self.own.valuation_date,
                sixteenth_birthday,
                detail.monthly_benefit,
                inflation_rate,
                BenefitPhase::ChildInCare,
            );
            candidates.push(StrategyCandidate {
                label: "Child-in-care benefit NOW (until child turns 16)".to_string(),
                kind: StrategyKind::ChildInCare,
                claiming_age: self.current_age() as u32,
                switch_age: None,
                initial_monthly: detail.monthly_benefit,
                switched_monthly: None,
                lifetime_total: segment.total,
                timeline: segment.entries,
                note: Some(
                    "Plus additional benefits from age 62+, not included in this total".to_string(),
                ),
            });
        }

        DivorcedOptimization {
            result: OptimizationResult::from_candidates(eligibility, candidates),
            child_in_care,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::PersonBenefitProfile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn own_calculator(birth: NaiveDate, pia: f64) -> IndividualCalculator {
        IndividualCalculator::at_valuation_date(
            PersonBenefitProfile::new(birth, pia),
            date(2025, 6, 15),
        )
    }

    /// Born 1963, own PIA 1500, ex-spouse PIA 3000, 15-year marriage.
    fn divorced() -> DivorcedCalculator {
        DivorcedCalculator::new(
            own_calculator(date(1963, 6, 1), 1500.0),
            3000.0,
            15,
            date(2010, 8, 20),
            false,
        )
    }

    #[test]
    fn test_eligible_after_long_marriage() {
        let verdict = divorced().check_ex_spouse_eligibility();
        assert!(verdict.eligible);
        assert_eq!(verdict.reason, "Eligible for ex-spouse benefits");
    }

    #[test]
    fn test_short_marriage_rejected_with_length_in_reason() {
        let mut calc = divorced();
        calc.marriage_duration_years = 8;
        let verdict = calc.check_ex_spouse_eligibility();
        assert!(!verdict.eligible);
        assert!(verdict.reason.contains('8'), "reason: {}", verdict.reason);
        assert!(verdict.reason.contains("10+"), "reason: {}", verdict.reason);
    }

    #[test]
    fn test_remarriage_blocks_ex_spouse_benefits() {
        let mut calc = divorced();
        calc.is_remarried = true;
        let verdict = calc.check_ex_spouse_eligibility();
        assert!(!verdict.eligible);
        assert_eq!(verdict.reason, "Cannot claim ex-spouse benefits while remarried");
    }

    #[test]
    fn test_under_62_rejected_without_child() {
        let calc = DivorcedCalculator::new(
            own_calculator(date(1970, 1, 1), 1500.0),
            3000.0,
            12,
            date(2010, 8, 20),
            false,
        );
        let verdict = calc.check_ex_spouse_eligibility();
        assert!(!verdict.eligible);
        assert!(verdict.reason.contains("currently 55"), "reason: {}", verdict.reason);
    }

    #[test]
    fn test_under_62_allowed_with_child_in_care() {
        let calc = DivorcedCalculator::new(
            own_calculator(date(1985, 3, 1), 1200.0),
            3000.0,
            12,
            date(2020, 1, 10),
            false,
        )
        .with_child(date(2015, 3, 1));
        assert!(calc.has_child_in_care());
        assert!(calc.check_ex_spouse_eligibility().eligible);
    }

    #[test]
    fn test_under_62_allowed_when_age_check_ignored() {
        let calc = DivorcedCalculator::new(
            own_calculator(date(1970, 1, 1), 1500.0),
            3000.0,
            12,
            date(2010, 8, 20),
            false,
        )
        .with_age_check_ignored();
        assert!(calc.check_ex_spouse_eligibility().eligible);
    }

    #[test]
    fn test_ex_spouse_benefit_reduced_at_62() {
        // Half of 3000 is 1500; claiming 60 months early cuts it to 70%
        let benefit = divorced().ex_spouse_benefit(62, 0.0);
        assert!((benefit - 1050.0).abs() < 0.01, "benefit: {}", benefit);
    }

    #[test]
    fn test_ex_spouse_benefit_unreduced_at_fra() {
        let benefit = divorced().ex_spouse_benefit(67, 0.0);
        assert!((benefit - 1500.0).abs() < 0.01, "benefit: {}", benefit);
    }

    #[test]
    fn test_ex_spouse_benefit_earns_no_delayed_credits() {
        let calc = divorced();
        let at_fra = calc.ex_spouse_benefit(67, 0.0);
        let at_70 = calc.ex_spouse_benefit(70, 0.0);
        assert!((at_fra - at_70).abs() < 1e-9);
    }

    #[test]
    fn test_ex_spouse_benefit_inflates_from_62() {
        let benefit = divorced().ex_spouse_benefit(67, 0.03);
        let expected = 3000.0 * 1.03_f64.powi(5) * 0.5;
        assert!((benefit - expected).abs() < 0.01, "benefit: {}", benefit);
    }

    #[test]
    fn test_deemed_filing_prices_larger_side_per_age() {
        // Own PIA 1250: the ex-spouse side wins at 62 and FRA, the own side
        // wins at 70 once delayed credits outgrow the flat spousal amount
        let calc = DivorcedCalculator::new(
            own_calculator(date(1963, 6, 1), 1250.0),
            3000.0,
            15,
            date(2010, 8, 20),
            false,
        );
        let outcome = calc.optimal_strategy(90, 0.0);
        let by_age: Vec<(u32, StrategyKind)> = outcome
            .result
            .strategies
            .iter()
            .map(|s| (s.claiming_age, s.kind))
            .collect();
        assert!(by_age.contains(&(62, StrategyKind::ExSpouse)));
        assert!(by_age.contains(&(67, StrategyKind::ExSpouse)));
        assert!(by_age.contains(&(70, StrategyKind::Own)));
    }

    #[test]
    fn test_optimal_is_highest_lifetime_total() {
        let outcome = divorced().optimal_strategy(90, 0.025);
        let strategies = &outcome.result.strategies;
        assert!(!strategies.is_empty());
        for pair in strategies.windows(2) {
            assert!(pair[0].lifetime_total >= pair[1].lifetime_total);
        }
        let optimal = outcome.result.optimal.as_ref().unwrap();
        assert!((optimal.lifetime_total - strategies[0].lifetime_total).abs() < 1e-9);
    }

    #[test]
    fn test_ineligible_claimant_still_gets_own_benefit_candidates() {
        let mut calc = divorced();
        calc.marriage_duration_years = 8;
        let outcome = calc.optimal_strategy(90, 0.025);
        assert!(!outcome.result.eligibility.eligible);
        assert_eq!(outcome.result.strategies.len(), 3);
        assert!(outcome
            .result
            .strategies
            .iter()
            .all(|s| s.kind == StrategyKind::Own));
        assert!(outcome.result.optimal.is_some());
        assert!(outcome.child_in_care.is_none());
    }

    #[test]
    fn test_restricted_application_only_for_pre_1954_births() {
        let grandfathered = DivorcedCalculator::new(
            own_calculator(date(1953, 6, 1), 1500.0),
            3000.0,
            20,
            date(2000, 3, 1),
            false,
        );
        let outcome = grandfathered.optimal_strategy(90, 0.025);
        let restricted = outcome
            .result
            .strategies
            .iter()
            .find(|s| s.kind == StrategyKind::RestrictedApplication)
            .expect("pre-1954 birth should offer a restricted application");
        assert_eq!(restricted.switch_age, Some(70));
        assert!(restricted.switched_monthly.is_some());

        let modern = divorced().optimal_strategy(90, 0.025);
        assert!(modern
            .result
            .strategies
            .iter()
            .all(|s| s.kind != StrategyKind::RestrictedApplication));
    }

    #[test]
    fn test_restricted_application_skipped_when_longevity_under_70() {
        let calc = DivorcedCalculator::new(
            own_calculator(date(1953, 6, 1), 1500.0),
            3000.0,
            20,
            date(2000, 3, 1),
            false,
        );
        let outcome = calc.optimal_strategy(69, 0.025);
        assert!(outcome
            .result
            .strategies
            .iter()
            .all(|s| s.kind != StrategyKind::RestrictedApplication));
    }

    #[test]
    fn test_child_in_care_details() {
        let calc = DivorcedCalculator::new(
            own_calculator(date(1985, 3, 1), 1200.0),
            3000.0,
            12,
            date(2020, 1, 10),
            false,
        )
        .with_child(date(2015, 3, 1));
        let detail = calc.child_in_care_benefit(0.025);
        assert!(detail.eligible);
        // Claimant is under 62, so no inflation applies yet
        assert!((detail.monthly_benefit - 1500.0).abs() < 0.01);
        // Child is 10.3 at valuation: 68 whole months until 16
        assert_eq!(detail.months_of_benefits, 68);
        assert!((detail.years_of_benefits - 5.7).abs() < 0.01);
        assert!((detail.total_lifetime_value - 1500.0 * 68.0).abs() < 0.01);
        assert!((detail.child_current_age - 10.3).abs() < 0.01);
        assert!(detail.reason.contains("Eligible NOW"), "reason: {}", detail.reason);
    }

    #[test]
    fn test_child_past_16_reported_by_eligibility_check() {
        let calc = divorced().with_child(date(2005, 1, 1));
        let verdict = calc.check_child_in_care_eligibility();
        assert!(!verdict.eligible);
        assert!(
            verdict.reason.contains("must be under 16"),
            "reason: {}",
            verdict.reason
        );
        let detail = calc.child_in_care_benefit(0.025);
        assert!(!detail.eligible);
        assert_eq!(detail.reason, "No child under 16");
        assert_eq!(detail.monthly_benefit, 0.0);
    }

    #[test]
    fn test_child_in_care_candidate_carries_exclusion_note() {
        let calc = DivorcedCalculator::new(
            own_calculator(date(1985, 3, 1), 1200.0),
            3000.0,
            12,
            date(2020, 1, 10),
            false,
        )
        .with_child(date(2015, 3, 1));
        let outcome = calc.optimal_strategy(90, 0.025);
        let child_candidate = outcome
            .result
            .strategies
            .iter()
            .find(|s| s.kind == StrategyKind::ChildInCare)
            .expect("child candidate should be enumerated");
        assert!(child_candidate
            .note
            .as_deref()
            .unwrap()
            .contains("not included in this total"));
        assert_eq!(child_candidate.claiming_age, 40);
        assert!(outcome.child_in_care.is_some());
    }
}
