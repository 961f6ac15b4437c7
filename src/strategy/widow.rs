//! Survivor benefit calculator for widowed claimants
//!
//! Survivor benefits pay up to 100% of the deceased spouse's PIA and can
//! start at 60, with their own reduction schedule (0.396% per month early,
//! capped at 28.5%). Because the survivor and own benefits are independent
//! streams, the strategy search includes crossover plans: start one stream
//! early, switch to the other once it has grown.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::person::{months_between, ClaimingScenario};
use crate::rules::{round2, survivor_reduction_factor};
use crate::timeline::{build_benefit_timeline, BenefitPhase, YearEntry};

use super::individual::IndividualCalculator;
use super::types::{EligibilityVerdict, OptimizationResult, StrategyCandidate, StrategyKind};

/// One survivor-first-then-own (or the reverse) switching plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossoverOutcome {
    /// Whether the age combination is a legal crossover
    pub valid: bool,
    /// Why the combination was rejected, when invalid
    pub reason: Option<String>,
    pub survivor_monthly: f64,
    pub own_monthly: f64,
    pub lifetime_total: f64,
    /// Years on the survivor benefit before the switch
    pub survivor_years: i32,
    /// Years on the own benefit after the switch
    pub own_years: i32,
    pub timeline: Vec<YearEntry>,
}

impl CrossoverOutcome {
    fn invalid(reason: &str) -> Self {
        CrossoverOutcome {
            valid: false,
            reason: Some(reason.to_string()),
            survivor_monthly: 0.0,
            own_monthly: 0.0,
            lifetime_total: 0.0,
            survivor_years: 0,
            own_years: 0,
            timeline: Vec::new(),
        }
    }
}

/// Survivor benefit calculator built around the claimant's own
/// [`IndividualCalculator`].
#[derive(Debug, Clone)]
pub struct WidowCalculator {
    pub own: IndividualCalculator,
    /// Deceased spouse's PIA at their FRA
    pub deceased_spouse_pia: f64,
    /// Date the spouse died
    pub deceased_death_date: NaiveDate,
    /// Whether the claimant has remarried
    pub is_remarried: bool,
    /// Date of remarriage, when known
    pub remarriage_date: Option<NaiveDate>,
}

impl WidowCalculator {
    pub fn new(
        own: IndividualCalculator,
        deceased_spouse_pia: f64,
        deceased_death_date: NaiveDate,
        is_remarried: bool,
        remarriage_date: Option<NaiveDate>,
    ) -> Self {
        WidowCalculator {
            own,
            deceased_spouse_pia,
            deceased_death_date,
            is_remarried,
            remarriage_date,
        }
    }

    /// Gate the survivor benefit. Remarriage before 60 disqualifies
    /// permanently; remarriage at 60 or later does not. The claimant must
    /// be 60 or older to collect.
    pub fn check_survivor_eligibility(&self) -> EligibilityVerdict {
        let profile = &self.own.profile;
        if self.is_remarried {
            if let Some(remarriage_date) = self.remarriage_date {
                let remarriage_age = profile.age_years_at(remarriage_date);
                if remarriage_age < 60.0 {
                    return EligibilityVerdict::ineligible(
                        "Remarried before age 60 (not eligible for survivor benefits)",
                    );
                }
            }
        }
        let current_age = profile.age_years_at(self.own.valuation_date);
        if current_age < 60.0 {
            return EligibilityVerdict::ineligible(format!(
                "Must be age 60+ for survivor benefits (currently {})",
                current_age as i32
            ));
        }
        EligibilityVerdict::eligible("Eligible for survivor benefits")
    }

    /// Monthly survivor benefit for a whole-year claiming age: the deceased
    /// spouse's PIA inflated by each year elapsed since the death, reduced
    /// on the survivor schedule when claimed before the claimant's own FRA.
    pub fn survivor_benefit(&self, claiming_age_years: u32, inflation_rate: f64) -> f64 {
        let profile = &self.own.profile;
        let age_at_death = self.deceased_death_date.year() - profile.birth_year;
        let years_since_death = (claiming_age_years as i32 - age_at_death).max(0);
        let base = self.deceased_spouse_pia * (1.0 + inflation_rate).powi(years_since_death);

        let claiming_date = profile.date_at_age(claiming_age_years);
        if claiming_date < profile.fra_date {
            let months_early = months_between(claiming_date, profile.fra_date);
            base * survivor_reduction_factor(months_early)
        } else {
            base
        }
    }

    /// Price a crossover: survivor benefit from `survivor_claiming_age`,
    /// switching to the own benefit at `own_claiming_age`. The survivor
    /// stream must start first or the combination is invalid.
    pub fn crossover_strategy(
        &self,
        survivor_claiming_age: u32,
        own_claiming_age: u32,
        longevity_age: u32,
        inflation_rate: f64,
    ) -> CrossoverOutcome {
        if survivor_claiming_age >= own_claiming_age {
            return CrossoverOutcome::invalid(
                "Survivor claiming age must be before own claiming age for crossover",
            );
        }

        let profile = &self.own.profile;
        let survivor_monthly = self.survivor_benefit(survivor_claiming_age, inflation_rate);
        let own_monthly = self
            .own
            .monthly_benefit(ClaimingScenario::at_age(own_claiming_age, inflation_rate));

        let survivor_start = profile.date_at_age(survivor_claiming_age);
        let own_start = profile.date_at_age(own_claiming_age);
        let death_date = profile.date_at_age(longevity_age);

        let survivor_phase = build_benefit_timeline(
            profile,
            survivor_start,
            own_start,
            survivor_monthly,
            inflation_rate,
            BenefitPhase::Survivor,
        );
        let own_phase = build_benefit_timeline(
            profile,
            own_start,
            death_date,
            own_monthly,
            inflation_rate,
            BenefitPhase::Own,
        );

        let mut timeline = survivor_phase.entries;
        timeline.extend(own_phase.entries);
        CrossoverOutcome {
            valid: true,
            reason: None,
            survivor_monthly: round2(survivor_monthly),
            own_monthly: round2(own_monthly),
            lifetime_total: round2(survivor_phase.total + own_phase.total),
            survivor_years: own_claiming_age as i32 - survivor_claiming_age as i32,
            own_years: longevity_age as i32 - own_claiming_age as i32,
            timeline,
        }
    }

    /// Search the claiming strategies available to a widowed claimant:
    /// own-only ages, survivor-only ages, survivor-then-own crossovers, and
    /// own-then-survivor reverse crossovers. Own-only candidates are priced
    /// even when survivor benefits are unavailable.
    pub fn optimal_strategy(&self, longevity_age: u32, inflation_rate: f64) -> OptimizationResult {
        let eligibility = self.check_survivor_eligibility();
        let profile = &self.own.profile;
        let death_date = profile.date_at_age(longevity_age);
        let mut candidates = Vec::new();

        for claiming_age in [62, profile.fra_years, 70] {
            if claiming_age > longevity_age {
                continue;
            }
            let lifetime = self
                .own
                .lifetime_benefits(ClaimingScenario::at_age(claiming_age, inflation_rate), longevity_age);
            candidates.push(StrategyCandidate {
                label: format!("Own benefit only at {}", claiming_age),
                kind: StrategyKind::Own,
                claiming_age,
                switch_age: None,
                initial_monthly: lifetime.initial_monthly_benefit,
                switched_monthly: None,
                lifetime_total: lifetime.total_lifetime_benefits,
                timeline: lifetime.annual_breakdown,
                note: None,
            });
        }

        if eligibility.eligible {
            for claiming_age in [60, 62, profile.fra_years, 70] {
                if claiming_age > longevity_age {
                    continue;
                }
                let survivor_monthly = self.survivor_benefit(claiming_age, inflation_rate);
                let segment = build_benefit_timeline(
                    profile,
                    profile.date_at_age(claiming_age),
                    death_date,
                    survivor_monthly,
                    inflation_rate,
                    BenefitPhase::Survivor,
                );
                candidates.push(StrategyCandidate {
                    label: format!("Survivor benefit only at {}", claiming_age),
                    kind: StrategyKind::Survivor,
                    claiming_age,
                    switch_age: None,
                    initial_monthly: round2(survivor_monthly),
                    switched_monthly: None,
                    lifetime_total: segment.total,
                    timeline: segment.entries,
                    note: None,
                });
            }

            // Survivor first is the usual winner: the survivor stream never
            // grows past FRA while the own stream earns credits to 70
            let crossover_options = [(60, 70), (62, 70), (60, profile.fra_years)];
            for (survivor_age, own_age) in crossover_options {
                if own_age > longevity_age {
                    continue;
                }
                let crossover =
                    self.crossover_strategy(survivor_age, own_age, longevity_age, inflation_rate);
                if !crossover.valid {
                    continue;
                }
                candidates.push(StrategyCandidate {
                    label: format!(
                        "Survivor at {}, switch to own at {}",
                        survivor_age, own_age
                    ),
                    kind: StrategyKind::Crossover,
                    claiming_age: survivor_age,
                    switch_age: Some(own_age),
                    initial_monthly: crossover.survivor_monthly,
                    switched_monthly: Some(crossover.own_monthly),
                    lifetime_total: crossover.lifetime_total,
                    timeline: crossover.timeline,
                    note: None,
                });
            }

            let reverse_options = [(62, profile.fra_years), (62, 70)];
            for (own_age, survivor_age) in reverse_options {
                if survivor_age > longevity_age || own_age >= survivor_age {
                    continue;
                }
                let own_monthly = self
                    .own
                    .monthly_benefit(ClaimingScenario::at_age(own_age, inflation_rate));
                let survivor_monthly = self.survivor_benefit(survivor_age, inflation_rate);

                let own_phase = build_benefit_timeline(
                    profile,
                    profile.date_at_age(own_age),
                    profile.date_at_age(survivor_age),
                    own_monthly,
                    inflation_rate,
                    BenefitPhase::Own,
                );
                let survivor_phase = build_benefit_timeline(
                    profile,
                    profile.date_at_age(survivor_age),
                    death_date,
                    survivor_monthly,
                    inflation_rate,
                    BenefitPhase::Survivor,
                );

                let mut timeline = own_phase.entries;
                timeline.extend(survivor_phase.entries);
                candidates.push(StrategyCandidate {
                    label: format!(
                        "Own at {}, switch to survivor at {}",
                        own_age, survivor_age
                    ),
                    kind: StrategyKind::ReverseCrossover,
                    claiming_age: own_age,
                    switch_age: Some(survivor_age),
                    initial_monthly: round2(own_monthly),
                    switched_monthly: Some(round2(survivor_monthly)),
                    lifetime_total: round2(own_phase.total + survivor_phase.total),
                    timeline,
                    note: None,
                });
            }
        }

        OptimizationResult::from_candidates(eligibility, candidates)
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

    /// Born 1960, own PIA 2000, deceased spouse PIA 2800, died 2020.
    fn widow() -> WidowCalculator {
        WidowCalculator::new(
            own_calculator(date(1960, 1, 1), 2000.0),
            2800.0,
            date(2020, 1, 1),
            false,
            None,
        )
    }

    #[test]
    fn test_eligible_at_65() {
        let verdict = widow().check_survivor_eligibility();
        assert!(verdict.eligible);
        assert_eq!(verdict.reason, "Eligible for survivor benefits");
    }

    #[test]
    fn test_remarriage_before_60_disqualifies() {
        let mut calc = widow();
        calc.is_remarried = true;
        calc.remarriage_date = Some(date(2019, 1, 1));
        let verdict = calc.check_survivor_eligibility();
        assert!(!verdict.eligible);
        assert_eq!(
            verdict.reason,
            "Remarried before age 60 (not eligible for survivor benefits)"
        );
    }

    #[test]
    fn test_remarriage_at_60_or_later_keeps_eligibility() {
        // The boundary is inclusive at 60
        for remarriage in [date(2020, 1, 1), date(2021, 1, 1)] {
            let mut calc = widow();
            calc.is_remarried = true;
            calc.remarriage_date = Some(remarriage);
            assert!(
                calc.check_survivor_eligibility().eligible,
                "remarriage on {} should not disqualify",
                remarriage
            );
        }
    }

    #[test]
    fn test_under_60_not_yet_eligible() {
        let calc = WidowCalculator::new(
            own_calculator(date(1970, 1, 1), 2000.0),
            2800.0,
            date(2020, 1, 1),
            false,
            None,
        );
        let verdict = calc.check_survivor_eligibility();
        assert!(!verdict.eligible);
        assert!(
            verdict.reason.contains("currently 55"),
            "reason: {}",
            verdict.reason
        );
    }

    #[test]
    fn test_survivor_benefit_full_at_fra() {
        let benefit = widow().survivor_benefit(67, 0.0);
        assert!((benefit - 2800.0).abs() < 0.01, "benefit: {}", benefit);
    }

    #[test]
    fn test_survivor_benefit_capped_reduction_at_60() {
        // 84 months early exceeds the cap, so exactly 28.5% comes off
        let benefit = widow().survivor_benefit(60, 0.0);
        assert!((benefit - 2800.0 * 0.715).abs() < 0.01, "benefit: {}", benefit);
    }

    #[test]
    fn test_survivor_benefit_partial_reduction_at_62() {
        // 60 months early at 0.396% per month
        let benefit = widow().survivor_benefit(62, 0.0);
        let expected = 2800.0 * (1.0 - 60.0 * 0.00396);
        assert!((benefit - expected).abs() < 0.01, "benefit: {}", benefit);
    }

    #[test]
    fn test_survivor_benefit_inflates_with_years_since_death() {
        // Death at claimant age 60, claiming at 67: seven COLA years
        let benefit = widow().survivor_benefit(67, 0.03);
        let expected = 2800.0 * 1.03_f64.powi(7);
        assert!((benefit - expected).abs() < 0.01, "benefit: {}", benefit);
    }

    #[test]
    fn test_crossover_rejects_survivor_after_own() {
        let outcome = widow().crossover_strategy(70, 62, 95, 0.025);
        assert!(!outcome.valid);
        assert!(outcome
            .reason
            .as_deref()
            .unwrap()
            .contains("before own claiming age"));
        assert_eq!(outcome.lifetime_total, 0.0);
        assert!(outcome.timeline.is_empty());
    }

    #[test]
    fn test_crossover_survivor_60_own_70() {
        let outcome = widow().crossover_strategy(60, 70, 90, 0.0);
        assert!(outcome.valid);
        // Survivor at 60 pays the capped reduction, own at 70 pays 124%
        assert!((outcome.survivor_monthly - 2002.0).abs() < 0.01);
        assert!((outcome.own_monthly - 2480.0).abs() < 0.01);
        // Ten years of survivor payments, twenty of own
        let expected = 2002.0 * 120.0 + 2480.0 * 240.0;
        assert!(
            (outcome.lifetime_total - expected).abs() < 0.01,
            "lifetime: {}",
            outcome.lifetime_total
        );
        assert_eq!(outcome.survivor_years, 10);
        assert_eq!(outcome.own_years, 20);
        // Phases are concatenated in order
        assert_eq!(outcome.timeline.first().unwrap().phase, BenefitPhase::Survivor);
        assert_eq!(outcome.timeline.last().unwrap().phase, BenefitPhase::Own);
    }

    #[test]
    fn test_optimal_strategy_enumerates_all_families() {
        let result = widow().optimal_strategy(90, 0.025);
        assert!(result.eligibility.eligible);
        let count = |kind: StrategyKind| {
            result
                .strategies
                .iter()
                .filter(|s| s.kind == kind)
                .count()
        };
        assert_eq!(count(StrategyKind::Own), 3);
        assert_eq!(count(StrategyKind::Survivor), 4);
        assert_eq!(count(StrategyKind::Crossover), 3);
        assert_eq!(count(StrategyKind::ReverseCrossover), 2);

        for pair in result.strategies.windows(2) {
            assert!(pair[0].lifetime_total >= pair[1].lifetime_total);
        }
        let optimal = result.optimal.as_ref().unwrap();
        assert!((optimal.lifetime_total - result.strategies[0].lifetime_total).abs() < 1e-9);
    }

    #[test]
    fn test_ineligible_widow_still_gets_own_candidates() {
        let mut calc = widow();
        calc.is_remarried = true;
        calc.remarriage_date = Some(date(2018, 6, 1));
        let result = calc.optimal_strategy(90, 0.025);
        assert!(!result.eligibility.eligible);
        assert_eq!(result.strategies.len(), 3);
        assert!(result.strategies.iter().all(|s| s.kind == StrategyKind::Own));
        assert!(result.optimal.is_some());
    }

    #[test]
    fn test_longevity_gates_late_switch_ages() {
        let result = widow().optimal_strategy(69, 0.025);
        for strategy in &result.strategies {
            assert!(strategy.claiming_age <= 69);
            if let Some(switch_age) = strategy.switch_age {
                assert!(switch_age <= 69, "strategy {} switches too late", strategy.label);
            }
        }
        // Crossovers to own-at-70 cannot fit in a 69-year horizon
        assert!(result
            .strategies
            .iter()
            .all(|s| s.kind != StrategyKind::Crossover || s.switch_age == Some(67)));
    }
}
