//! Per-client analysis dispatch and batch running
//!
//! An [`AnalysisRunner`] holds the shared configuration once, then maps each
//! client record to the calculator its client type calls for. Batch runs
//! parallelize across records with rayon.

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::person::{ClaimingScenario, ClientRecord, ClientType, PersonBenefitProfile};
use crate::strategy::{
    DivorcedCalculator, DivorcedOptimization, EligibilityVerdict, HouseholdAnalysis,
    HouseholdCalculator, IndividualCalculator, OptimizationResult, StrategyCandidate,
    StrategyKind, WidowCalculator,
};

/// Knobs shared by every analysis in a run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// The date "today" is evaluated at
    pub valuation_date: NaiveDate,
    /// Planning horizon when a record does not carry its own
    pub longevity_age: u32,
    /// Annual COLA assumption when a record does not carry its own
    pub inflation_rate: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            valuation_date: Local::now().date_naive(),
            longevity_age: 90,
            inflation_rate: 0.025,
        }
    }
}

impl AnalysisConfig {
    /// Default config with `LONGEVITY_AGE` and `INFLATION_RATE` environment
    /// overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(age) = std::env::var("LONGEVITY_AGE")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.longevity_age = age;
        }
        if let Some(rate) = std::env::var("INFLATION_RATE")
            .ok()
            .and_then(|value| value.parse().ok())
        {
            config.inflation_rate = rate;
        }
        config
    }
}

/// The full analysis for one client, shaped by their client type.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "analysis_type", rename_all = "snake_case")]
pub enum PersonAnalysis {
    Individual(OptimizationResult),
    Divorced(DivorcedOptimization),
    Widowed(OptimizationResult),
    Household(HouseholdAnalysis),
}

/// Flat per-client summary row for batch output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub client_id: String,
    pub client_type: ClientType,
    /// Whether the relationship-specific benefit is available. Always true
    /// for single and married analyses.
    pub eligible: bool,
    pub strategy_count: usize,
    pub optimal_label: Option<String>,
    pub optimal_monthly: Option<f64>,
    pub optimal_lifetime_total: Option<f64>,
}

/// Dispatches client records to their strategy calculators.
#[derive(Debug, Clone)]
pub struct AnalysisRunner {
    config: AnalysisConfig,
}

impl AnalysisRunner {
    /// Runner with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        AnalysisRunner { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one record with the calculator its client type selects.
    /// Relationship records missing their required fields fall back to the
    /// individual analysis.
    pub fn run(&self, record: &ClientRecord) -> PersonAnalysis {
        let longevity_age = record.longevity_age.unwrap_or(self.config.longevity_age);
        let inflation_rate = record.inflation_rate.unwrap_or(self.config.inflation_rate);
        let own = IndividualCalculator::at_valuation_date(
            PersonBenefitProfile::new(record.birth_date, record.pia),
            self.config.valuation_date,
        );
        debug!(
            "client {}: {} analysis to age {}",
            record.id,
            record.client_type.as_str(),
            longevity_age
        );

        match record.client_type {
            ClientType::Single => PersonAnalysis::Individual(own_benefit_optimization(
                &own,
                longevity_age,
                inflation_rate,
            )),
            ClientType::Married => match (record.spouse_birth_date, record.spouse_pia) {
                (Some(spouse_birth_date), Some(spouse_pia)) => {
                    let spouse = IndividualCalculator::at_valuation_date(
                        PersonBenefitProfile::new(spouse_birth_date, spouse_pia),
                        self.config.valuation_date,
                    );
                    let spouse1_claiming_age = own.profile.fra_years;
                    let spouse2_claiming_age = spouse.profile.fra_years;
                    let household = HouseholdCalculator::couple(own, spouse);
                    PersonAnalysis::Household(household.household_analysis(
                        spouse1_claiming_age,
                        Some(spouse2_claiming_age),
                        (longevity_age, longevity_age),
                        inflation_rate,
                    ))
                }
                _ => {
                    warn!(
                        "client {}: married record missing spouse fields, running individual analysis",
                        record.id
                    );
                    PersonAnalysis::Individual(own_benefit_optimization(
                        &own,
                        longevity_age,
                        inflation_rate,
                    ))
                }
            },
            ClientType::Divorced => match (
                record.ex_spouse_pia,
                record.marriage_duration_years,
                record.divorce_date,
            ) {
                (Some(ex_spouse_pia), Some(marriage_duration_years), Some(divorce_date)) => {
                    let mut calculator = DivorcedCalculator::new(
                        own,
                        ex_spouse_pia,
                        marriage_duration_years,
                        divorce_date,
                        record.is_remarried,
                    );
                    if let Some(child_birth_date) = record.child_birth_date {
                        calculator = calculator.with_child(child_birth_date);
                    }
                    PersonAnalysis::Divorced(calculator.optimal_strategy(longevity_age, inflation_rate))
                }
                _ => {
                    warn!(
                        "client {}: divorced record missing ex-spouse fields, running individual analysis",
                        record.id
                    );
                    PersonAnalysis::Individual(own_benefit_optimization(
                        &own,
                        longevity_age,
                        inflation_rate,
                    ))
                }
            },
            ClientType::Widowed => match (record.deceased_spouse_pia, record.deceased_death_date) {
                (Some(deceased_spouse_pia), Some(deceased_death_date)) => {
                    let widow = WidowCalculator::new(
                        own,
                        deceased_spouse_pia,
                        deceased_death_date,
                        record.is_remarried,
                        record.remarriage_date,
                    );
                    PersonAnalysis::Widowed(widow.optimal_strategy(longevity_age, inflation_rate))
                }
                _ => {
                    warn!(
                        "client {}: widowed record missing deceased-spouse fields, running individual analysis",
                        record.id
                    );
                    PersonAnalysis::Individual(own_benefit_optimization(
                        &own,
                        longevity_age,
                        inflation_rate,
                    ))
                }
            },
        }
    }

    /// One flat summary row per record.
    pub fn summarize(&self, record: &ClientRecord) -> AnalysisSummary {
        let analysis = self.run(record);
        self.summarize_analysis(record, &analysis)
    }

    /// Summary row for an analysis that has already been run.
    pub fn summarize_analysis(
        &self,
        record: &ClientRecord,
        analysis: &PersonAnalysis,
    ) -> AnalysisSummary {
        let (eligible, strategy_count, optimal_label, optimal_monthly, optimal_lifetime_total) =
            match analysis {
                PersonAnalysis::Individual(result) | PersonAnalysis::Widowed(result) => (
                    result.eligibility.eligible,
                    result.strategies.len(),
                    result.optimal.as_ref().map(|s| s.label.clone()),
                    result.optimal.as_ref().map(|s| s.initial_monthly),
                    result.optimal.as_ref().map(|s| s.lifetime_total),
                ),
                PersonAnalysis::Divorced(optimization) => (
                    optimization.result.eligibility.eligible,
                    optimization.result.strategies.len(),
                    optimization.result.optimal.as_ref().map(|s| s.label.clone()),
                    optimization.result.optimal.as_ref().map(|s| s.initial_monthly),
                    optimization.result.optimal.as_ref().map(|s| s.lifetime_total),
                ),
                PersonAnalysis::Household(analysis) => {
                    let scenarios = &analysis.optimization_scenarios;
                    let mut best = ("both_at_62", &scenarios.both_at_62);
                    if scenarios.both_at_70.total_household_benefits
                        > best.1.total_household_benefits
                    {
                        best = ("both_at_70", &scenarios.both_at_70);
                    }
                    if let Some(mixed) = &scenarios.optimized_mixed {
                        if mixed.total_household_benefits > best.1.total_household_benefits {
                            best = ("optimized_mixed", mixed);
                        }
                    }
                    let combined_monthly = best.1.spouse1_benefits.initial_monthly_benefit
                        + best
                            .1
                            .spouse2_benefits
                            .as_ref()
                            .map(|b| b.initial_monthly_benefit)
                            .unwrap_or(0.0);
                    (
                        true,
                        2 + usize::from(scenarios.optimized_mixed.is_some()),
                        Some(best.0.to_string()),
                        Some(combined_monthly),
                        Some(best.1.total_household_benefits),
                    )
                }
            };

        AnalysisSummary {
            client_id: record.id.clone(),
            client_type: record.client_type,
            eligible,
            strategy_count,
            optimal_label,
            optimal_monthly,
            optimal_lifetime_total,
        }
    }

    /// Summarize a whole roster in parallel, preserving record order.
    pub fn run_batch(&self, records: &[ClientRecord]) -> Vec<AnalysisSummary> {
        info!("analyzing {} client records", records.len());
        records
            .par_iter()
            .map(|record| self.summarize(record))
            .collect()
    }
}

impl Default for AnalysisRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Own-benefit claiming comparison at 62, FRA, and 70.
fn own_benefit_optimization(
    calculator: &IndividualCalculator,
    longevity_age: u32,
    inflation_rate: f64,
) -> OptimizationResult {
    let mut candidates = Vec::new();
    for claiming_age in [62, calculator.profile.fra_years, 70] {
        if claiming_age > longevity_age {
            continue;
        }
        let lifetime = calculator.lifetime_benefits(
            ClaimingScenario::at_age(claiming_age, inflation_rate),
            longevity_age,
        );
        candidates.push(StrategyCandidate {
            label: format!("Claim at {}", claiming_age),
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
    OptimizationResult::from_candidates(
        EligibilityVerdict::eligible("Eligible for retirement benefits"),
        candidates,
    )
}
