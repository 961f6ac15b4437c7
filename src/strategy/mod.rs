//! Claiming-strategy calculators: individual, divorced, widowed, household,
//! and SSDI, each enumerating its candidate strategies and ranking them by
//! lifetime total

mod disability;
mod divorced;
mod household;
mod individual;
mod types;
mod widow;

pub use disability::{
    DisabilityCalculator, EarlyRetirementOption, SsdiComparison, SsdiStrategies,
    SsdiYearSnapshot, StandardPathOutcome, SuspensionPathOutcome,
};
pub use divorced::{
    ChildInCareBenefit, DivorcedCalculator, DivorcedOptimization, CHILD_IN_CARE_AGE_LIMIT,
    SPOUSAL_FRACTION,
};
pub use household::{
    HouseholdAnalysis, HouseholdBenefitSummary, HouseholdCalculator, HouseholdScenarios,
};
pub use individual::{IndividualCalculator, WaitOneMonthAnalysis};
pub use types::{EligibilityVerdict, OptimizationResult, StrategyCandidate, StrategyKind};
pub use widow::{CrossoverOutcome, WidowCalculator};
