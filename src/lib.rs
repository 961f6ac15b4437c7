//! Social Security claiming-strategy optimization engine
//!
//! This library provides:
//! - Statutory benefit math (FRA schedule, early reductions, delayed credits, COLA compounding)
//! - Claiming-strategy calculators (individual, divorced, widowed, household, SSDI)
//! - Year-by-year benefit timelines and lifetime totals
//! - An earnings-record AIME/PIA engine with what-if impact analysis
//! - Batch analysis over client rosters

pub mod rules;
pub mod person;
pub mod timeline;
pub mod strategy;
pub mod earnings;
pub mod scenario;

// Re-export commonly used types
pub use person::{ClientRecord, ClientType, PersonBenefitProfile};
pub use scenario::{AnalysisConfig, AnalysisRunner, AnalysisSummary, PersonAnalysis};
pub use strategy::{
    DivorcedCalculator, HouseholdCalculator, IndividualCalculator, OptimizationResult,
    WidowCalculator,
};
pub use timeline::LifetimeBenefitResult;
