//! Shared strategy-search result types

use serde::{Deserialize, Serialize};

use crate::timeline::YearEntry;

/// Claiming-strategy family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// The claimant's own retirement benefit only
    Own,
    /// Ex-spouse benefit for a divorced claimant (deemed filing applies)
    ExSpouse,
    /// Survivor benefit only
    Survivor,
    /// Child-in-care benefit, payable at any age while a child is under 16
    ChildInCare,
    /// Restricted application: ex-spouse benefit at FRA while the own
    /// benefit grows to 70 (pre-1954 births only)
    RestrictedApplication,
    /// Survivor benefit first, switch to the own benefit later
    Crossover,
    /// Own benefit first, switch to the survivor benefit later
    ReverseCrossover,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Own => "own",
            StrategyKind::ExSpouse => "ex_spouse",
            StrategyKind::Survivor => "survivor",
            StrategyKind::ChildInCare => "child_in_care",
            StrategyKind::RestrictedApplication => "restricted_application",
            StrategyKind::Crossover => "crossover",
            StrategyKind::ReverseCrossover => "reverse_crossover",
        }
    }
}

/// One fully-priced claiming strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyCandidate {
    /// Human-readable description of the strategy
    pub label: String,
    pub kind: StrategyKind,
    /// Age the first benefit stream starts
    pub claiming_age: u32,
    /// Age of the switch for two-phase strategies
    pub switch_age: Option<u32>,
    /// Monthly amount when the first stream starts
    pub initial_monthly: f64,
    /// Monthly amount when the second stream starts, two-phase only
    pub switched_monthly: Option<f64>,
    /// Sum of all payments through the longevity age
    pub lifetime_total: f64,
    /// Year-by-year payment schedule across every phase
    pub timeline: Vec<YearEntry>,
    /// Caveat attached by the optimizer, such as benefits excluded from
    /// the total
    pub note: Option<String>,
}

/// The outcome of an eligibility rule check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligible: bool,
    /// Which rule decided, in client-facing language
    pub reason: String,
}

impl EligibilityVerdict {
    pub fn eligible(reason: impl Into<String>) -> Self {
        EligibilityVerdict {
            eligible: true,
            reason: reason.into(),
        }
    }

    pub fn ineligible(reason: impl Into<String>) -> Self {
        EligibilityVerdict {
            eligible: false,
            reason: reason.into(),
        }
    }
}

/// Ranked output of a strategy search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Verdict on the relationship-based benefit that was searched
    pub eligibility: EligibilityVerdict,
    /// Every candidate, sorted by lifetime total, highest first
    pub strategies: Vec<StrategyCandidate>,
    /// The candidate with the highest lifetime total; `None` when no
    /// strategy could be enumerated. Ties keep enumeration order.
    pub optimal: Option<StrategyCandidate>,
}

impl OptimizationResult {
    /// Sort candidates by lifetime value and pick the winner.
    pub fn from_candidates(
        eligibility: EligibilityVerdict,
        mut strategies: Vec<StrategyCandidate>,
    ) -> Self {
        strategies.sort_by(|a, b| b.lifetime_total.total_cmp(&a.lifetime_total));
        let optimal = strategies.first().cloned();
        OptimizationResult {
            eligibility,
            strategies,
            optimal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(label: &str, lifetime_total: f64) -> StrategyCandidate {
        StrategyCandidate {
            label: label.to_string(),
            kind: StrategyKind::Own,
            claiming_age: 62,
            switch_age: None,
            initial_monthly: 1000.0,
            switched_monthly: None,
            lifetime_total,
            timeline: Vec::new(),
            note: None,
        }
    }

    #[test]
    fn test_from_candidates_sorts_descending() {
        let result = OptimizationResult::from_candidates(
            EligibilityVerdict::eligible("ok"),
            vec![
                candidate("low", 100_000.0),
                candidate("high", 300_000.0),
                candidate("mid", 200_000.0),
            ],
        );
        let labels: Vec<&str> = result.strategies.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["high", "mid", "low"]);
        assert_eq!(result.optimal.as_ref().unwrap().label, "high");
    }

    #[test]
    fn test_from_candidates_empty_has_no_optimal() {
        let result = OptimizationResult::from_candidates(
            EligibilityVerdict::ineligible("nothing to search"),
            Vec::new(),
        );
        assert!(result.strategies.is_empty());
        assert!(result.optimal.is_none());
        assert!(!result.eligibility.eligible);
    }

    #[test]
    fn test_strategy_kind_serializes_snake_case() {
        let json = serde_json::to_string(&StrategyKind::RestrictedApplication).unwrap();
        assert_eq!(json, "\"restricted_application\"");
        assert_eq!(StrategyKind::ReverseCrossover.as_str(), "reverse_crossover");
    }
}
