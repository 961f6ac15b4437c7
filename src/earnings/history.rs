//! Covered-earnings records and SSA wage indexing
//!
//! Earnings before the year the worker turns 60 are scaled to the national
//! wage level of the indexing year; later years count at face value. Every
//! year is then capped at its taxable maximum.

use serde::{Deserialize, Serialize};

use crate::rules::{awi_for, round2, taxable_maximum_for};

/// One calendar year of covered earnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningsRecord {
    pub year: i32,
    pub earnings: f64,
    pub is_zero: bool,
    /// Future year the client is planning, not yet on the statement
    #[serde(default)]
    pub is_projected: bool,
}

impl EarningsRecord {
    pub fn new(year: i32, earnings: f64) -> Self {
        EarningsRecord {
            year,
            earnings,
            is_zero: earnings == 0.0,
            is_projected: false,
        }
    }

    pub fn projected(year: i32, earnings: f64) -> Self {
        EarningsRecord {
            is_projected: true,
            ..Self::new(year, earnings)
        }
    }
}

/// One year after indexing and capping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedEarning {
    pub year: i32,
    pub original_earnings: f64,
    pub indexed_earnings: f64,
    pub indexing_factor: f64,
    pub is_zero: bool,
    pub is_capped: bool,
}

/// A worker's covered-earnings history, kept sorted by year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarningsHistory {
    records: Vec<EarningsRecord>,
}

impl EarningsHistory {
    pub fn new(mut records: Vec<EarningsRecord>) -> Self {
        records.sort_by_key(|record| record.year);
        EarningsHistory { records }
    }

    pub fn records(&self) -> &[EarningsRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Index each year to the wage level of `indexing_year`.
    ///
    /// Years from the worker's age-60 year on keep their actual amounts.
    /// Earlier years scale by AWI(indexing year) / AWI(year) when both are
    /// published and stay unindexed otherwise.
    pub fn indexed_earnings(&self, indexing_year: i32) -> Vec<IndexedEarning> {
        let age_60_year = indexing_year - 62 + 60;
        let indexing_awi = awi_for(indexing_year);

        self.records
            .iter()
            .map(|record| {
                let factor = if record.year >= age_60_year {
                    1.0
                } else {
                    match (indexing_awi, awi_for(record.year)) {
                        (Some(target), Some(base)) if base > 0.0 => target / base,
                        _ => 1.0,
                    }
                };
                let uncapped = record.earnings * factor;
                let (indexed, is_capped) = match taxable_maximum_for(record.year) {
                    Some(cap) => (uncapped.min(cap), uncapped >= cap),
                    None => (uncapped, false),
                };
                IndexedEarning {
                    year: record.year,
                    original_earnings: record.earnings,
                    indexed_earnings: round2(indexed),
                    indexing_factor: round3(factor),
                    is_zero: record.is_zero,
                    is_capped,
                }
            })
            .collect()
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_records_sorted_by_year() {
        let history = EarningsHistory::new(vec![
            EarningsRecord::new(2020, 50_000.0),
            EarningsRecord::new(2010, 40_000.0),
            EarningsRecord::new(2015, 45_000.0),
        ]);
        let years: Vec<i32> = history.records().iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2010, 2015, 2020]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_zero_year_flag() {
        assert!(EarningsRecord::new(2019, 0.0).is_zero);
        assert!(!EarningsRecord::new(2019, 1.0).is_zero);
        assert!(EarningsRecord::projected(2030, 80_000.0).is_projected);
    }

    #[test]
    fn test_age_60_years_not_indexed() {
        let history = EarningsHistory::new(vec![
            EarningsRecord::new(2022, 100_000.0),
            EarningsRecord::new(2023, 100_000.0),
        ]);
        for row in history.indexed_earnings(2024) {
            assert_relative_eq!(row.indexing_factor, 1.0);
            assert_relative_eq!(row.indexed_earnings, 100_000.0);
        }
    }

    #[test]
    fn test_earlier_years_scale_by_wage_index() {
        let history = EarningsHistory::new(vec![EarningsRecord::new(2021, 100_000.0)]);
        let rows = history.indexed_earnings(2024);
        let factor = 70_000.0 / 60_575.07;
        assert_relative_eq!(rows[0].indexing_factor, 1.156, epsilon = 1e-9);
        assert!((rows[0].indexed_earnings - 100_000.0 * factor).abs() < 0.01);
        assert!(!rows[0].is_capped);
    }

    #[test]
    fn test_years_without_published_awi_stay_unindexed() {
        let history = EarningsHistory::new(vec![EarningsRecord::new(1995, 80_000.0)]);
        let rows = history.indexed_earnings(2024);
        assert_relative_eq!(rows[0].indexing_factor, 1.0);
        // Capped at the 1995 wage base
        assert_relative_eq!(rows[0].indexed_earnings, 61_200.0);
        assert!(rows[0].is_capped);
    }

    #[test]
    fn test_unknown_indexing_year_disables_indexing() {
        let history = EarningsHistory::new(vec![EarningsRecord::new(2019, 50_000.0)]);
        let rows = history.indexed_earnings(2030);
        assert_relative_eq!(rows[0].indexing_factor, 1.0);
        assert_relative_eq!(rows[0].indexed_earnings, 50_000.0);
    }

    #[test]
    fn test_pre_1980_years_uncapped() {
        let history = EarningsHistory::new(vec![EarningsRecord::new(1975, 5_000_000.0)]);
        let rows = history.indexed_earnings(2024);
        assert_relative_eq!(rows[0].indexed_earnings, 5_000_000.0);
        assert!(!rows[0].is_capped);
    }

    #[test]
    fn test_future_years_use_latest_wage_base() {
        let history = EarningsHistory::new(vec![EarningsRecord::projected(2030, 500_000.0)]);
        let rows = history.indexed_earnings(2024);
        assert_relative_eq!(rows[0].indexed_earnings, 176_100.0);
        assert!(rows[0].is_capped);
    }
}
