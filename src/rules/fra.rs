//! Full Retirement Age schedule and statutory adjustment rates
//!
//! FRA is a step function of birth year: 65 for 1937 and earlier, rising in
//! two-month steps to 66 for the 1943-1954 cohort, then in two-month steps
//! again to 67 for 1960 and later. The rate constants stay as exact rational
//! fractions so repeated compounding never drifts.

use chrono::{Datelike, NaiveDate};

/// Early-filing reduction for the first 36 months before FRA (5/9 of 1% per month)
pub const EARLY_REDUCTION_RATE_FIRST_36: f64 = 5.0 / 9.0 / 100.0;

/// Early-filing reduction for months beyond the first 36 (5/12 of 1% per month)
pub const EARLY_REDUCTION_RATE_BEYOND_36: f64 = 5.0 / 12.0 / 100.0;

/// Delayed retirement credit per month past FRA (2/3 of 1% per month, 8% per year)
pub const DELAYED_CREDIT_RATE: f64 = 2.0 / 3.0 / 100.0;

/// Survivor-benefit reduction per month before FRA (about 4.75% per year)
pub const SURVIVOR_REDUCTION_RATE: f64 = 0.00396;

/// Cap on the total survivor-benefit reduction (28.5%, reached when claimed at 60)
pub const SURVIVOR_MAX_REDUCTION: f64 = 0.285;

/// Full Retirement Age as (years, months) for a birth year.
///
/// Clamped to (65, 0) for 1937 and earlier and (67, 0) for 1960 and later.
pub fn full_retirement_age(birth_year: i32) -> (u32, u32) {
    match birth_year {
        ..=1937 => (65, 0),
        1938 => (65, 2),
        1939 => (65, 4),
        1940 => (65, 6),
        1941 => (65, 8),
        1942 => (65, 10),
        1943..=1954 => (66, 0),
        1955 => (66, 2),
        1956 => (66, 4),
        1957 => (66, 6),
        1958 => (66, 8),
        1959 => (66, 10),
        _ => (67, 0),
    }
}

/// FRA for a birth year expressed in total months past the birth date.
pub fn full_retirement_age_months(birth_year: i32) -> u32 {
    let (years, months) = full_retirement_age(birth_year);
    years * 12 + months
}

/// Restricted application (file for spousal/ex-spousal only, own benefit
/// keeps growing) is grandfathered for births before January 2, 1954.
pub fn restricted_application_allowed(birth_date: NaiveDate) -> bool {
    match birth_date.year() {
        y if y < 1954 => true,
        1954 => birth_date.month() == 1 && birth_date.day() == 1,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fra_table_values() {
        assert_eq!(full_retirement_age(1937), (65, 0));
        assert_eq!(full_retirement_age(1938), (65, 2));
        assert_eq!(full_retirement_age(1942), (65, 10));
        assert_eq!(full_retirement_age(1943), (66, 0));
        assert_eq!(full_retirement_age(1954), (66, 0));
        assert_eq!(full_retirement_age(1955), (66, 2));
        assert_eq!(full_retirement_age(1959), (66, 10));
        assert_eq!(full_retirement_age(1960), (67, 0));
    }

    #[test]
    fn test_fra_clamped_outside_table() {
        assert_eq!(full_retirement_age(1900), (65, 0));
        assert_eq!(full_retirement_age(1975), (67, 0));
        assert_eq!(full_retirement_age(2001), (67, 0));
    }

    #[test]
    fn test_fra_monotonically_non_decreasing() {
        let mut previous = 0;
        for birth_year in 1930..=1980 {
            let months = full_retirement_age_months(birth_year);
            assert!(
                months >= previous,
                "FRA decreased at birth year {}: {} -> {}",
                birth_year,
                previous,
                months
            );
            previous = months;
        }
    }

    #[test]
    fn test_fra_months_total() {
        assert_eq!(full_retirement_age_months(1957), 66 * 12 + 6);
        assert_eq!(full_retirement_age_months(1960), 804);
    }

    #[test]
    fn test_rate_constants_are_exact_fractions() {
        assert!((EARLY_REDUCTION_RATE_FIRST_36 * 36.0 - 0.20).abs() < 1e-12);
        assert!((EARLY_REDUCTION_RATE_BEYOND_36 * 24.0 - 0.10).abs() < 1e-12);
        assert!((DELAYED_CREDIT_RATE * 12.0 - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_restricted_application_cutoff() {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert!(restricted_application_allowed(date(1953, 12, 31)));
        assert!(restricted_application_allowed(date(1954, 1, 1)));
        assert!(!restricted_application_allowed(date(1954, 1, 2)));
        assert!(!restricted_application_allowed(date(1954, 6, 1)));
        assert!(!restricted_application_allowed(date(1960, 1, 1)));
    }
}
