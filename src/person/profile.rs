//! Person-level benefit profile and claiming-scenario inputs

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::rules::{full_retirement_age, round1};

/// Marital situation that selects which calculator applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    /// Never married or no relationship-based benefits in play
    Single,
    /// Currently married; spousal top-ups may apply
    Married,
    /// Divorced after a marriage of 10+ years; ex-spouse benefits may apply
    Divorced,
    /// Surviving spouse; survivor benefits and crossover strategies apply
    Widowed,
}

impl ClientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::Single => "single",
            ClientType::Married => "married",
            ClientType::Divorced => "divorced",
            ClientType::Widowed => "widowed",
        }
    }
}

/// Core per-person state shared by every calculator: date of birth, the
/// Primary Insurance Amount at Full Retirement Age, and the derived FRA
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonBenefitProfile {
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Monthly Primary Insurance Amount payable at FRA, in today's dollars
    pub pia: f64,
    /// Birth year, the key into the FRA schedule
    pub birth_year: i32,
    /// FRA whole years
    pub fra_years: u32,
    /// FRA extra months past the whole years
    pub fra_months: u32,
    /// Exact date unreduced benefits become available
    pub fra_date: NaiveDate,
}

impl PersonBenefitProfile {
    pub fn new(birth_date: NaiveDate, pia: f64) -> Self {
        let birth_year = birth_date.year();
        let (fra_years, fra_months) = full_retirement_age(birth_year);
        let fra_date = add_months(birth_date, fra_years * 12 + fra_months);
        PersonBenefitProfile {
            birth_date,
            pia,
            birth_year,
            fra_years,
            fra_months,
            fra_date,
        }
    }

    /// Exact age in whole calendar months at a target date.
    pub fn age_in_months(&self, target: NaiveDate) -> i32 {
        months_between(self.birth_date, target)
    }

    /// Date benefits start for a claiming age given as years plus extra months.
    pub fn claiming_date(&self, age_years: u32, age_months: u32) -> NaiveDate {
        add_months(self.birth_date, age_years * 12 + age_months)
    }

    /// Date of the birthday at a whole-year age.
    pub fn date_at_age(&self, age_years: u32) -> NaiveDate {
        add_months(self.birth_date, age_years * 12)
    }

    /// Age at a date on a day-count basis, unrounded.
    pub fn age_years_at(&self, target: NaiveDate) -> f64 {
        (target - self.birth_date).num_days() as f64 / 365.25
    }

    /// Age at a date, rounded to one decimal for display fields.
    pub fn age_at(&self, target: NaiveDate) -> f64 {
        round1(self.age_years_at(target))
    }

    /// FRA as fractional years; 66 and 8 months reads as 66.667.
    pub fn fra_as_years(&self) -> f64 {
        f64::from(self.fra_years) + f64::from(self.fra_months) / 12.0
    }

    /// Date the person turns 70. Delayed credits stop accruing here.
    pub fn age_70_date(&self) -> NaiveDate {
        self.date_at_age(70)
    }
}

/// A claiming decision: the age benefits start (years plus extra months)
/// and the annual COLA assumption used to grow benefits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClaimingScenario {
    /// Claiming age, whole years
    pub age_years: u32,
    /// Extra months past the birthday, 0-11
    pub age_months: u32,
    /// Assumed annual cost-of-living adjustment
    pub inflation_rate: f64,
}

impl ClaimingScenario {
    pub fn new(age_years: u32, age_months: u32, inflation_rate: f64) -> Self {
        ClaimingScenario {
            age_years,
            age_months,
            inflation_rate,
        }
    }

    /// Scenario claiming exactly on a birthday.
    pub fn at_age(age_years: u32, inflation_rate: f64) -> Self {
        ClaimingScenario::new(age_years, 0, inflation_rate)
    }
}

impl Default for ClaimingScenario {
    /// Earliest claiming age with the standard long-run COLA assumption.
    fn default() -> Self {
        ClaimingScenario::new(62, 0, 0.025)
    }
}

/// Add whole months to a date. The day of month clamps to the end of a
/// shorter month, so Jan 31 plus one month is Feb 28 (or 29).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date + Months::new(months)
}

/// Whole calendar months from `from` to `to`. A partial month does not
/// count: the 10th to the 9th of the next month is zero. Callers pass
/// `from <= to`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_profile_derives_fra_fields() {
        let profile = PersonBenefitProfile::new(date(1960, 3, 15), 2500.0);
        assert_eq!(profile.birth_year, 1960);
        assert_eq!(profile.fra_years, 67);
        assert_eq!(profile.fra_months, 0);
        assert_eq!(profile.fra_date, date(2027, 3, 15));
    }

    #[test]
    fn test_profile_fractional_fra() {
        // Born 1957: FRA is 66 and 6 months
        let profile = PersonBenefitProfile::new(date(1957, 1, 10), 2000.0);
        assert_eq!(profile.fra_years, 66);
        assert_eq!(profile.fra_months, 6);
        assert_eq!(profile.fra_date, date(2023, 7, 10));
        assert!((profile.fra_as_years() - 66.5).abs() < 1e-12);
    }

    #[test]
    fn test_claiming_date() {
        let profile = PersonBenefitProfile::new(date(1963, 6, 1), 3000.0);
        assert_eq!(profile.claiming_date(62, 0), date(2025, 6, 1));
        assert_eq!(profile.claiming_date(62, 7), date(2026, 1, 1));
        assert_eq!(profile.claiming_date(70, 0), date(2033, 6, 1));
    }

    #[test]
    fn test_age_70_date() {
        let profile = PersonBenefitProfile::new(date(1958, 11, 20), 1800.0);
        assert_eq!(profile.age_70_date(), date(2028, 11, 20));
    }

    #[test]
    fn test_age_in_months_counts_whole_months_only() {
        let profile = PersonBenefitProfile::new(date(1960, 5, 10), 2500.0);
        assert_eq!(profile.age_in_months(date(2022, 5, 10)), 744);
        // One day short of the monthly anniversary
        assert_eq!(profile.age_in_months(date(2022, 5, 9)), 743);
        assert_eq!(profile.age_in_months(date(2022, 6, 9)), 744);
    }

    #[test]
    fn test_age_at_one_decimal() {
        let profile = PersonBenefitProfile::new(date(1960, 1, 1), 2500.0);
        assert!((profile.age_at(date(2025, 1, 1)) - 65.0).abs() < 1e-9);
        assert!((profile.age_at(date(2025, 7, 1)) - 65.5).abs() < 1e-9);
    }

    #[test]
    fn test_add_months_clamps_short_months() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 3, 31), 1), date(2025, 4, 30));
        assert_eq!(add_months(date(2025, 1, 15), 24), date(2027, 1, 15));
    }

    #[test]
    fn test_months_between() {
        assert_eq!(months_between(date(2025, 1, 15), date(2025, 1, 15)), 0);
        assert_eq!(months_between(date(2025, 1, 15), date(2025, 2, 14)), 0);
        assert_eq!(months_between(date(2025, 1, 15), date(2025, 2, 15)), 1);
        assert_eq!(months_between(date(2025, 1, 15), date(2026, 1, 15)), 12);
        assert_eq!(months_between(date(2023, 11, 30), date(2024, 2, 29)), 2);
    }

    #[test]
    fn test_client_type_round_trips_snake_case() {
        let json = serde_json::to_string(&ClientType::Divorced).unwrap();
        assert_eq!(json, "\"divorced\"");
        let parsed: ClientType = serde_json::from_str("\"widowed\"").unwrap();
        assert_eq!(parsed, ClientType::Widowed);
        assert_eq!(ClientType::Married.as_str(), "married");
    }

    #[test]
    fn test_default_scenario() {
        let scenario = ClaimingScenario::default();
        assert_eq!(scenario.age_years, 62);
        assert_eq!(scenario.age_months, 0);
        assert!((scenario.inflation_rate - 0.025).abs() < 1e-12);
    }
}
