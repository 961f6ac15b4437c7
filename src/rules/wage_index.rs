//! National Average Wage Index, taxable-maximum, and bend-point tables
//!
//! Published SSA schedules used by the earnings-record PIA engine. Lookups
//! are by calendar year; each table documents its own out-of-range behavior.

/// Marginal PIA replacement factors for the three AIME brackets
pub const PIA_FACTORS: [f64; 3] = [0.90, 0.32, 0.15];

/// National Average Wage Index by year
const AVERAGE_WAGE_INDEX: &[(i32, f64)] = &[
    (2017, 50_321.89),
    (2018, 52_145.80),
    (2019, 54_099.99),
    (2020, 55_628.60),
    (2021, 60_575.07),
    (2022, 63_795.13),
    (2023, 66_621.33),
    (2024, 70_000.00),
];

/// Social Security taxable wage base by year
const TAXABLE_MAXIMUM: &[(i32, f64)] = &[
    (1980, 25_900.0),
    (1981, 29_700.0),
    (1982, 32_400.0),
    (1983, 35_700.0),
    (1984, 37_800.0),
    (1985, 39_600.0),
    (1986, 42_000.0),
    (1987, 43_800.0),
    (1988, 45_000.0),
    (1989, 48_000.0),
    (1990, 51_300.0),
    (1991, 53_400.0),
    (1992, 55_500.0),
    (1993, 57_600.0),
    (1994, 60_600.0),
    (1995, 61_200.0),
    (1996, 62_700.0),
    (1997, 65_400.0),
    (1998, 68_400.0),
    (1999, 72_600.0),
    (2000, 76_200.0),
    (2001, 80_400.0),
    (2002, 84_900.0),
    (2003, 87_000.0),
    (2004, 87_900.0),
    (2005, 90_000.0),
    (2006, 94_200.0),
    (2007, 97_500.0),
    (2008, 102_000.0),
    (2009, 106_800.0),
    (2010, 106_800.0),
    (2011, 106_800.0),
    (2012, 110_100.0),
    (2013, 113_700.0),
    (2014, 117_000.0),
    (2015, 118_500.0),
    (2016, 118_500.0),
    (2017, 127_200.0),
    (2018, 128_400.0),
    (2019, 132_900.0),
    (2020, 137_700.0),
    (2021, 142_800.0),
    (2022, 147_000.0),
    (2023, 160_200.0),
    (2024, 168_600.0),
    (2025, 176_100.0),
];

/// PIA formula bend points (first, second) by eligibility year
const BEND_POINTS: &[(i32, (f64, f64))] = &[
    (2019, (926.0, 5_583.0)),
    (2020, (960.0, 5_785.0)),
    (2021, (996.0, 6_002.0)),
    (2022, (1_024.0, 6_172.0)),
    (2023, (1_115.0, 6_721.0)),
    (2024, (1_174.0, 7_078.0)),
    (2025, (1_226.0, 7_391.0)),
];

/// Average wage index for a year. `None` when the year is outside the
/// published table; callers treat that as an indexing factor of 1.0.
pub fn awi_for(year: i32) -> Option<f64> {
    AVERAGE_WAGE_INDEX
        .iter()
        .find(|(y, _)| *y == year)
        .map(|(_, awi)| *awi)
}

/// Taxable wage base for a year. Years past the table use the latest base;
/// years before 1980 are uncapped and return `None`.
pub fn taxable_maximum_for(year: i32) -> Option<f64> {
    if let Some((_, cap)) = TAXABLE_MAXIMUM.iter().find(|(y, _)| *y == year) {
        return Some(*cap);
    }
    match TAXABLE_MAXIMUM.last() {
        Some((latest, cap)) if year > *latest => Some(*cap),
        _ => None,
    }
}

/// Bend points for an eligibility year, clamped to the table range.
pub fn bend_points_for(year: i32) -> (f64, f64) {
    let clamped = year.clamp(BEND_POINTS[0].0, BEND_POINTS[BEND_POINTS.len() - 1].0);
    BEND_POINTS
        .iter()
        .find(|(y, _)| *y == clamped)
        .map(|(_, points)| *points)
        .unwrap_or(BEND_POINTS[BEND_POINTS.len() - 1].1)
}
