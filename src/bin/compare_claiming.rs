//! Compare claiming ages across longevity assumptions for sample cohorts
//!
//! Usage: cargo run --bin compare_claiming

use chrono::NaiveDate;
use ss_optimizer::person::{ClaimingScenario, PersonBenefitProfile};
use ss_optimizer::IndividualCalculator;
use std::fs::File;
use std::io::Write;

const INFLATION_RATE: f64 = 0.025;

/// Lifetime totals for one longevity assumption across the three claiming ages
struct GridRow {
    longevity_age: u32,
    claim_62: f64,
    claim_fra: f64,
    claim_70: f64,
}

fn main() {
    let cohorts = vec![
        ("cohort_1957", NaiveDate::from_ymd_opt(1957, 3, 15).unwrap(), 2750.0),
        ("cohort_1964", NaiveDate::from_ymd_opt(1964, 7, 1).unwrap(), 1900.0),
    ];

    for (label, birth_date, pia) in cohorts {
        println!("\n{}", "=".repeat(60));
        println!("Client {}", label);
        println!("{}", "=".repeat(60));

        let calculator = IndividualCalculator::new(PersonBenefitProfile::new(birth_date, pia));
        let fra_years = calculator.profile.fra_years;
        let fra_months = calculator.profile.fra_months;
        println!(
            "  Born: {}, PIA: ${:.0}, FRA: {} years {} months",
            birth_date, pia, fra_years, fra_months
        );

        let rows: Vec<GridRow> = (70..=100)
            .map(|longevity_age| GridRow {
                longevity_age,
                claim_62: lifetime_total(&calculator, 62, 0, longevity_age),
                claim_fra: lifetime_total(&calculator, fra_years, fra_months, longevity_age),
                claim_70: lifetime_total(&calculator, 70, 0, longevity_age),
            })
            .collect();

        let grid_path = format!("claiming_grid_{}.csv", label);
        write_grid_output(&grid_path, &rows);
        println!("  Grid written to: {}", grid_path);

        print_crossover(&calculator, &rows);
    }
}

fn lifetime_total(
    calculator: &IndividualCalculator,
    age_years: u32,
    age_months: u32,
    longevity_age: u32,
) -> f64 {
    calculator
        .lifetime_benefits(
            ClaimingScenario::new(age_years, age_months, INFLATION_RATE),
            longevity_age,
        )
        .total_lifetime_benefits
}

fn best_claim_age(row: &GridRow) -> &'static str {
    if row.claim_70 >= row.claim_fra && row.claim_70 >= row.claim_62 {
        "70"
    } else if row.claim_fra >= row.claim_62 {
        "FRA"
    } else {
        "62"
    }
}

fn write_grid_output(path: &str, rows: &[GridRow]) {
    let mut file = File::create(path).expect("Failed to create output file");

    writeln!(file, "LongevityAge,ClaimAt62,ClaimAtFRA,ClaimAt70,Best").unwrap();

    for row in rows {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2},{}",
            row.longevity_age,
            row.claim_62,
            row.claim_fra,
            row.claim_70,
            best_claim_age(row),
        )
        .unwrap();
    }
}

fn print_crossover(calculator: &IndividualCalculator, rows: &[GridRow]) {
    println!("\n  Lifetime totals by longevity (first crossover highlighted):");
    println!(
        "  {:<9} {:>14} {:>14} {:>14} {:>6}",
        "Longevity", "ClaimAt62", "ClaimAtFRA", "ClaimAt70", "Best"
    );
    println!("  {:-<63}", "");

    let mut crossover_found = false;

    for row in rows {
        let delay_wins = row.claim_70 > row.claim_62;
        let is_crossover = delay_wins && !crossover_found;

        if is_crossover || row.longevity_age % 5 == 0 {
            let marker = if is_crossover { ">>>" } else { "   " };
            println!(
                "{} {:<9} {:>14.0} {:>14.0} {:>14.0} {:>6}",
                marker,
                row.longevity_age,
                row.claim_62,
                row.claim_fra,
                row.claim_70,
                best_claim_age(row),
            );
        }

        if is_crossover {
            crossover_found = true;

            // Detailed breakdown at the longevity where delaying first wins
            let at_62 = calculator.lifetime_benefits(
                ClaimingScenario::new(62, 0, INFLATION_RATE),
                row.longevity_age,
            );
            let at_70 = calculator.lifetime_benefits(
                ClaimingScenario::new(70, 0, INFLATION_RATE),
                row.longevity_age,
            );

            println!("\n  === BREAKDOWN AT LONGEVITY {} ===", row.longevity_age);
            println!(
                "  {:28} {:>15} {:>15} {:>15}",
                "Field", "ClaimAt62", "ClaimAt70", "Diff"
            );
            println!("  {:-<75}", "");
            println!(
                "  {:28} {:>15.2} {:>15.2} {:>15.2}",
                "Initial monthly",
                at_62.initial_monthly_benefit,
                at_70.initial_monthly_benefit,
                at_70.initial_monthly_benefit - at_62.initial_monthly_benefit
            );
            println!(
                "  {:28} {:>15.2} {:>15.2} {:>15.2}",
                "Final monthly",
                at_62.final_monthly_benefit,
                at_70.final_monthly_benefit,
                at_70.final_monthly_benefit - at_62.final_monthly_benefit
            );
            println!(
                "  {:28} {:>15} {:>15} {:>15}",
                "Years of benefits",
                at_62.years_of_benefits,
                at_70.years_of_benefits,
                at_70.years_of_benefits - at_62.years_of_benefits
            );
            println!(
                "  {:28} {:>15.0} {:>15.0} {:>15.0}",
                "Lifetime total",
                at_62.total_lifetime_benefits,
                at_70.total_lifetime_benefits,
                at_70.total_lifetime_benefits - at_62.total_lifetime_benefits
            );
            println!();
        }
    }

    if !crossover_found {
        let last = rows.last().map(|r| r.longevity_age).unwrap_or(0);
        println!(
            "\n  Claiming at 62 stays ahead through longevity {}",
            last
        );
    }
}
