//! Claiming-strategy CLI
//!
//! Compares claiming ages for one client, reports the value of waiting one
//! more month, and writes the winning strategy's year-by-year timeline to CSV

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use std::fs::File;
use std::io::Write;

use ss_optimizer::person::ClaimingScenario;
use ss_optimizer::{IndividualCalculator, LifetimeBenefitResult, PersonBenefitProfile};

#[derive(Parser, Debug)]
#[command(
    name = "ss_optimizer",
    about = "Social Security claiming-strategy comparison",
    version
)]
struct Cli {
    /// Client date of birth (YYYY-MM-DD)
    #[arg(long, default_value = "1963-01-01")]
    birth_date: NaiveDate,

    /// Primary Insurance Amount at full retirement age
    #[arg(long, default_value_t = 4000.0)]
    pia: f64,

    /// Planning horizon as an age
    #[arg(long, default_value_t = 90)]
    longevity_age: u32,

    /// Annual COLA assumption
    #[arg(long, default_value_t = 0.025)]
    inflation_rate: f64,

    /// Output CSV for the best strategy's timeline
    #[arg(long, default_value = "claiming_timeline.csv")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Social Security Strategy Optimizer v0.1.0");
    println!("=========================================\n");

    let profile = PersonBenefitProfile::new(cli.birth_date, cli.pia);
    println!("Client born {}, PIA ${:.2}", profile.birth_date, profile.pia);
    println!(
        "  FRA: {} years {} months (reached {})",
        profile.fra_years, profile.fra_months, profile.fra_date
    );
    println!(
        "  Horizon: age {}, COLA {:.2}%\n",
        cli.longevity_age,
        cli.inflation_rate * 100.0
    );

    let calculator = IndividualCalculator::new(profile);

    println!(
        "{:>9} {:>12} {:>14} {:>11} {:>16}",
        "Claim age", "Monthly", "Final monthly", "Adjust %", "Lifetime total"
    );
    println!("{}", "-".repeat(66));

    let mut best: Option<(u32, LifetimeBenefitResult)> = None;
    for claiming_age in [62, calculator.profile.fra_years, 70] {
        if claiming_age > cli.longevity_age {
            continue;
        }
        let result = calculator.lifetime_benefits(
            ClaimingScenario::at_age(claiming_age, cli.inflation_rate),
            cli.longevity_age,
        );
        println!(
            "{:>9} {:>12.2} {:>14.2} {:>11.2} {:>16.2}",
            claiming_age,
            result.initial_monthly_benefit,
            result.final_monthly_benefit,
            calculator.adjustment_percent(claiming_age, cli.inflation_rate),
            result.total_lifetime_benefits,
        );
        let improves = best
            .as_ref()
            .map_or(true, |(_, b)| {
                result.total_lifetime_benefits > b.total_lifetime_benefits
            });
        if improves {
            best = Some((claiming_age, result));
        }
    }

    let (best_age, best_result) = best.context("no claiming age fits inside the longevity horizon")?;
    println!("\nBest claiming age for this horizon: {}", best_age);
    println!(
        "  ${:.2}/month from {}, ${:.2} lifetime",
        best_result.initial_monthly_benefit,
        best_result.claiming_date,
        best_result.total_lifetime_benefits
    );

    let wait = calculator.wait_one_month_analysis(best_age, 0, cli.longevity_age, cli.inflation_rate);
    println!(
        "  One more month of waiting: +${:.2}/month. {}",
        wait.monthly_increase, wait.recommendation
    );

    let mut file =
        File::create(&cli.output).with_context(|| format!("creating {}", cli.output))?;
    writeln!(file, "Year,Age,MonthlyBenefit,MonthsPaid,AnnualTotal,Phase")?;
    for entry in &best_result.annual_breakdown {
        writeln!(
            file,
            "{},{:.1},{:.2},{},{:.2},{}",
            entry.year,
            entry.age,
            entry.monthly_benefit,
            entry.months_paid,
            entry.annual_total,
            entry.phase.as_str(),
        )?;
    }
    println!("\nTimeline written to: {}", cli.output);

    Ok(())
}
