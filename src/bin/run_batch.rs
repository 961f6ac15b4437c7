//! Run claiming analyses for the whole client roster from clients.csv
//!
//! Outputs one summary row per client for advisor review

use ss_optimizer::person::{load_client_records, ClientType, DEFAULT_CLIENT_FILE};
use ss_optimizer::{AnalysisConfig, AnalysisRunner};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

fn main() {
    env_logger::init();

    let start = Instant::now();
    let roster_path =
        std::env::var("CLIENTS_CSV").unwrap_or_else(|_| DEFAULT_CLIENT_FILE.to_string());
    println!("Loading clients from {}...", roster_path);

    let records = load_client_records(&roster_path).expect("Failed to load client records");
    println!("Loaded {} clients in {:?}", records.len(), start.elapsed());

    let config = AnalysisConfig::from_env();
    println!(
        "Assumptions: valuation {}, longevity age {}, COLA {:.2}%",
        config.valuation_date,
        config.longevity_age,
        config.inflation_rate * 100.0
    );

    println!("Running analyses...");
    let run_start = Instant::now();
    let runner = AnalysisRunner::with_config(config);
    let summaries = runner.run_batch(&records);
    println!("Analyses complete in {:?}", run_start.elapsed());

    // Write output
    let output_path = "claiming_summaries.csv";
    let mut file = File::create(output_path).expect("Failed to create output file");

    writeln!(
        file,
        "ClientId,ClientType,Eligible,StrategyCount,OptimalStrategy,OptimalMonthly,OptimalLifetimeTotal"
    )
    .unwrap();

    for row in &summaries {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            row.client_id,
            row.client_type.as_str(),
            row.eligible,
            row.strategy_count,
            row.optimal_label.as_deref().unwrap_or(""),
            row.optimal_monthly
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
            row.optimal_lifetime_total
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
        )
        .unwrap();
    }

    println!("Output written to {}", output_path);

    // Print summary stats
    let count_of = |t: ClientType| summaries.iter().filter(|s| s.client_type == t).count();
    let eligible_count = summaries.iter().filter(|s| s.eligible).count();
    let combined_lifetime: f64 = summaries
        .iter()
        .filter_map(|s| s.optimal_lifetime_total)
        .sum();
    let top = summaries
        .iter()
        .filter(|s| s.optimal_lifetime_total.is_some())
        .max_by(|a, b| {
            a.optimal_lifetime_total
                .unwrap_or(0.0)
                .total_cmp(&b.optimal_lifetime_total.unwrap_or(0.0))
        });

    println!("\nRoster Summary:");
    println!(
        "  Clients: {} ({} single, {} married, {} divorced, {} widowed)",
        summaries.len(),
        count_of(ClientType::Single),
        count_of(ClientType::Married),
        count_of(ClientType::Divorced),
        count_of(ClientType::Widowed),
    );
    println!("  Relationship-benefit eligible: {}", eligible_count);
    println!("  Combined optimal lifetime benefits: ${:.0}", combined_lifetime);
    if let Some(best) = top {
        println!(
            "  Largest plan: {} at ${:.0} ({})",
            best.client_id,
            best.optimal_lifetime_total.unwrap_or(0.0),
            best.optimal_label.as_deref().unwrap_or("n/a"),
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
}
