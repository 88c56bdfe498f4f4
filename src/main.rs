//! TrendForge: behavior-trend reporting over retail transaction data
//!
//! This is the main entrypoint that orchestrates data loading, filtering,
//! aggregation, and report printing.

use anyhow::Result;
use clap::Parser;
use std::time::Instant;
use trendforge::{
    answer_conceptual_questions, filter_data, high_demand_products, import_data,
    loyalty_customers, purchase_patterns, quarterly_revenue, report, Args,
};

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        println!("TrendForge - Retail Behavior Trends Report");
        println!("==========================================\n");
    }

    let start_time = Instant::now();

    // Step 1: Load the dataset
    if args.verbose {
        println!("Step 1: Loading data");
        println!("  Input file: {}", args.input);
    }
    let load_start = Instant::now();
    let raw = import_data(&args.input)?;
    if args.verbose {
        println!("  Loading time: {:.2}s", load_start.elapsed().as_secs_f64());
    }

    // Step 2: Filter out invalid rows
    if args.verbose {
        println!("\nStep 2: Filtering invalid rows");
    }
    let clean = filter_data(&raw)?;
    report::print_dataset_overview(&raw, &clean);

    // Step 3: Loyalty segmentation
    let loyal = loyalty_customers(&clean, args.min_purchases)?;
    report::print_loyalty(&loyal, args.min_purchases, args.preview_rows);

    // Step 4: Quarterly revenue rollup
    let quarterly = quarterly_revenue(&clean)?;
    report::print_quarterly_revenue(&quarterly);

    // Step 5: High-demand product ranking
    let ranked = high_demand_products(&clean, args.top_n)?;
    report::print_high_demand(&ranked, args.top_n);

    // Step 6: Purchase-pattern summary
    let patterns = purchase_patterns(&clean)?;
    report::print_purchase_patterns(&patterns, args.preview_rows);

    // Step 7: Conceptual answer key
    let answers = answer_conceptual_questions();
    report::print_conceptual_answers(&answers);

    if args.verbose {
        println!(
            "\nTotal processing time: {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}
