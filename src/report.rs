//! Console report printing for the analysis results
//!
//! Output here is diagnostic only; nothing downstream parses it.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;

/// Print raw vs. filtered dataset shapes.
pub fn print_dataset_overview(raw: &DataFrame, filtered: &DataFrame) {
    println!("Raw data shape: {:?}", raw.shape());
    println!("Cleaned data shape: {:?}", filtered.shape());
    let dropped = raw.height() - filtered.height();
    if dropped > 0 {
        println!("({dropped} rows removed by filtering)");
    }
}

/// Print the loyalty segmentation head.
pub fn print_loyalty(loyal: &DataFrame, min_purchases: u32, preview_rows: usize) {
    println!(
        "\nLoyal customers (>= {} purchases): {}",
        min_purchases,
        loyal.height()
    );
    println!("{}", loyal.head(Some(preview_rows)));
}

/// Print revenue per quarter. Quarters absent from the data are absent
/// from the table.
pub fn print_quarterly_revenue(quarterly: &DataFrame) {
    println!("\nQuarterly revenue:");
    println!("{quarterly}");
}

/// Print the demand ranking.
pub fn print_high_demand(ranked: &DataFrame, top_n: usize) {
    println!("\nTop {} products by total quantity sold:", top_n);
    println!("{ranked}");
}

/// Print the purchase-pattern summary head.
pub fn print_purchase_patterns(patterns: &DataFrame, preview_rows: usize) {
    println!(
        "\nPurchase patterns ({} products, first {}):",
        patterns.height(),
        preview_rows
    );
    println!("{}", patterns.head(Some(preview_rows)));
}

/// Print the conceptual-question answer key.
pub fn print_conceptual_answers(answers: &BTreeMap<&'static str, BTreeSet<&'static str>>) {
    println!("\nConceptual question answers:");
    for (question, answer) in answers {
        let labels: Vec<&str> = answer.iter().copied().collect();
        println!("  {}: {}", question, labels.join(", "));
    }
}
