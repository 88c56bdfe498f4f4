//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Retail behavior-trend report CLI over transaction data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input file (.csv or .xlsx)
    #[arg(short, long, default_value = "data.csv")]
    pub input: String,

    /// Minimum transaction count for a customer to be considered loyal
    #[arg(short, long, default_value = "100")]
    pub min_purchases: u32,

    /// Number of top products to rank by total quantity sold
    #[arg(short, long, default_value = "10")]
    pub top_n: usize,

    /// Number of rows to show in result previews
    #[arg(short, long, default_value = "5")]
    pub preview_rows: usize,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
