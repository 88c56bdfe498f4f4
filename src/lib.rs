//! TrendForge: A Rust CLI application for retail behavior-trend reporting
//!
//! This library provides descriptive statistics over retail transaction data:
//! loyalty segmentation, quarterly revenue rollups, demand ranking, and
//! per-product purchase-pattern summaries.

pub mod analysis;
pub mod cli;
pub mod data;
pub mod questions;
pub mod report;

// Re-export public items for easier access
pub use analysis::{high_demand_products, loyalty_customers, purchase_patterns, quarterly_revenue};
pub use cli::Args;
pub use data::{filter_data, import_data, with_derived_columns, ImportError};
pub use questions::answer_conceptual_questions;

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
