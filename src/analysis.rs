//! Group-by aggregations over the filtered transaction dataset
//!
//! Every function here takes the filtered frame read-only and returns a
//! fresh result frame. Groupings are stable, so ties keep the order in
//! which groups first appear in the input.

use polars::prelude::*;

use crate::data::with_derived_columns;

/// Customers with at least `min_purchases` transactions, as a frame of
/// (`CustomerID`, `purchase_count`) sorted by count descending. A
/// threshold of 0 returns every customer present.
pub fn loyalty_customers(df: &DataFrame, min_purchases: u32) -> crate::Result<DataFrame> {
    let loyal = df
        .clone()
        .lazy()
        .group_by_stable([col("CustomerID")])
        .agg([len().cast(DataType::Int64).alias("purchase_count")])
        .filter(col("purchase_count").gt_eq(lit(min_purchases as i64)))
        .sort(
            ["purchase_count"],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;
    Ok(loyal)
}

/// Total revenue per calendar quarter, as a frame of (`quarter`,
/// `total_revenue`) sorted by quarter ascending. Quarters with no
/// transactions are omitted rather than zero-filled; callers needing all
/// four quarters must fill the gaps themselves.
pub fn quarterly_revenue(df: &DataFrame) -> crate::Result<DataFrame> {
    let derived = with_derived_columns(df)?;
    let quarterly = derived
        .lazy()
        .group_by_stable([col("quarter")])
        .agg([col("revenue").sum().alias("total_revenue")])
        .sort(["quarter"], SortMultipleOptions::default())
        .collect()?;
    Ok(quarterly)
}

/// The `top_n` products by total quantity sold, as a frame of
/// (`Description`, `total_quantity`) in descending order. Asking for more
/// products than exist returns all of them; `top_n` of 0 returns an empty
/// frame.
pub fn high_demand_products(df: &DataFrame, top_n: usize) -> crate::Result<DataFrame> {
    let limit: IdxSize = top_n.try_into().unwrap_or(IdxSize::MAX);
    let ranked = df
        .clone()
        .lazy()
        .group_by_stable([col("Description")])
        .agg([col("Quantity").sum().alias("total_quantity")])
        .sort(
            ["total_quantity"],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(limit)
        .collect()?;
    Ok(ranked)
}

/// Mean quantity and unit price per product, as a frame of (`product`,
/// `avg_quantity`, `avg_unit_price`) sorted ascending by product name.
pub fn purchase_patterns(df: &DataFrame) -> crate::Result<DataFrame> {
    let patterns = df
        .clone()
        .lazy()
        .group_by_stable([col("Description")])
        .agg([
            col("Quantity").mean().alias("avg_quantity"),
            col("UnitPrice").mean().alias("avg_unit_price"),
        ])
        .select([
            col("Description").alias("product"),
            col("avg_quantity"),
            col("avg_unit_price"),
        ])
        .sort(["product"], SortMultipleOptions::default())
        .collect()?;
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime_column(name: &str, dates: &[(i32, u32, u32)]) -> Column {
        let micros: Vec<i64> = dates
            .iter()
            .map(|&(y, m, d)| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc()
                    .timestamp_micros()
            })
            .collect();
        Int64Chunked::from_vec(name.into(), micros)
            .into_datetime(TimeUnit::Microseconds, None)
            .into_column()
    }

    /// Three customers, three products, purchases spread over Q1/Q2/Q4.
    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "CustomerID".into(),
                &[Some(1i64), Some(1), Some(2), Some(2), Some(3)],
            )
            .into_column(),
            Series::new(
                "Description".into(),
                &["MUG", "MUG", "LANTERN", "MUG", "CANDLE"],
            )
            .into_column(),
            Series::new("Quantity".into(), &[5i64, 3, 2, 1, 4]).into_column(),
            Series::new("UnitPrice".into(), &[2.0f64, 2.0, 10.0, 3.0, 1.5]).into_column(),
            datetime_column(
                "InvoiceDate",
                &[
                    (2011, 2, 10),
                    (2011, 5, 10),
                    (2011, 5, 20),
                    (2011, 11, 2),
                    (2011, 12, 24),
                ],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_loyalty_threshold_filters_and_sorts() {
        let df = sample_frame();
        let loyal = loyalty_customers(&df, 2).unwrap();

        assert_eq!(loyal.height(), 2);
        let ids: Vec<i64> = loyal
            .column("CustomerID")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let counts: Vec<i64> = loyal
            .column("purchase_count")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        // Customers 1 and 2 tie at two purchases; first appearance wins.
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn test_loyalty_zero_threshold_returns_every_customer() {
        let df = sample_frame();
        let loyal = loyalty_customers(&df, 0).unwrap();

        let mut ids: Vec<i64> = loyal
            .column("CustomerID")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_quarterly_revenue_omits_empty_quarters() {
        let df = sample_frame();
        let quarterly = quarterly_revenue(&df).unwrap();

        let quarters: Vec<i32> = quarterly
            .column("quarter")
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let revenue: Vec<f64> = quarterly
            .column("total_revenue")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();

        // No Q3 transactions, so no Q3 row.
        assert_eq!(quarters, vec![1, 2, 4]);
        assert!((revenue[0] - 10.0).abs() < 1e-9); // 5 * 2.0
        assert!((revenue[1] - 26.0).abs() < 1e-9); // 3 * 2.0 + 2 * 10.0
        assert!((revenue[2] - 9.0).abs() < 1e-9); // 1 * 3.0 + 4 * 1.5
    }

    #[test]
    fn test_quarterly_revenue_is_conserved() {
        let df = sample_frame();
        let quarterly = quarterly_revenue(&df).unwrap();

        let partitioned: f64 = quarterly
            .column("total_revenue")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .sum();

        let derived = with_derived_columns(&df).unwrap();
        let total: f64 = derived
            .column("revenue")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .sum();

        assert!((partitioned - total).abs() < 1e-9);
    }

    #[test]
    fn test_high_demand_ranking() {
        let df = sample_frame();
        let ranked = high_demand_products(&df, 2).unwrap();

        assert_eq!(ranked.height(), 2);
        let products: Vec<&str> = ranked
            .column("Description")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let totals: Vec<i64> = ranked
            .column("total_quantity")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(products, vec!["MUG", "CANDLE"]);
        assert_eq!(totals, vec![9, 4]);
    }

    #[test]
    fn test_high_demand_clamps_to_available_products() {
        let df = sample_frame();
        assert_eq!(high_demand_products(&df, 50).unwrap().height(), 3);
        assert_eq!(high_demand_products(&df, 0).unwrap().height(), 0);
    }

    #[test]
    fn test_purchase_patterns_one_record_per_product() {
        let df = sample_frame();
        let patterns = purchase_patterns(&df).unwrap();

        assert_eq!(patterns.height(), 3);
        let products: Vec<&str> = patterns
            .column("product")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(products, vec!["CANDLE", "LANTERN", "MUG"]);

        let avg_qty: Vec<f64> = patterns
            .column("avg_quantity")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        let avg_price: Vec<f64> = patterns
            .column("avg_unit_price")
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert!((avg_qty[2] - 3.0).abs() < 1e-9); // MUG: (5 + 3 + 1) / 3
        assert!((avg_price[2] - 7.0 / 3.0).abs() < 1e-9);
        assert!((avg_price[1] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_yields_empty_results() {
        let df = sample_frame();
        let empty = df
            .clone()
            .lazy()
            .filter(col("Quantity").lt(lit(0)))
            .collect()
            .unwrap();

        assert_eq!(loyalty_customers(&empty, 0).unwrap().height(), 0);
        assert_eq!(quarterly_revenue(&empty).unwrap().height(), 0);
        assert_eq!(high_demand_products(&empty, 5).unwrap().height(), 0);
        assert_eq!(purchase_patterns(&empty).unwrap().height(), 0);
    }
}
