//! Fixed answer key for the conceptual questions accompanying the report

use std::collections::{BTreeMap, BTreeSet};

/// Answers to the five conceptual questions (Q1-Q5). Pure lookup table;
/// the values are fixed and never computed.
pub fn answer_conceptual_questions() -> BTreeMap<&'static str, BTreeSet<&'static str>> {
    BTreeMap::from([
        ("Q1", BTreeSet::from(["A"])), // Data entry errors affect calculations
        ("Q2", BTreeSet::from(["B"])), // Quarterly aggregation reveals seasonal trends
        ("Q3", BTreeSet::from(["C"])), // Loyal customers are easier to retain
        ("Q4", BTreeSet::from(["A"])), // Optimize pricing strategies based on demand
        ("Q5", BTreeSet::from(["A"])), // Total quantity sold best shows demand trends
    ])
}
