use crate::frequency::FrequencyTable;
use itertools::Itertools;
use serde_json::{Map, Value};

/// `(noun, count)` pairs sorted by count, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedView(Vec<(String, u32)>);

impl RankedView {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(w, c)| (w.as_str(), *c))
    }

    pub fn max_count(&self) -> u32 {
        self.0.first().map(|(_, c)| *c).unwrap_or(0)
    }
}

/// The `n` most frequent nouns. Equal counts keep the table's first-occurrence
/// order, so the ranking is deterministic.
pub fn top_n(table: &FrequencyTable, n: usize) -> RankedView {
    RankedView(
        table
            .iter()
            .sorted_by(|(_, a), (_, b)| b.cmp(a))
            .take(n)
            .map(|(w, c)| (w.to_string(), c))
            .collect(),
    )
}

/// Ordered JSON object `noun -> count` for structured display.
pub fn as_mapping(view: &RankedView) -> Map<String, Value> {
    view.iter()
        .map(|(w, c)| (w.to_string(), Value::from(c)))
        .collect()
}
