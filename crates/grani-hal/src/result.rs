//! Measurement results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Measurement counts keyed by outcome bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `count` observations of `outcome`.
    pub fn insert(&mut self, outcome: impl Into<String>, count: u64) {
        *self.0.entry(outcome.into()).or_default() += count;
    }

    /// Count for one outcome, zero when never observed.
    pub fn get(&self, outcome: &str) -> u64 {
        self.0.get(outcome).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether no outcomes were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total observations across all outcomes.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Outcomes ordered by descending count, ties by bitstring.
    pub fn sorted_descending(&self) -> Vec<(String, u64)> {
        let mut pairs: Vec<(String, u64)> =
            self.0.iter().map(|(k, &v)| (k.clone(), v)).collect();
        pairs.sort_by(|(ka, va), (kb, vb)| vb.cmp(va).then(ka.cmp(kb)));
        pairs
    }

    /// The most frequent outcome, if any.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.0
            .iter()
            .max_by(|(ka, va), (kb, vb)| va.cmp(vb).then(kb.cmp(ka)))
            .map(|(k, &v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (outcome, count) in iter {
            counts.insert(outcome, count);
        }
        counts
    }
}

/// Result of one executed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Shots that were executed.
    pub shots: u32,
}

impl ExecutionResult {
    /// Create a result from counts and the executed shot count.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self { counts, shots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Counts {
        [
            ("000".to_string(), 480),
            ("111".to_string(), 500),
            ("010".to_string(), 20),
            ("101".to_string(), 20),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_sorted_descending() {
        let sorted = sample().sorted_descending();
        assert_eq!(
            sorted,
            vec![
                ("111".to_string(), 500),
                ("000".to_string(), 480),
                ("010".to_string(), 20),
                ("101".to_string(), 20),
            ]
        );
    }

    #[test]
    fn test_most_frequent_and_totals() {
        let counts = sample();
        assert_eq!(counts.most_frequent(), Some(("111", 500)));
        assert_eq!(counts.total_shots(), 1020);
        assert_eq!(counts.get("000"), 480);
        assert_eq!(counts.get("001"), 0);
    }

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 4);
        assert_eq!(counts.get("01"), 7);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_empty_counts() {
        let counts = Counts::new();
        assert!(counts.is_empty());
        assert_eq!(counts.most_frequent(), None);
        assert_eq!(counts.total_shots(), 0);
    }
}
