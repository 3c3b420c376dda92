//! Commit statistics

use relnotes_core::CommitCategory;
use serde::{Deserialize, Serialize};

use crate::types::CommitRecord;

/// Per-category commit counters.
///
/// The category counters always sum to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatistics {
    pub total: usize,
    pub features: usize,
    pub fixes: usize,
    pub docs: usize,
    pub style: usize,
    pub refactor: usize,
    pub test: usize,
    pub chore: usize,
    pub breaking: usize,
    pub unknown: usize,
}

impl CommitStatistics {
    /// Count a range in a single pass
    pub fn aggregate(records: &[CommitRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.record(record.category);
            stats
        })
    }

    /// Count one commit
    pub fn record(&mut self, category: CommitCategory) {
        self.total += 1;
        *self.counter_mut(category) += 1;
    }

    /// Counter for one category
    pub fn count(&self, category: CommitCategory) -> usize {
        match category {
            CommitCategory::Feature => self.features,
            CommitCategory::Fix => self.fixes,
            CommitCategory::Docs => self.docs,
            CommitCategory::Style => self.style,
            CommitCategory::Refactor => self.refactor,
            CommitCategory::Test => self.test,
            CommitCategory::Chore => self.chore,
            CommitCategory::Breaking => self.breaking,
            CommitCategory::Unknown => self.unknown,
        }
    }

    /// Sum of every category counter
    pub fn category_sum(&self) -> usize {
        CommitCategory::ALL.iter().map(|c| self.count(*c)).sum()
    }

    /// Commits that parsed into a known category
    pub fn recognized(&self) -> usize {
        self.total - self.unknown
    }

    fn counter_mut(&mut self, category: CommitCategory) -> &mut usize {
        match category {
            CommitCategory::Feature => &mut self.features,
            CommitCategory::Fix => &mut self.fixes,
            CommitCategory::Docs => &mut self.docs,
            CommitCategory::Style => &mut self.style,
            CommitCategory::Refactor => &mut self.refactor,
            CommitCategory::Test => &mut self.test,
            CommitCategory::Chore => &mut self.chore,
            CommitCategory::Breaking => &mut self.breaking,
            CommitCategory::Unknown => &mut self.unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::record;

    #[test]
    fn test_empty_range() {
        let stats = CommitStatistics::aggregate(&[]);
        assert_eq!(stats, CommitStatistics::default());
        assert_eq!(stats.category_sum(), 0);
    }

    #[test]
    fn test_counters_sum_to_total() {
        let records: Vec<_> = CommitCategory::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, category)| {
                (0..=i as u32).map(move |n| record(n, *category, "change"))
            })
            .collect();

        let stats = CommitStatistics::aggregate(&records);
        assert_eq!(stats.total, records.len());
        assert_eq!(stats.category_sum(), stats.total);
        assert_eq!(stats.unknown, 9);
        assert_eq!(stats.features, 1);
    }

    #[test]
    fn test_closure_holds_on_every_prefix() {
        let categories = [
            CommitCategory::Fix,
            CommitCategory::Unknown,
            CommitCategory::Style,
            CommitCategory::Breaking,
            CommitCategory::Docs,
        ];
        let records: Vec<_> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| record(i as u32, *c, "x"))
            .collect();

        for end in 0..=records.len() {
            let stats = CommitStatistics::aggregate(&records[..end]);
            assert_eq!(stats.total, end);
            assert_eq!(stats.category_sum(), end);
        }
    }

    #[test]
    fn test_recognized() {
        let records = vec![
            record(1, CommitCategory::Unknown, "wip"),
            record(2, CommitCategory::Feature, "add"),
            record(3, CommitCategory::Fix, "fix"),
        ];
        let stats = CommitStatistics::aggregate(&records);
        assert_eq!(stats.recognized(), 2);
        assert_eq!(stats.count(CommitCategory::Unknown), 1);
    }
}
