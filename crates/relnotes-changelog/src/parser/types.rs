//! Category filter

use std::collections::HashSet;

use relnotes_core::{CommitCategory, NotesError};

use crate::types::CommitRecord;

/// Include/exclude filter applied to a classified range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Categories to keep; empty keeps everything not excluded
    pub include: HashSet<CommitCategory>,
    /// Categories to drop, checked before `include`
    pub exclude: HashSet<CommitCategory>,
}

impl CategoryFilter {
    /// Build a filter from category names as given on the command line or
    /// in the config file
    pub fn from_names<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self, NotesError> {
        let parse = |names: &[S]| {
            names
                .iter()
                .map(|n| n.as_ref().parse::<CommitCategory>())
                .collect::<Result<HashSet<_>, _>>()
        };

        Ok(Self {
            include: parse(include)?,
            exclude: parse(exclude)?,
        })
    }

    /// Add a category to include
    pub fn include_category(mut self, category: CommitCategory) -> Self {
        self.include.insert(category);
        self
    }

    /// Add a category to exclude
    pub fn exclude_category(mut self, category: CommitCategory) -> Self {
        self.exclude.insert(category);
        self
    }

    /// Whether the filter keeps everything
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Check if a category passes the filter
    pub fn should_include(&self, category: CommitCategory) -> bool {
        if self.exclude.contains(&category) {
            return false;
        }

        self.include.is_empty() || self.include.contains(&category)
    }

    /// Kept commits, order preserved
    pub fn apply(&self, records: &[CommitRecord]) -> Vec<CommitRecord> {
        records
            .iter()
            .filter(|r| self.should_include(r.category))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::record;

    #[test]
    fn test_empty_filter_keeps_all() {
        let filter = CategoryFilter::default();
        assert!(filter.is_empty());
        for category in CommitCategory::ALL {
            assert!(filter.should_include(category));
        }
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        let filter = CategoryFilter::default()
            .include_category(CommitCategory::Feature)
            .exclude_category(CommitCategory::Feature);
        assert!(!filter.should_include(CommitCategory::Feature));
    }

    #[test]
    fn test_include_restricts() {
        let filter = CategoryFilter::default()
            .include_category(CommitCategory::Feature)
            .include_category(CommitCategory::Fix);
        assert!(filter.should_include(CommitCategory::Fix));
        assert!(!filter.should_include(CommitCategory::Chore));
    }

    #[test]
    fn test_from_names() {
        let filter = CategoryFilter::from_names(&["feat", "bugfix"], &["other"]).unwrap();
        assert!(filter.include.contains(&CommitCategory::Feature));
        assert!(filter.include.contains(&CommitCategory::Fix));
        assert!(filter.exclude.contains(&CommitCategory::Unknown));
    }

    #[test]
    fn test_from_names_rejects_unknown_name() {
        let result = CategoryFilter::from_names(&["feat", "perf"], &[]);
        assert!(matches!(result, Err(NotesError::UnknownCategory(name)) if name == "perf"));
    }

    #[test]
    fn test_apply_preserves_order() {
        let records = vec![
            record(1, CommitCategory::Fix, "one"),
            record(2, CommitCategory::Chore, "two"),
            record(3, CommitCategory::Fix, "three"),
        ];
        let kept = CategoryFilter::default()
            .exclude_category(CommitCategory::Chore)
            .apply(&records);
        let subjects: Vec<_> = kept.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["one", "three"]);
    }
}
