//! Release notes generation

use rayon::prelude::*;
use relnotes_core::config::Config;
use relnotes_core::{NotesError, Result};
use relnotes_git::{CommitInfo, CommitSource, DisjointHistory};
use tracing::{debug, info, instrument};

use crate::formatter::{FormatterRegistry, OutputFormat};
use crate::parser::{CategoryFilter, CommitParser, ConventionalParser};
use crate::types::{CommitRecord, ReleaseNotesDocument};

/// Ranges at least this long are classified in parallel
pub const PARALLEL_THRESHOLD: usize = 256;

/// Per-run options, passed explicitly through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesOptions {
    /// Output format
    pub format: OutputFormat,
    /// Post-classification category filter
    pub filter: CategoryFilter,
}

impl NotesOptions {
    /// Create options for a format name; unsupported names fail here,
    /// before any history is read
    pub fn new(format: &str) -> std::result::Result<Self, NotesError> {
        Ok(Self {
            format: format.parse()?,
            filter: CategoryFilter::default(),
        })
    }

    /// Build options from the loaded configuration
    pub fn from_config(config: &Config) -> std::result::Result<Self, NotesError> {
        Ok(Self::new(&config.notes.format)?.with_filter(CategoryFilter::from_names(
            config.notes.include_types.as_slice(),
            config.notes.exclude_types.as_slice(),
        )?))
    }

    /// Set the category filter
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Output of a generation run
#[derive(Debug, Clone)]
pub struct GeneratedNotes {
    /// Filtered document with its statistics
    pub document: ReleaseNotesDocument,
    /// Set when the endpoints share no history
    pub disjoint: Option<DisjointHistory>,
}

/// Release notes generator
pub struct ReleaseNotesGenerator<'a> {
    source: &'a dyn CommitSource,
    parser: Box<dyn CommitParser>,
    registry: FormatterRegistry,
}

impl<'a> ReleaseNotesGenerator<'a> {
    /// Create a new generator with the default parser and formatters
    pub fn new(source: &'a dyn CommitSource) -> Self {
        Self {
            source,
            parser: Box::new(ConventionalParser::new()),
            registry: FormatterRegistry::new(),
        }
    }

    /// Use a custom formatter registry
    pub fn with_registry(mut self, registry: FormatterRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Resolve both references, walk the range, classify and filter
    #[instrument(skip(self, options), fields(source = self.source.name()))]
    pub fn generate(
        &self,
        from_ref: &str,
        to_ref: &str,
        options: &NotesOptions,
    ) -> Result<GeneratedNotes> {
        info!(from_ref, to_ref, format = %options.format, "generating release notes");

        let from_id = self.source.resolve(from_ref)?;
        let to_id = self.source.resolve(to_ref)?;

        let outcome = self.source.walk(&from_id, &to_id)?;
        let records = self.classify_all(&outcome.commits);

        let document = ReleaseNotesDocument::new(from_ref, to_ref, from_id, to_id, records);
        let document = if options.filter.is_empty() {
            document
        } else {
            let filtered = document.filtered(&options.filter);
            debug!(
                before = document.commits().len(),
                after = filtered.commits().len(),
                "category filter applied"
            );
            filtered
        };

        let stats = document.statistics();
        info!(
            total = stats.total,
            breaking = stats.breaking,
            unknown = stats.unknown,
            "release notes generated"
        );

        Ok(GeneratedNotes {
            document,
            disjoint: outcome.disjoint,
        })
    }

    /// Render a document
    pub fn format(&self, document: &ReleaseNotesDocument, format: OutputFormat) -> Result<String> {
        Ok(self.registry.render(document, format)?)
    }

    /// Generate and render in one step
    #[instrument(skip(self, options))]
    pub fn generate_formatted(
        &self,
        from_ref: &str,
        to_ref: &str,
        options: &NotesOptions,
    ) -> Result<(GeneratedNotes, String)> {
        // Fail on a missing formatter before touching history
        if self.registry.get(options.format).is_none() {
            return Err(NotesError::UnsupportedFormat(options.format.to_string()).into());
        }

        let notes = self.generate(from_ref, to_ref, options)?;
        let output = self.format(&notes.document, options.format)?;
        Ok((notes, output))
    }

    /// Classify in range order; large ranges use the rayon pool
    fn classify_all(&self, commits: &[CommitInfo]) -> Vec<CommitRecord> {
        let parser = self.parser.as_ref();
        if commits.len() >= PARALLEL_THRESHOLD {
            debug!(commit_count = commits.len(), "classifying in parallel");
            commits.par_iter().map(|c| parser.parse(c)).collect()
        } else {
            commits.iter().map(|c| parser.parse(c)).collect()
        }
    }
}
