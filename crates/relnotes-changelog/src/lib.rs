//! Relnotes Changelog - commit classification and release notes rendering
//!
//! This crate turns a walked commit range into a classified, filtered
//! document and renders it as markdown, JSON or plain text.

pub mod formatter;
pub mod generator;
pub mod parser;
pub mod stats;
pub mod types;

pub use formatter::{render, FormatterRegistry, NotesFormatter, OutputFormat};
pub use generator::{GeneratedNotes, NotesOptions, ReleaseNotesGenerator, PARALLEL_THRESHOLD};
pub use parser::{classify, CategoryFilter, CommitParser, ConventionalParser};
pub use stats::CommitStatistics;
pub use types::{Classification, CommitRecord, ReleaseNotesDocument};
