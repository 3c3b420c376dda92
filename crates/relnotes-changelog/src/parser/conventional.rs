//! Conventional commit classifier
//!
//! Headers follow `type[(scope)]: subject`. Anything else is still counted,
//! as `unknown`. Breaking changes are detected by the phrase
//! "breaking change" anywhere in the message, in any casing.

use regex::Regex;
use std::sync::LazyLock;

use relnotes_core::CommitCategory;
use relnotes_git::CommitInfo;

use super::CommitParser;
use crate::types::{Classification, CommitRecord};

/// Header grammar: keyword, optional parenthesized scope, colon, subject
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^)]*)\))?:\s*(?P<subject>.*)$")
        .expect("Invalid regex")
});

const BREAKING_PHRASE: &str = "breaking change";

/// Classify a raw commit message. Never fails.
pub fn classify(raw_message: &str) -> Classification {
    let mut lines = raw_message.lines();
    let header = lines.next().unwrap_or("");

    let Some(caps) = HEADER_REGEX.captures(header) else {
        let breaking = mentions_breaking(header);
        return Classification {
            category: if breaking {
                CommitCategory::Breaking
            } else {
                CommitCategory::Unknown
            },
            scope: None,
            subject: header.to_string(),
            body: None,
            footer: None,
            breaking,
        };
    };

    let keyword = caps["type"].to_lowercase();
    let scope = caps
        .name("scope")
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let subject = caps["subject"].to_string();

    let (body, footer) = split_body(lines);

    let mut category = CommitCategory::from_keyword(&keyword);
    let breaking = category == CommitCategory::Breaking
        || mentions_breaking(header)
        || body.as_deref().is_some_and(mentions_breaking)
        || footer.as_deref().is_some_and(mentions_breaking);
    if breaking {
        category = CommitCategory::Breaking;
    }

    Classification {
        category,
        scope,
        subject,
        body,
        footer,
        breaking,
    }
}

/// Split the lines after the header into body and footer.
///
/// The footer starts at the first non-empty line that contains a colon and
/// directly follows a blank line. Blank lines themselves are dropped.
fn split_body<'a>(lines: impl Iterator<Item = &'a str>) -> (Option<String>, Option<String>) {
    let mut body = Vec::new();
    let mut footer = Vec::new();
    let mut after_blank = false;
    let mut in_footer = false;

    for line in lines {
        let line = line.trim_end();
        if line.trim().is_empty() {
            after_blank = true;
            continue;
        }

        if !in_footer && after_blank && line.contains(':') {
            in_footer = true;
        }

        if in_footer {
            footer.push(line);
        } else {
            body.push(line);
        }
        after_blank = false;
    }

    (join_lines(body), join_lines(footer))
}

fn join_lines(lines: Vec<&str>) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn mentions_breaking(text: &str) -> bool {
    text.to_lowercase().contains(BREAKING_PHRASE)
}

/// Parser for the conventional commit header grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &CommitInfo) -> CommitRecord {
        CommitRecord::new(commit, classify(&commit.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_feature_with_scope() {
        let c = classify("feat(auth): add OAuth support");
        assert_eq!(c.category, CommitCategory::Feature);
        assert_eq!(c.scope.as_deref(), Some("auth"));
        assert_eq!(c.subject, "add OAuth support");
        assert!(!c.breaking);
        assert!(c.body.is_none());
        assert!(c.footer.is_none());
    }

    #[test]
    fn test_breaking_change_footer() {
        let c = classify("fix: patch leak\n\nBREAKING CHANGE: clients must update");
        assert_eq!(c.category, CommitCategory::Breaking);
        assert!(c.breaking);
        assert_eq!(c.subject, "patch leak");
        assert_eq!(c.footer.as_deref(), Some("BREAKING CHANGE: clients must update"));
        assert!(c.body.is_none());
    }

    #[test]
    fn test_breaking_phrase_in_header_any_case() {
        let c = classify("refactor(api): Breaking Change to routing");
        assert_eq!(c.category, CommitCategory::Breaking);
        assert!(c.breaking);
        assert_eq!(c.scope.as_deref(), Some("api"));
    }

    #[test]
    fn test_breaking_phrase_in_body() {
        let c = classify("chore: rework config\n\nthis is a breaking change for old files");
        assert_eq!(c.category, CommitCategory::Breaking);
        assert_eq!(c.body.as_deref(), Some("this is a breaking change for old files"));
    }

    #[test]
    fn test_breaking_keyword_sets_flag() {
        let c = classify("breaking: drop v1 endpoints");
        assert_eq!(c.category, CommitCategory::Breaking);
        assert!(c.breaking);
    }

    #[test]
    fn test_non_conventional_header() {
        let c = classify("Update README\n\nSome: detail");
        assert_eq!(c.category, CommitCategory::Unknown);
        assert_eq!(c.subject, "Update README");
        assert!(c.scope.is_none());
        assert!(c.body.is_none());
        assert!(c.footer.is_none());
        assert!(!c.breaking);
    }

    #[test]
    fn test_bang_marker_does_not_match_grammar() {
        let c = classify("feat!: drop legacy flag");
        assert_eq!(c.category, CommitCategory::Unknown);
        assert_eq!(c.subject, "feat!: drop legacy flag");
    }

    #[test]
    fn test_unrecognized_keyword_is_unknown() {
        let c = classify("perf(db): faster queries");
        assert_eq!(c.category, CommitCategory::Unknown);
        assert_eq!(c.subject, "faster queries");
        assert_eq!(c.scope.as_deref(), Some("db"));
    }

    #[test]
    fn test_keyword_aliases_and_case() {
        assert_eq!(classify("Feature: x").category, CommitCategory::Feature);
        assert_eq!(classify("BUGFIX: x").category, CommitCategory::Fix);
        assert_eq!(classify("doc: x").category, CommitCategory::Docs);
        assert_eq!(classify("tests: x").category, CommitCategory::Test);
        assert_eq!(classify("style: x").category, CommitCategory::Style);
    }

    #[test]
    fn test_empty_scope_is_none() {
        let c = classify("fix(): handle nil");
        assert_eq!(c.category, CommitCategory::Fix);
        assert!(c.scope.is_none());
    }

    #[test]
    fn test_subject_whitespace_optional() {
        let c = classify("docs:tighten wording");
        assert_eq!(c.category, CommitCategory::Docs);
        assert_eq!(c.subject, "tighten wording");
    }

    #[test]
    fn test_body_and_footer_split() {
        let message = "feat(cli): add flag\n\nFirst body line\nsecond body line\n\nStill body\n\nRefs: #123\nSigned-off-by: Ana <ana@example.com>\n\nextra trailer text";
        let c = classify(message);

        assert_eq!(
            c.body.as_deref(),
            Some("First body line\nsecond body line\nStill body")
        );
        assert_eq!(
            c.footer.as_deref(),
            Some("Refs: #123\nSigned-off-by: Ana <ana@example.com>\nextra trailer text")
        );
    }

    #[test]
    fn test_colon_without_preceding_blank_stays_body() {
        let c = classify("fix: x\n\nnote without colon\nsee: issue 4");
        assert_eq!(c.body.as_deref(), Some("note without colon\nsee: issue 4"));
        assert!(c.footer.is_none());
    }

    #[test]
    fn test_empty_message() {
        let c = classify("");
        assert_eq!(c.category, CommitCategory::Unknown);
        assert_eq!(c.subject, "");
    }

    #[test]
    fn test_classify_is_idempotent() {
        let messages = [
            "feat(auth): add OAuth support",
            "fix: patch leak\n\nBREAKING CHANGE: clients must update",
            "random words",
            "chore: tidy\n\nbody\n\nRefs: #1",
        ];
        for message in messages {
            assert_eq!(classify(message), classify(message));
        }
    }

    #[test]
    fn test_breaking_implies_breaking_category() {
        let messages = [
            "feat: a\n\nBREAKING CHANGE: b",
            "Breaking change in storage",
            "breaking: x",
            "docs: note the BREAKING change",
            "test: plain",
        ];
        for message in messages {
            let c = classify(message);
            if c.breaking {
                assert_eq!(c.category, CommitCategory::Breaking, "{}", message);
            }
        }
    }

    #[test]
    fn test_parser_builds_record() {
        let commit = CommitInfo::new(
            "0123456789abcdef0123456789abcdef01234567",
            "fix(io): close handles",
            "Bo",
            "bo@example.com",
            Utc::now(),
        );
        let record = ConventionalParser::new().parse(&commit);
        assert_eq!(record.category, CommitCategory::Fix);
        assert_eq!(record.subject, "close handles");
        assert_eq!(record.author_name, "Bo");
        assert_eq!(record.raw_message, "fix(io): close handles");
    }
}
