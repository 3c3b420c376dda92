//! Generate command

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use relnotes_changelog::formatter::MarkdownFormatter;
use relnotes_changelog::{FormatterRegistry, GeneratedNotes, NotesOptions, ReleaseNotesGenerator};
use relnotes_core::config::{load_config_or_default, validate_config, Config, SourceProvider};
use relnotes_git::{CommitSource, GitHubSource, GitRepo};

use crate::cli::{output, Cli};

/// Generate release notes between two references
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Lower bound (tag, branch or commit prefix), excluded from the notes
    #[arg(long)]
    pub from: String,

    /// Upper bound (tag, branch or commit prefix)
    #[arg(long)]
    pub to: String,

    /// Output format: markdown, md, json or text
    #[arg(short, long)]
    pub format: Option<String>,

    /// Only keep these categories
    #[arg(long, value_delimiter = ',', value_name = "CATEGORY")]
    pub include: Vec<String>,

    /// Drop these categories
    #[arg(long, value_delimiter = ',', value_name = "CATEGORY")]
    pub exclude: Vec<String>,

    /// Render markdown sections as tables
    #[arg(long)]
    pub table: bool,

    /// Write the notes to a file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the notes even when writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Read history from GitHub instead of the local repository
    #[arg(long, value_name = "OWNER/REPO")]
    pub github: Option<String>,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds for hosted sources
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Overall time budget in seconds for hosted sources
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(from = %self.from, to = %self.to, "executing generate command");
        let cwd = std::env::current_dir()?;

        let (mut config, config_path) = load_config_or_default(&cwd)?;
        match &config_path {
            Some(path) => debug!(path = %path.display(), "using configuration file"),
            None => debug!("no configuration file found, using defaults"),
        }
        self.apply_overrides(&mut config);

        // Format and categories are checked before any history is read
        let options = NotesOptions::from_config(&config)?;
        validate_config(&config)?;

        let source = self.open_source(&config, &cwd)?;
        let spinner = (!cli.quiet && config.source.provider == SourceProvider::Github)
            .then(|| fetch_spinner(&format!("Fetching history from {}", source.name())));

        let result = ReleaseNotesGenerator::new(source.as_ref())
            .with_registry(formatter_registry(&config))
            .generate_formatted(&self.from, &self.to, &options);

        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let (notes, text) = result?;

        if let Some(warning) = &notes.disjoint {
            output::warning(&warning.to_string());
        }

        match &config.notes.output {
            Some(path) => {
                std::fs::write(path, &text)?;
                if self.stdout {
                    print!("{}", with_trailing_newline(&text));
                } else if !cli.quiet {
                    report_written(&notes, path);
                }
            }
            None => print!("{}", with_trailing_newline(&text)),
        }

        Ok(())
    }

    /// Command-line flags take precedence over the configuration file
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(format) = &self.format {
            config.notes.format = format.clone();
        }
        if !self.include.is_empty() {
            config.notes.include_types = self.include.clone();
        }
        if !self.exclude.is_empty() {
            config.notes.exclude_types = self.exclude.clone();
        }
        if self.table {
            config.notes.table = true;
        }
        if let Some(output) = &self.output {
            config.notes.output = Some(output.clone());
        }
        if let Some(repo) = &self.github {
            config.source.provider = SourceProvider::Github;
            config.source.github_repo = Some(repo.clone());
        }
        if let Some(timeout) = self.timeout {
            config.source.timeout_secs = timeout;
        }
    }

    fn open_source(&self, config: &Config, cwd: &Path) -> anyhow::Result<Box<dyn CommitSource>> {
        if config.source.provider == SourceProvider::Local {
            return Ok(Box::new(GitRepo::discover(cwd)?));
        }

        let (owner, repo) = config
            .source
            .owner_and_repo()
            .ok_or_else(|| anyhow::anyhow!("source.github_repo must be in owner/repo form"))?;

        let mut source = GitHubSource::new(&config.source.api_url, owner, repo)
            .with_timeout(Duration::from_secs(config.source.timeout_secs));
        if let Some(token) = &self.token {
            source = source.with_token(token);
        }
        if let Some(secs) = self.deadline {
            source = source.with_deadline(Instant::now() + Duration::from_secs(secs));
        }
        Ok(Box::new(source))
    }
}

/// Formatters configured for this run; markdown ids link to the hosted
/// repository when history comes from it
fn formatter_registry(config: &Config) -> FormatterRegistry {
    let mut markdown = MarkdownFormatter::new().with_table(config.notes.table);
    if config.source.provider == SourceProvider::Github {
        if let Some(url) = config.source.repo_web_url() {
            markdown = markdown.with_commit_links(url);
        }
    }

    let mut registry = FormatterRegistry::new();
    registry.register(markdown);
    registry
}

/// Terminal output always ends with a newline; compact JSON does not
fn with_trailing_newline(text: &str) -> Cow<'_, str> {
    if text.is_empty() || text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{}\n", text))
    }
}

fn report_written(notes: &GeneratedNotes, path: &Path) {
    let stats = notes.document.statistics();
    output::success(&format!(
        "Release notes written to {}",
        output::path_style().apply_to(path.display())
    ));
    println!(
        "{}",
        output::key_value(
            "Range",
            &format!(
                "{} ({}) .. {} ({})",
                notes.document.from_ref(),
                output::id_style().apply_to(notes.document.from_id().short()),
                notes.document.to_ref(),
                output::id_style().apply_to(notes.document.to_id().short()),
            )
        )
    );
    println!("{}", output::key_value("Commits", &stats.total.to_string()));
    println!(
        "{}",
        output::key_value("Breaking changes", &stats.breaking.to_string())
    );
    if stats.unknown > 0 {
        println!(
            "{}",
            output::key_value("Unclassified", &stats.unknown.to_string())
        );
    }
}

fn fetch_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> GenerateCommand {
        let mut argv = vec!["relnotes", "generate", "--from", "v1", "--to", "main"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            crate::cli::Commands::Generate(cmd) => cmd,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cmd = parse(&[
            "--format", "text", "--include", "feat", "--github", "owner/repo", "--timeout", "5",
        ]);
        let mut config = Config::default();
        config.notes.exclude_types = vec!["chore".to_string()];

        cmd.apply_overrides(&mut config);

        assert_eq!(config.notes.format, "text");
        assert_eq!(config.notes.include_types, vec!["feat"]);
        assert_eq!(config.notes.exclude_types, vec!["chore"]);
        assert_eq!(config.source.provider, SourceProvider::Github);
        assert_eq!(config.source.owner_and_repo(), Some(("owner", "repo")));
        assert_eq!(config.source.timeout_secs, 5);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cmd = parse(&[]);
        let mut config = Config::default();
        config.notes.format = "json".to_string();

        cmd.apply_overrides(&mut config);

        assert_eq!(config.notes.format, "json");
        assert_eq!(config.source.provider, SourceProvider::Local);
    }

    #[test]
    fn test_table_flag_sets_config() {
        let cmd = parse(&["--table"]);
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);
        assert!(config.notes.table);
    }

    #[test]
    fn test_markdown_links_only_for_hosted_source() {
        use relnotes_changelog::{classify, CommitRecord, OutputFormat, ReleaseNotesDocument};
        use relnotes_git::{CommitId, CommitInfo};

        let sha = "1234567".to_string() + &"0".repeat(33);
        let info = CommitInfo::new(
            sha.as_str(),
            "feat: add login",
            "Ana",
            "ana@example.com",
            chrono::Utc::now(),
        );
        let record = CommitRecord::new(&info, classify(&info.message));
        let doc = ReleaseNotesDocument::new(
            "v1",
            "main",
            CommitId::new("a".repeat(40)),
            CommitId::new("b".repeat(40)),
            vec![record],
        );

        let mut config = Config::default();
        config.source.github_repo = Some("openshift/hypershift".to_string());
        config.notes.table = true;

        let local = formatter_registry(&config)
            .render(&doc, OutputFormat::Markdown)
            .unwrap();
        assert!(local.contains("| 1234567 |  | add login | Ana |\n"));

        config.source.provider = SourceProvider::Github;
        let hosted = formatter_registry(&config)
            .render(&doc, OutputFormat::Markdown)
            .unwrap();
        assert!(hosted.contains(&format!(
            "| [1234567](https://github.com/openshift/hypershift/commit/{}) |",
            sha
        )));
    }

    #[test]
    fn test_output_ends_with_newline() {
        assert_eq!(with_trailing_newline("{\"a\":1}"), "{\"a\":1}\n");
        assert!(matches!(with_trailing_newline("# Notes\n"), Cow::Borrowed("# Notes\n")));
        assert_eq!(with_trailing_newline(""), "");
    }

    #[test]
    fn test_local_source_requires_repository() {
        let temp = tempfile::TempDir::new().unwrap();
        let cmd = parse(&[]);
        let result = cmd.open_source(&Config::default(), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_github_source_is_selected() {
        let temp = tempfile::TempDir::new().unwrap();
        let cmd = parse(&["--github", "owner/repo"]);
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);

        let source = cmd.open_source(&config, temp.path()).unwrap();
        assert_eq!(source.name(), "github");
    }
}
