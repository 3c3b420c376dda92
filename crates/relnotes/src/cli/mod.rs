//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{ClassifyCommand, GenerateCommand, InitCommand};

/// relnotes - release notes from conventional commit history
#[derive(Debug, Parser)]
#[command(name = "relnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate release notes between two references
    Generate(GenerateCommand),

    /// Classify a single commit message
    Classify(ClassifyCommand),

    /// Write a default relnotes configuration
    Init(InitCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match &self.command {
            Commands::Generate(cmd) => cmd.execute(self),
            Commands::Classify(cmd) => cmd.execute(self),
            Commands::Init(cmd) => cmd.execute(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "relnotes", "-v", "generate", "--from", "v1.0.0", "--to", "main", "--format", "json",
            "--exclude", "chore,docs",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Generate(cmd) => {
                assert_eq!(cmd.from, "v1.0.0");
                assert_eq!(cmd.to, "main");
                assert_eq!(cmd.format.as_deref(), Some("json"));
                assert_eq!(cmd.exclude, vec!["chore", "docs"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_generate_requires_both_references() {
        assert!(Cli::try_parse_from(["relnotes", "generate", "--from", "v1.0.0"]).is_err());
    }
}
