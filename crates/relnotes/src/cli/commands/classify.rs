//! Classify command

use clap::Args;
use console::style;
use tracing::info;

use relnotes_changelog::{classify, Classification};
use relnotes_core::CommitCategory;

use crate::cli::{output, Cli};

/// Classify a single commit message
#[derive(Debug, Args)]
pub struct ClassifyCommand {
    /// Full commit message (header, blank line, body, trailers)
    pub message: String,

    /// Print the classification as JSON
    #[arg(long)]
    pub json: bool,
}

impl ClassifyCommand {
    /// Execute the classify command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(json = self.json, "executing classify command");
        let classification = classify(&self.message);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&classification)?);
        } else {
            print_classification(&classification);
            if classification.category == CommitCategory::Unknown && !cli.quiet {
                output::info("Header does not follow `type(scope): subject`");
            }
        }

        Ok(())
    }
}

fn print_classification(c: &Classification) {
    println!("{}", output::header(c.category.title()));
    println!("{}", output::key_value("Type", c.category.as_str()));
    println!(
        "{}",
        output::key_value("Scope", c.scope.as_deref().unwrap_or("-"))
    );
    println!("{}", output::key_value("Subject", &c.subject));
    println!(
        "{}",
        output::key_value(
            "Breaking",
            &if c.breaking {
                style("yes").red().bold().to_string()
            } else {
                "no".to_string()
            }
        )
    );
    if let Some(body) = &c.body {
        println!("{}", output::key_value("Body", body));
    }
    if let Some(footer) = &c.footer {
        println!("{}", output::key_value("Footer", footer));
    }
}
