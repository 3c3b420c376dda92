//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::Confirm;
use tracing::info;

use relnotes_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_YAML};

use crate::cli::{output, Cli};

/// Write a default relnotes configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Never prompt; fail if the file already exists
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path (a `.toml` extension writes TOML)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        std::fs::write(&config_path, render_config(&config_path)?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to set the default format and filters", config_path.display());
            println!(
                "  2. Run {} to generate notes",
                style("relnotes generate --from <TAG> --to HEAD").cyan()
            );
        }

        Ok(())
    }
}

/// Default configuration in the format implied by the file extension
fn render_config(path: &Path) -> anyhow::Result<String> {
    if path.extension().is_some_and(|e| e == "toml") {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE)?;
        Ok(toml::to_string_pretty(&config)?)
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}
