//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnotes.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnotes.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".relnotes.yaml";

/// Default output format
pub const DEFAULT_FORMAT: &str = "markdown";

/// Default hosted API base URL
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default hosted web UI base URL
pub const DEFAULT_WEB_URL: &str = "https://github.com";

/// Default per-request timeout for hosted sources
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".relnotes.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnotes configuration

notes:
  # markdown | json | text
  format: markdown
  # Keep only these categories (feat, fix, docs, style, refactor, test, chore, breaking, unknown)
  include_types: []
  # Drop these categories
  exclude_types: []
  # Render markdown sections as tables
  table: false

source:
  # local | github
  provider: local
  # github_repo: owner/repo
  api_url: https://api.github.com
  # Commit links in markdown point here
  web_url: https://github.com
  timeout_secs: 30
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.notes.format, DEFAULT_FORMAT);
        assert_eq!(config.source.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
