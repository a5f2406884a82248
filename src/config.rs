use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_question_chars")]
    pub max_question_chars: usize,
    #[serde(default = "default_max_context_lines")]
    pub max_context_lines: usize,
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_question_chars: default_max_question_chars(),
            max_context_lines: default_max_context_lines(),
            max_context_chars: default_max_context_chars(),
        }
    }
}

fn default_max_question_chars() -> usize {
    500
}
fn default_max_context_lines() -> usize {
    20
}
fn default_max_context_chars() -> usize {
    4000
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    2
}

impl ProviderConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate limits
    if config.limits.max_question_chars == 0 {
        anyhow::bail!("limits.max_question_chars must be > 0");
    }
    if config.limits.max_context_lines == 0 {
        anyhow::bail!("limits.max_context_lines must be > 0");
    }
    if config.limits.max_context_chars == 0 {
        anyhow::bail!("limits.max_context_chars must be > 0");
    }

    // Validate provider
    match config.provider.provider.as_str() {
        "disabled" | "openai" => {}
        other => anyhow::bail!(
            "Unknown generation provider: '{}'. Must be disabled or openai.",
            other
        ),
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("askgate.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_minimal_config_applies_defaults() {
        let (_tmp, path) = write_config("[corpus]\npath = \"./guidelines.txt\"\n");
        let config = load_config(&path).unwrap();
        assert_eq!(config.limits.max_question_chars, 500);
        assert_eq!(config.limits.max_context_lines, 20);
        assert_eq!(config.limits.max_context_chars, 4000);
        assert_eq!(config.provider.provider, "disabled");
        assert!(!config.provider.is_enabled());
        assert_eq!(config.server.bind, "127.0.0.1:8787");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let (_tmp, path) = write_config(
            "[corpus]\npath = \"./guidelines.txt\"\n\n[provider]\nprovider = \"gemini\"\n",
        );
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Unknown generation provider"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let (_tmp, path) = write_config(
            "[corpus]\npath = \"./guidelines.txt\"\n\n[limits]\nmax_context_lines = 0\n",
        );
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_openai_provider_accepted() {
        let (_tmp, path) = write_config(
            "[corpus]\npath = \"./guidelines.txt\"\n\n[provider]\nprovider = \"openai\"\nmodel = \"gpt-4o\"\n",
        );
        let config = load_config(&path).unwrap();
        assert!(config.provider.is_enabled());
        assert_eq!(config.provider.model, "gpt-4o");
    }
}
