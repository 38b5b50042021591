use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for deid (~/.config/deid/config.toml or platform equivalent)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Replacement for every detected person name
    #[serde(default = "default_replacement")]
    pub replacement: String,

    /// Annotation record written by `analyze` and read by `redact`
    #[serde(default = "default_results_file")]
    pub results_file: PathBuf,

    /// Wrap replacements in HTML markers and emit a full document
    #[serde(default)]
    pub html: bool,

    /// Bold replacements for Markdown output
    #[serde(default)]
    pub markdown: bool,

    /// Normalize typographic punctuation before analysis
    #[serde(default = "default_true")]
    pub normalize: bool,

    /// Messages this short (in chars) or shorter skip entity detection
    #[serde(default = "default_min_message_chars")]
    pub min_message_chars: usize,

    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// External annotator command line; reads text on stdin, prints JSON
    #[serde(default = "default_command")]
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replacement: default_replacement(),
            results_file: default_results_file(),
            html: false,
            markdown: false,
            normalize: true,
            min_message_chars: default_min_message_chars(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
        }
    }
}

fn default_replacement() -> String {
    "EMPLOYEE".to_string()
}

fn default_results_file() -> PathBuf {
    PathBuf::from("results.json")
}

fn default_true() -> bool {
    true
}

fn default_min_message_chars() -> usize {
    7
}

fn default_command() -> Vec<String> {
    vec!["python3".to_string(), "deid_annotate.py".to_string()]
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "deid", "deid") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.deid/config.toml")
        }
    }
}
