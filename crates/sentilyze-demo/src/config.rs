//! Demo configuration

use crate::cli::{Cli, Commands};
use sentilyze_classifiers::{ResourceConfig, StopwordSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of posts fetched and classified per user request
pub const POST_BATCH_SIZE: usize = 5;

/// Demo configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Artifact and stopword locations
    #[serde(default)]
    pub resources: ResourceConfig,

    /// Where user posts are fetched from
    #[serde(default)]
    pub source: Option<SourceConfig>,
}

/// Post source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    /// JSON endpoint returning an array of posts
    Http {
        url_template: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// Local JSON file mapping usernames to posts
    File { path: PathBuf },
}

fn default_timeout_secs() -> u64 {
    10
}

impl DemoConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(cli);
        Ok(config)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(path) = &cli.vectorizer {
            self.resources.vectorizer_path = path.clone();
        }

        if let Some(path) = &cli.model {
            self.resources.model_path = path.clone();
        }

        if let Some(path) = &cli.stopwords {
            self.resources.stopwords = StopwordSource::File { path: path.clone() };
        }

        if let Commands::User {
            source_url,
            source_file,
            ..
        } = &cli.command
        {
            if let Some(url) = source_url {
                self.source = Some(SourceConfig::Http {
                    url_template: url.clone(),
                    timeout_secs: default_timeout_secs(),
                });
            } else if let Some(path) = source_file {
                self.source = Some(SourceConfig::File { path: path.clone() });
            }
        }
    }
}
