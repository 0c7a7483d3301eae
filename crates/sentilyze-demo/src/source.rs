//! Post sources for the user mode
//!
//! How posts are scraped is somebody else's problem: a source only has to
//! answer "the latest N posts of this user". [`fetch_recent`] turns every
//! failure into an empty batch plus a warning so the caller never crashes.

use crate::config::SourceConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sentilyze_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

/// One fetched text item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(alias = "content")]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            created_at: None,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Anything that can list a user's recent posts
#[async_trait]
pub trait PostSource: Send + Sync {
    /// The user's posts. `count` is a hint; sources may return more and
    /// leave the cut to [`fetch_recent`].
    async fn recent_posts(&self, username: &str, count: usize) -> Result<Vec<Post>>;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Outcome of a fetch that never fails
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub posts: Vec<Post>,

    /// User-facing message when the fetch failed
    pub warning: Option<String>,
}

impl FetchReport {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Fetch at most `count` posts, newest first, swallowing errors into a warning
pub async fn fetch_recent(source: &dyn PostSource, username: &str, count: usize) -> FetchReport {
    match source.recent_posts(username, count).await {
        Ok(mut posts) => {
            if posts.iter().all(|p| p.created_at.is_some()) {
                posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            posts.truncate(count);
            debug!("Fetched {} posts for {} from {}", posts.len(), username, source.name());

            FetchReport {
                posts,
                warning: None,
            }
        }
        Err(e) => {
            warn!("Fetching posts for {} from {} failed: {}", username, source.name(), e);
            FetchReport {
                posts: Vec::new(),
                warning: Some(format!("An error occurred while fetching posts: {}", e)),
            }
        }
    }
}

/// Build the source described by configuration
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn PostSource>> {
    match config {
        SourceConfig::Http {
            url_template,
            timeout_secs,
        } => Ok(Box::new(HttpPostSource::new(
            url_template.clone(),
            Duration::from_secs(*timeout_secs),
        )?)),
        SourceConfig::File { path } => Ok(Box::new(FilePostSource::new(path.clone()))),
    }
}

/// Usernames are restricted to `[A-Za-z0-9_]` so they can be placed into URLs
pub fn validate_username(username: &str) -> Result<&str> {
    let username = username.trim().trim_start_matches('@');
    if username.is_empty() {
        return Err(Error::fetch("username is empty"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(Error::fetch(format!("invalid username '{}'", username)));
    }
    Ok(username)
}

/// JSON endpoint returning an array of posts
pub struct HttpPostSource {
    url_template: String,
    client: reqwest::Client,
}

impl HttpPostSource {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url_template = url_template.into();
        if !url_template.contains("{username}") {
            return Err(Error::config(format!(
                "source url template '{}' has no {{username}} placeholder",
                url_template
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::fetch(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url_template,
            client,
        })
    }

    /// Expand the template for one request
    pub fn url_for(&self, username: &str, count: usize) -> Result<String> {
        let username = validate_username(username)?;
        Ok(self
            .url_template
            .replace("{username}", username)
            .replace("{count}", &count.to_string()))
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn recent_posts(&self, username: &str, count: usize) -> Result<Vec<Post>> {
        let url = self.url_for(username, count)?;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::fetch(format!("request to {} failed: {}", url, e)))?
            .error_for_status()
            .map_err(|e| Error::fetch(e.to_string()))?;

        response
            .json::<Vec<Post>>()
            .await
            .map_err(|e| Error::fetch(format!("invalid response body: {}", e)))
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// JSON file of the form `{"username": [{"text": ...}, ...]}`
pub struct FilePostSource {
    path: PathBuf,
}

impl FilePostSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PostSource for FilePostSource {
    async fn recent_posts(&self, username: &str, _count: usize) -> Result<Vec<Post>> {
        let username = validate_username(username)?;
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let mut users: HashMap<String, Vec<Post>> = serde_json::from_str(&contents)?;

        // The whole list is returned; fetch_recent orders it before cutting
        users
            .remove(username)
            .ok_or_else(|| Error::fetch(format!("user '{}' not found", username)))
    }

    fn name(&self) -> &str {
        "file"
    }
}
