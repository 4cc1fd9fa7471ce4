//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // Content source
    pub cms: CmsConfig,

    // Server
    pub server: ServerConfig,

    // Preview mode
    pub preview: PreviewConfig,
}

/// Remote content API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Base URL of the content API
    pub api_url: String,
    /// Document type queried for the listing
    pub content_type: String,
    /// Page size for the initial listing query
    pub page_size: usize,
    /// Language filter passed to the API ("*" = all languages)
    pub lang: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

/// Preview-mode settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Cookie set by the hosting environment when draft content is shown
    pub cookie: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "spacetraveling".to_string(),
            description: String::new(),
            author: String::new(),
            language: "pt-BR".to_string(),
            cms: CmsConfig::default(),
            server: ServerConfig::default(),
            preview: PreviewConfig::default(),
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080/api/v2".to_string(),
            content_type: "myblog".to_string(),
            page_size: 20,
            lang: "*".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            cookie: "io.preview.session".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
