//! blogfront: a server-rendered front-end for headless-CMS blogs
//!
//! This crate fetches posts from a remote content API and renders a
//! paginated listing page with an incremental "load more" flow, plus
//! individual post pages.

pub mod cms;
pub mod config;
pub mod content;
pub mod helpers;
pub mod listing;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application
#[derive(Clone)]
pub struct Blogfront {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Blogfront {
    /// Create a new instance from a directory containing `_config.yml`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }
}
