//! site-builder: a small static site generator
//!
//! Markdown posts with a metadata block are rendered through Tera
//! templates; a content tree of page templates and static assets is mirrored
//! into the output directory.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod templates;

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use config::{BuildConfig, SiteConfig};
use generator::{BuildPipeline, BuildReport};

/// Errors that prevent a build from starting
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Site directory {path:?} is not usable: {source}")]
    BaseDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to load {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: SiteConfig,
    /// Canonical base directory
    pub base_dir: PathBuf,
}

impl Site {
    /// Open the site in `base_dir`, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, InitError> {
        let base_dir = base_dir.as_ref();
        let base_dir = base_dir
            .canonicalize()
            .map_err(|source| InitError::BaseDir {
                path: base_dir.to_path_buf(),
                source,
            })?;
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            SiteConfig::load(&config_path).map_err(|e| InitError::Config {
                path: config_path,
                message: format!("{:#}", e),
            })?
        } else {
            SiteConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Resolve the build settings, optionally overriding the site URL
    pub fn build_config(&self, site_url: Option<&str>) -> BuildConfig {
        BuildConfig::resolve(&self.base_dir, &self.config, site_url)
    }

    /// Run one full build
    pub fn build(&self, site_url: Option<&str>) -> BuildReport {
        BuildPipeline::new(self.build_config(site_url), &self.config.highlight).run()
    }

    /// Delete the output directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }

    /// Scaffold a new post, returning its path
    pub fn new_post(&self, title: &str, summary: Option<&str>) -> anyhow::Result<PathBuf> {
        commands::new::create_post(self, title, summary)
    }
}
