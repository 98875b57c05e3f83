//! Resolved settings for a single build

use std::path::{Path, PathBuf};

use super::SiteConfig;

/// Everything the build pipeline needs, resolved against the site base directory.
///
/// Constructed once before a build starts and never mutated during it.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Base URL exposed to templates as `siteUrl`
    pub site_url: String,
    /// Flat directory of markdown posts
    pub posts_dir: PathBuf,
    /// Tree of page templates and static assets
    pub content_dir: PathBuf,
    /// Reusable template fragments
    pub partials_dir: PathBuf,
    /// Directory recreated on every build
    pub output_dir: PathBuf,
    /// Template used for every post page
    pub post_template: String,
    /// Number of posts handed to the index page
    pub index_post_limit: usize,
}

impl BuildConfig {
    /// Resolve a site configuration against `base_dir`.
    ///
    /// `site_url` overrides the configured `url` when given.
    pub fn resolve(base_dir: &Path, config: &SiteConfig, site_url: Option<&str>) -> Self {
        Self {
            site_url: site_url.unwrap_or(&config.url).to_string(),
            posts_dir: base_dir.join(&config.posts_dir),
            content_dir: base_dir.join(&config.content_dir),
            partials_dir: base_dir.join(&config.partials_dir),
            output_dir: base_dir.join(&config.output_dir),
            post_template: config.post_template.clone(),
            index_post_limit: config.index_post_limit,
        }
    }

    /// Output directory for rendered posts
    pub fn posts_output_dir(&self) -> PathBuf {
        self.output_dir.join("posts")
    }
}
