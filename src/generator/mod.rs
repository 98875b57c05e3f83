//! Generator module - the three-phase build pipeline
//!
//! 1. **Setup**: recreate the output directory and its `posts/` child.
//! 2. **PostRender**: load posts, sort them, render each with circular
//!    previous/next navigation.
//! 3. **ResourceProcess**: walk the content tree, mirroring directories,
//!    rendering page templates and copying everything else.
//!
//! Phases run strictly in order. Failures inside a phase are recorded per
//! item in the [`BuildReport`] and never stop the build.

pub mod pages;
pub mod report;
pub mod walker;

pub use pages::{PageContextProvider, PageKind, PostSelection, PAGES};
pub use report::{BuildError, BuildReport, DroppedSource, Failure, Phase};
pub use walker::{classify, ContentEntry, ContentTreeWalker, EntryKind};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, HighlightConfig};
use crate::content::{PostList, PostLoader};
use crate::templates::{template_name, PostContext, TemplateFilter, TemplateRenderer};

/// Static site build pipeline
pub struct BuildPipeline {
    config: BuildConfig,
    loader: PostLoader,
    renderer: TemplateRenderer,
}

impl BuildPipeline {
    /// Create a pipeline, loading templates from the partials and content
    /// directories
    pub fn new(config: BuildConfig, highlight: &HighlightConfig) -> Self {
        let renderer = TemplateRenderer::load(&[
            (config.partials_dir.as_path(), TemplateFilter::All),
            (config.content_dir.as_path(), TemplateFilter::HtmlOnly),
        ]);
        tracing::debug!("Loaded templates: {:?}", renderer.template_names());

        Self {
            config,
            loader: PostLoader::new(highlight),
            renderer,
        }
    }

    /// Run a full build
    pub fn run(&self) -> BuildReport {
        let start = std::time::Instant::now();
        let mut report = BuildReport::default();

        tracing::info!("Preparing {:?}", self.config.output_dir);
        self.setup_output(&mut report);

        let posts = self.render_posts(&mut report);
        tracing::info!(
            "Rendered {} of {} posts",
            report.posts_rendered.len(),
            posts.len()
        );

        self.process_content(&posts, &mut report);
        tracing::info!(
            "Processed content: {} pages, {} assets",
            report.pages_rendered.len(),
            report.assets_copied.len()
        );

        tracing::info!(
            "Built in {:.2}s: {}",
            start.elapsed().as_secs_f64(),
            report.summary()
        );
        report
    }

    /// Phase 1: recreate the output directory
    fn setup_output(&self, report: &mut BuildReport) {
        let output_dir = &self.config.output_dir;

        if output_dir.exists() {
            if let Err(e) = fs::remove_dir_all(output_dir) {
                report.fail(
                    Phase::Setup,
                    output_dir,
                    BuildError::DirectorySetup {
                        path: output_dir.clone(),
                        source: e,
                    },
                );
            }
        }

        for dir in [output_dir.clone(), self.config.posts_output_dir()] {
            if let Err(e) = fs::create_dir_all(&dir) {
                report.fail(
                    Phase::Setup,
                    &dir,
                    BuildError::DirectorySetup {
                        path: dir.clone(),
                        source: e,
                    },
                );
            }
        }
    }

    /// Phase 2: load, sort and render posts
    ///
    /// Returns the post list for the content phase.
    fn render_posts(&self, report: &mut BuildReport) -> PostList {
        let posts_dir = &self.config.posts_dir;

        let loaded = match self.loader.load_dir(posts_dir) {
            Ok(loaded) => loaded,
            Err(e) => {
                report.fail(
                    Phase::PostRender,
                    posts_dir,
                    BuildError::PostsDir {
                        path: posts_dir.clone(),
                        source: e,
                    },
                );
                return PostList::default();
            }
        };

        report
            .dropped_posts
            .extend(loaded.dropped.into_iter().map(|d| DroppedSource {
                path: d.path,
                reason: d.reason.to_string(),
            }));

        let posts = loaded.posts;
        for index in 0..posts.len() {
            let post = &posts[index];
            match self.render_post(&posts, index) {
                Ok(relative) => {
                    tracing::debug!("Generated post: {:?}", relative);
                    report.posts_rendered.push(relative);
                }
                Err(e) => report.fail(Phase::PostRender, &post.slug, e),
            }
        }

        posts
    }

    fn render_post(&self, posts: &PostList, index: usize) -> Result<PathBuf, BuildError> {
        let post = &posts[index];
        let nav = posts.navigation(index);

        let context = PostContext::new(
            &self.config.site_url,
            post,
            nav.previous.map(|p| p.slug.as_str()),
            nav.next.map(|p| p.slug.as_str()),
        );
        let html = self.renderer.render(&self.config.post_template, &context)?;

        let relative = PathBuf::from(post.output_path());
        write_file(&self.config.output_dir.join(&relative), &html)?;
        Ok(relative)
    }

    /// Phase 3: mirror the content tree into the output directory
    fn process_content(&self, posts: &PostList, report: &mut BuildReport) {
        let content_dir = &self.config.content_dir;

        let mut walker = match ContentTreeWalker::new(content_dir, &self.config.output_dir) {
            Ok(walker) => walker,
            Err(e) => {
                report.fail(
                    Phase::ResourceProcess,
                    content_dir,
                    BuildError::TreeWalk {
                        path: content_dir.clone(),
                        message: e.to_string(),
                    },
                );
                return;
            }
        };

        let provider = PageContextProvider::new(
            &self.config.site_url,
            posts,
            self.config.index_post_limit,
        );

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| content_dir.clone());
                    report.fail(
                        Phase::ResourceProcess,
                        path.clone(),
                        BuildError::TreeWalk {
                            path,
                            message: e.to_string(),
                        },
                    );
                    continue;
                }
            };

            tracing::debug!("Processing: {:?}", entry.relative);

            match entry.kind {
                EntryKind::Directory => match create_output_dir(&entry.destination) {
                    Ok(()) => report.directories_created.push(entry.relative),
                    Err(e) => {
                        report.fail(Phase::ResourceProcess, entry.relative, e);
                        walker.skip_subtree();
                    }
                },
                EntryKind::Page(kind) => {
                    let name = template_name(&entry.relative);
                    let result = self
                        .renderer
                        .render(&name, &provider.context(kind))
                        .map_err(BuildError::from)
                        .and_then(|html| write_file(&entry.destination, &html));
                    match result {
                        Ok(()) => report.pages_rendered.push(entry.relative),
                        Err(e) => report.fail(Phase::ResourceProcess, entry.relative, e),
                    }
                }
                EntryKind::SkippedTemplate => {
                    tracing::debug!("Skipping template without a page kind: {:?}", entry.relative);
                    report.skipped_templates.push(entry.relative);
                }
                EntryKind::Asset => match fs::copy(&entry.source, &entry.destination) {
                    Ok(_) => report.assets_copied.push(entry.relative),
                    Err(e) => report.fail(
                        Phase::ResourceProcess,
                        entry.relative,
                        BuildError::Copy {
                            from: entry.source,
                            to: entry.destination,
                            source: e,
                        },
                    ),
                },
            }
        }
    }
}

/// Create an output directory; an existing one is fine
fn create_output_dir(path: &Path) -> Result<(), BuildError> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(BuildError::CreateDir {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    fs::write(path, contents).map_err(|e| BuildError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
