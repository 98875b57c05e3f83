//! Template rendering on top of Tera
//!
//! Templates come from two roots: the partials directory and the content
//! tree. Each file is registered under its path relative to its root
//! (`post.html`, `blog/index.html`, ...). Partials are registered first and
//! win on name clashes.
//!
//! Templates are parsed one by one, so a template with a syntax error only
//! breaks its own renders; everything else keeps working.

mod context;

pub use context::{PageContext, PostContext, TemplateContext};

use std::collections::{BTreeMap, HashMap};
use std::error::Error as _;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;
use thiserror::Error;
use walkdir::WalkDir;

use crate::helpers::{strip_html, truncate};

/// Why a template could not be rendered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    UnknownTemplate(String),

    #[error("Template `{template}` failed to load: {message}")]
    Syntax { template: String, message: String },

    #[error("Context for `{template}` is missing `{key}`")]
    MissingContext { template: String, key: &'static str },

    #[error("Failed to render `{template}`: {message}")]
    Engine { template: String, message: String },
}

/// Which files under a root are templates
#[derive(Debug, Clone, Copy)]
pub enum TemplateFilter {
    /// Every file
    All,
    /// Only `.html` files; everything else is an asset
    HtmlOnly,
}

/// Template renderer backed by a Tera instance
pub struct TemplateRenderer {
    tera: Tera,
    /// Templates that failed to load, with the reason
    broken: BTreeMap<String, String>,
}

impl TemplateRenderer {
    /// Load templates from `roots`, in priority order
    pub fn load(roots: &[(&Path, TemplateFilter)]) -> Self {
        let mut sources: Vec<(String, String)> = Vec::new();
        let mut broken = BTreeMap::new();

        for (root, filter) in roots {
            for (name, path) in collect_templates(root, *filter) {
                if sources.iter().any(|(n, _)| *n == name) || broken.contains_key(&name) {
                    tracing::debug!("Template {} shadowed by an earlier root", name);
                    continue;
                }
                match fs::read_to_string(&path) {
                    Ok(source) => sources.push((name, source)),
                    Err(e) => {
                        tracing::warn!("Failed to read template {:?}: {}", path, e);
                        broken.insert(name, e.to_string());
                    }
                }
            }
        }

        let mut renderer = Self::from_sources(sources);
        renderer.broken.extend(broken);
        renderer
    }

    /// Build a renderer from in-memory `(name, source)` pairs
    pub fn from_sources(sources: Vec<(String, String)>) -> Self {
        let mut broken = BTreeMap::new();

        let mut tera = new_engine();
        if let Err(e) = tera.add_raw_templates(sources.clone()) {
            tracing::debug!("Bulk template load failed ({}), loading one by one", e);
            let (accepted, rejected) = partition_loadable(sources);
            for (name, message) in rejected {
                tracing::warn!("Template {} is broken: {}", name, message);
                broken.insert(name, message);
            }
            tera = new_engine();
            // Every accepted set was already loaded successfully once
            if let Err(e) = tera.add_raw_templates(accepted) {
                tracing::error!("Failed to reload templates: {}", error_chain(&e));
            }
        }

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Self { tera, broken }
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// Get available template names, sorted
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }

    /// Render a template with a typed context
    pub fn render<C: TemplateContext>(&self, name: &str, context: &C) -> Result<String, RenderError> {
        if let Some(message) = self.broken.get(name) {
            return Err(RenderError::Syntax {
                template: name.to_string(),
                message: message.clone(),
            });
        }
        if !self.has_template(name) {
            return Err(RenderError::UnknownTemplate(name.to_string()));
        }

        let context = context.to_context(name)?;
        self.tera
            .render(name, &context)
            .map_err(|e| RenderError::Engine {
                template: name.to_string(),
                message: error_chain(&e),
            })
    }
}

fn new_engine() -> Tera {
    let mut tera = Tera::default();
    // Post bodies are already HTML
    tera.autoescape_on(vec![]);
    tera
}

/// Split sources into the largest set Tera accepts and the rest.
///
/// Retries until no more templates can be added, so children that extend a
/// parent listed after them still get in.
fn partition_loadable(sources: Vec<(String, String)>) -> (Vec<(String, String)>, Vec<(String, String)>) {
    let mut accepted: Vec<(String, String)> = Vec::new();
    let mut pending: Vec<(String, String, String)> = sources
        .into_iter()
        .map(|(name, source)| (name, source, String::new()))
        .collect();

    loop {
        let before = pending.len();
        pending.retain_mut(|(name, source, last_error)| {
            let mut trial = accepted.clone();
            trial.push((name.clone(), source.clone()));
            match new_engine().add_raw_templates(trial) {
                Ok(()) => {
                    accepted.push((name.clone(), source.clone()));
                    false
                }
                Err(e) => {
                    *last_error = error_chain(&e);
                    true
                }
            }
        });
        if pending.len() == before {
            break;
        }
    }

    let rejected = pending
        .into_iter()
        .map(|(name, _, message)| (name, message))
        .collect();
    (accepted, rejected)
}

/// Collect `(name, path)` pairs for template files under `root`
fn collect_templates(root: &Path, filter: TemplateFilter) -> Vec<(String, PathBuf)> {
    if !root.is_dir() {
        tracing::debug!("Template root {:?} does not exist", root);
        return Vec::new();
    }

    let mut templates = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable template path: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if matches!(filter, TemplateFilter::HtmlOnly)
            && path.extension().and_then(|e| e.to_str()) != Some("html")
        {
            continue;
        }
        if let Ok(relative) = path.strip_prefix(root) {
            templates.push((template_name(relative), path.to_path_buf()));
        }
    }
    templates
}

/// Template name for a path relative to its root (`/`-separated)
pub fn template_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Flatten an error and its sources into one line
fn error_chain(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "...".to_string(),
    };

    Ok(tera::Value::String(truncate(&s, length, Some(&omission))))
}
