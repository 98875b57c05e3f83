//! Typed template contexts
//!
//! Each kind of template gets its own context struct. Keys are serialized in
//! camelCase because templates address them that way (`siteUrl`, `post`,
//! `previousPost`, `nextPost`, `posts`, `currentPage`).

use serde::Serialize;
use tera::Context;

use super::RenderError;
use crate::content::Post;

/// A serializable context that knows which keys its template relies on
pub trait TemplateContext: Serialize {
    /// Keys that must be present before rendering
    fn required_keys(&self) -> &'static [&'static str];

    /// Convert into a Tera context, checking required keys
    fn to_context(&self, template: &str) -> Result<Context, RenderError> {
        let context = Context::from_serialize(self).map_err(|e| RenderError::Engine {
            template: template.to_string(),
            message: e.to_string(),
        })?;

        for &key in self.required_keys() {
            if !context.contains_key(key) {
                return Err(RenderError::MissingContext {
                    template: template.to_string(),
                    key,
                });
            }
        }

        Ok(context)
    }
}

/// Context for a single post page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContext<'a> {
    pub site_url: &'a str,
    pub post: &'a Post,
    /// Slug of the previous post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_post: Option<&'a str>,
    /// Slug of the next post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_post: Option<&'a str>,
}

impl<'a> PostContext<'a> {
    pub fn new(
        site_url: &'a str,
        post: &'a Post,
        previous_post: Option<&'a str>,
        next_post: Option<&'a str>,
    ) -> Self {
        Self {
            site_url,
            post,
            previous_post,
            next_post,
        }
    }
}

impl TemplateContext for PostContext<'_> {
    fn required_keys(&self) -> &'static [&'static str] {
        &["siteUrl", "post"]
    }
}

/// Context for a top-level page (index, blog, about)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext<'a> {
    pub current_page: &'static str,
    pub site_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<&'a [Post]>,
    /// Whether the page's template lists posts
    #[serde(skip)]
    pub lists_posts: bool,
}

impl<'a> PageContext<'a> {
    pub fn new(
        current_page: &'static str,
        site_url: &'a str,
        posts: Option<&'a [Post]>,
        lists_posts: bool,
    ) -> Self {
        Self {
            current_page,
            site_url,
            posts,
            lists_posts,
        }
    }
}

impl TemplateContext for PageContext<'_> {
    fn required_keys(&self) -> &'static [&'static str] {
        if self.lists_posts {
            &["currentPage", "siteUrl", "posts"]
        } else {
            &["currentPage", "siteUrl"]
        }
    }
}
