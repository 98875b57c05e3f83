//! Page kinds and their rendering contexts

use crate::content::PostList;
use crate::templates::PageContext;

/// Top-level pages that get a dedicated context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Index,
    Blog,
    About,
}

/// Which posts a page receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSelection {
    /// No post data
    None,
    /// The newest posts, up to the configured index limit
    Latest,
    /// Every post
    All,
}

/// One row of the page table
#[derive(Debug)]
pub struct PageSpec {
    pub kind: PageKind,
    /// File stem of the template and the value of `currentPage`
    pub name: &'static str,
    pub posts: PostSelection,
}

/// Every page kind. Adding a page is adding a row.
pub const PAGES: &[PageSpec] = &[
    PageSpec {
        kind: PageKind::Index,
        name: "index",
        posts: PostSelection::Latest,
    },
    PageSpec {
        kind: PageKind::Blog,
        name: "blog",
        posts: PostSelection::All,
    },
    PageSpec {
        kind: PageKind::About,
        name: "about",
        posts: PostSelection::None,
    },
];

impl PageKind {
    /// Look up the page kind for a template file stem
    pub fn from_stem(stem: &str) -> Option<Self> {
        PAGES.iter().find(|spec| spec.name == stem).map(|spec| spec.kind)
    }

    fn spec(self) -> &'static PageSpec {
        PAGES
            .iter()
            .find(|spec| spec.kind == self)
            .unwrap_or_else(|| unreachable!("page kind {:?} has no table row", self))
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// Builds page contexts from the finished post list
pub struct PageContextProvider<'a> {
    site_url: &'a str,
    posts: &'a PostList,
    index_limit: usize,
}

impl<'a> PageContextProvider<'a> {
    pub fn new(site_url: &'a str, posts: &'a PostList, index_limit: usize) -> Self {
        Self {
            site_url,
            posts,
            index_limit,
        }
    }

    /// Context for the page of the given kind
    pub fn context(&self, kind: PageKind) -> PageContext<'a> {
        let spec = kind.spec();
        let posts = match spec.posts {
            PostSelection::None => None,
            PostSelection::Latest => Some(self.posts.latest(self.index_limit)),
            PostSelection::All => Some(self.posts.as_slice()),
        };
        PageContext::new(
            spec.name,
            self.site_url,
            posts,
            spec.posts != PostSelection::None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use chrono::NaiveDate;

    fn list(n: u32) -> PostList {
        PostList::new(
            (1..=n)
                .map(|d| {
                    Post::new(
                        format!("Post {}", d),
                        String::new(),
                        NaiveDate::from_ymd_opt(2023, 1, d).unwrap(),
                        String::new(),
                        format!("p{}", d),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_from_stem() {
        assert_eq!(PageKind::from_stem("index"), Some(PageKind::Index));
        assert_eq!(PageKind::from_stem("blog"), Some(PageKind::Blog));
        assert_eq!(PageKind::from_stem("about"), Some(PageKind::About));
        assert_eq!(PageKind::from_stem("post"), None);
        assert_eq!(PageKind::from_stem("Index"), None);
    }

    #[test]
    fn test_every_kind_has_a_row() {
        for kind in [PageKind::Index, PageKind::Blog, PageKind::About] {
            assert_eq!(PageKind::from_stem(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_index_gets_at_most_five() {
        let posts = list(8);
        let provider = PageContextProvider::new("u", &posts, 5);
        let ctx = provider.context(PageKind::Index);
        assert_eq!(ctx.current_page, "index");
        let slugs: Vec<_> = ctx.posts.unwrap().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["p8", "p7", "p6", "p5", "p4"]);

        let short = list(2);
        let provider = PageContextProvider::new("u", &short, 5);
        assert_eq!(provider.context(PageKind::Index).posts.unwrap().len(), 2);
    }

    #[test]
    fn test_blog_gets_everything() {
        let posts = list(12);
        let provider = PageContextProvider::new("u", &posts, 5);
        let ctx = provider.context(PageKind::Blog);
        assert_eq!(ctx.posts.unwrap().len(), 12);
        assert_eq!(ctx.site_url, "u");
    }

    #[test]
    fn test_about_gets_no_posts() {
        let posts = list(3);
        let provider = PageContextProvider::new("u", &posts, 5);
        let ctx = provider.context(PageKind::About);
        assert_eq!(ctx.current_page, "about");
        assert!(ctx.posts.is_none());
        assert!(!ctx.lists_posts);
    }

    #[test]
    fn test_empty_post_list_still_lists() {
        let posts = PostList::default();
        let provider = PageContextProvider::new("u", &posts, 5);
        let ctx = provider.context(PageKind::Blog);
        assert_eq!(ctx.posts.map(<[Post]>::len), Some(0));
    }
}
