//! List site posts

use anyhow::{Context, Result};

use crate::content::PostLoader;
use crate::helpers::join_url;
use crate::Site;

/// Print every post in build order
pub fn run(site: &Site) -> Result<()> {
    for line in lines(site)? {
        println!("{}", line);
    }
    Ok(())
}

/// One line per post: display date, title and URL, newest first
pub fn lines(site: &Site) -> Result<Vec<String>> {
    let config = site.build_config(None);
    let loaded = PostLoader::new(&site.config.highlight)
        .load_dir(&config.posts_dir)
        .with_context(|| format!("Failed to read posts from {:?}", config.posts_dir))?;

    let mut lines = vec![format!("Posts ({}):", loaded.posts.len())];
    for post in loaded.posts.iter() {
        lines.push(format!(
            "  {} - {} [{}]",
            post.publish_date,
            post.title,
            join_url(&config.site_url, &post.output_path())
        ));
    }
    for dropped in &loaded.dropped {
        lines.push(format!("  skipped {:?}: {}", dropped.path, dropped.reason));
    }

    Ok(lines)
}
