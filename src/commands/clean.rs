//! Clean the output directory

use anyhow::Result;
use std::fs;

use crate::Site;

/// Delete the output directory if it exists
pub fn run(site: &Site) -> Result<()> {
    let output_dir = site.build_config(None).output_dir;
    if output_dir.exists() {
        fs::remove_dir_all(&output_dir)?;
        tracing::info!("Deleted: {:?}", output_dir);
    } else {
        tracing::debug!("Nothing to clean at {:?}", output_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_output() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Output/posts")).unwrap();
        fs::write(dir.path().join("Output/posts/a.html"), "a").unwrap();
        fs::create_dir_all(dir.path().join("_posts")).unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();
        assert!(!dir.path().join("Output").exists());
        assert!(dir.path().join("_posts").exists());

        // a second clean is a no-op
        run(&site).unwrap();
    }
}
