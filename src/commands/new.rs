//! Create a new post or page

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Create a new post (or, with `page`, a standalone page)
pub fn run(folio: &Folio, title: &str, page: bool) -> Result<()> {
    let now = chrono::Local::now();
    let file_slug = slug::slugify(title);

    let (target_dir, content) = if page {
        let content = format!("---\ntitle: {}\n---\n\n", title);
        (folio.content_dir.clone(), content)
    } else {
        let content = format!(
            "---\ntitle: {}\ndescription: ''\ndate: \"{}\"\ntags: []\n---\n\n",
            title,
            now.format("%Y-%m-%d")
        );
        (folio.blog_dir.clone(), content)
    };

    fs::create_dir_all(&target_dir)?;
    let file_path = target_dir.join(format!("{}.md", file_slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_post_lands_in_blog_dir() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        run(&folio, "Zero-Copy Parsing in Rust", false).unwrap();

        let path = folio.blog_dir.join("zero-copy-parsing-in-rust.md");
        assert!(path.exists());
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("---\ntitle: Zero-Copy Parsing in Rust\n"));
    }

    #[test]
    fn test_new_page_lands_in_content_root() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        run(&folio, "Talks", true).unwrap();
        assert!(folio.content_dir.join("talks.md").exists());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        run(&folio, "Same Title", false).unwrap();
        assert!(run(&folio, "Same Title", false).is_err());
    }
}
