//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join("_config.yml").exists() {
        anyhow::bail!("Site already initialized: {:?}", target_dir);
    }

    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/blog"))?;

    let config_content = r#"# Site
title: Folio
author: John Doe
role: Software Engineer
tagline: ''
description: ''
language: en

# Contact
email: ''
location: ''
github: ''
linkedin: ''

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public
blog_dir: blog
tag_dir: tags
projects_file: projects.yml

# Writing
render_drafts: false
words_per_minute: 200
highlight:
  theme: base16-ocean.dark

# Pagination
per_page: 10

# Feed
feed_limit: 20
"#;
    fs::write(target_dir.join("_config.yml"), config_content)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
description: Your very first post
date: "{}"
tags:
  - meta
---

Welcome to your new site. This post lives in `content/blog/`; every
markdown file there becomes a page under `/blog/<slug>/`.

## Quick start

```bash
$ folio-rs new "My Next Post"
$ folio-rs server
$ folio-rs generate
```
"#,
        now.format("%Y-%m-%d")
    );
    fs::write(target_dir.join("content/blog/hello-world.md"), sample_post)?;

    let about_page = r#"---
title: About
---

A few words about who you are and what you work on.
"#;
    fs::write(target_dir.join("content/about.md"), about_page)?;

    let contact_page = r#"---
title: Contact
---

The best way to reach me is by email.
"#;
    fs::write(target_dir.join("content/contact.md"), contact_page)?;

    let projects = r#"# Portfolio projects, rendered on /projects/
# category is one of: fullstack | blockchain
- id: sample-project
  title: Sample Project
  description: A one-line summary of what it does.
  category: fullstack
  technologies:
    - Rust
  github: https://github.com/you/sample-project
  highlights:
    - The one thing worth bragging about
"#;
    fs::write(target_dir.join("projects.yml"), projects)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_scaffolds_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());
        assert!(dir.path().join("content/blog/hello-world.md").exists());
        assert!(dir.path().join("content/about.md").exists());
        assert!(dir.path().join("projects.yml").exists());

        // The scaffold must load cleanly
        let folio = crate::Folio::new(dir.path()).unwrap();
        let loader = crate::content::ContentLoader::new(&folio);
        assert_eq!(loader.list_slugs(), vec!["hello-world"]);
        assert!(!crate::projects::load_projects(folio.projects_path())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
