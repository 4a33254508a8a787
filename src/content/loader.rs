//! Content loader - answers slug, tag, and date queries over the content tree
//!
//! There is no caching layer: every call re-reads and re-parses the
//! underlying files, so the loader is always consistent with the disk.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use super::{reading_time, FrontMatter, MarkdownRenderer, Page, Post};
use crate::Folio;

/// Markdown extensions accepted for content files
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Loads posts and pages from the content directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        let renderer = MarkdownRenderer::new(&folio.config.highlight.theme);
        Self { folio, renderer }
    }

    /// List all post slugs, lexicographically ordered.
    /// An absent blog directory yields an empty list, not an error.
    pub fn list_slugs(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.folio.blog_dir) else {
            return Vec::new();
        };

        let mut slugs: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_markdown_file(p))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();

        slugs.sort();
        // A stem appearing with two extensions is still one slug
        slugs.dedup();
        slugs
    }

    /// Load a single post by slug. A slug with no backing file yields
    /// `Ok(None)`.
    pub fn get_post(&self, slug: &str) -> Result<Option<Post>> {
        let Some(path) = self.resolve_slug(slug) else {
            return Ok(None);
        };
        self.load_post_file(&path, slug).map(Some)
    }

    /// Load all posts sorted by descending date. Equal dates keep slug
    /// enumeration order (the sort is stable).
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let mut posts = Vec::new();

        for slug in self.list_slugs() {
            match self.get_post(&slug) {
                Ok(Some(post)) => {
                    if !post.draft || self.folio.config.render_drafts {
                        posts.push(post);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", slug, e);
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(posts)
    }

    /// Load all posts carrying the given tag, compared case-insensitively
    pub fn posts_with_tag(&self, tag: &str) -> Result<Vec<Post>> {
        let mut posts = self.load_posts()?;
        posts.retain(|p| p.has_tag(tag));
        Ok(posts)
    }

    /// The deduplicated, lexicographically sorted union of all tags
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let mut tags = std::collections::BTreeSet::new();
        for post in self.load_posts()? {
            tags.extend(post.tags);
        }
        Ok(tags.into_iter().collect())
    }

    /// Load standalone pages from the content-directory root
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let Ok(entries) = fs::read_dir(&self.folio.content_dir) else {
            return Ok(Vec::new());
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_markdown_file(p))
            .collect();
        paths.sort();

        let mut pages = Vec::new();
        for path in paths {
            match self.load_page_file(&path) {
                Ok(page) => pages.push(page),
                Err(e) => {
                    tracing::warn!("Failed to load page {:?}: {}", path, e);
                }
            }
        }

        Ok(pages)
    }

    /// Find the content file backing a slug, trying each known extension
    fn resolve_slug(&self, slug: &str) -> Option<PathBuf> {
        MARKDOWN_EXTENSIONS
            .iter()
            .map(|ext| self.folio.blog_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
    }

    /// Load and parse a single post file
    fn load_post_file(&self, path: &Path, slug: &str) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        let date = fm.parse_date().unwrap_or_else(|| file_date(path));

        let mut post = Post::new(
            slug.to_string(),
            fm.title.unwrap_or_default(),
            date,
        );
        post.description = fm.description.unwrap_or_default();
        post.raw_date = fm.date.unwrap_or_default();
        post.tags = fm.tags;
        post.author = fm.author.unwrap_or_else(|| self.folio.config.author.clone());
        post.reading_time = reading_time(body, self.folio.config.words_per_minute);
        post.raw = body.to_string();
        post.content = self.renderer.render(body)?;
        post.draft = fm.draft;
        post.source = path.to_path_buf();
        post.path = format!("/{}/{}/", self.folio.config.blog_dir, slug);
        post.permalink = format!(
            "{}{}",
            self.folio.config.url.trim_end_matches('/'),
            post.path
        );

        Ok(post)
    }

    /// Load and parse a single standalone page file
    fn load_page_file(&self, path: &Path) -> Result<Page> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let date = fm.parse_date();

        Ok(Page {
            title: fm.title.unwrap_or_else(|| slug.clone()),
            date,
            raw: body.to_string(),
            content: self.renderer.render(body)?,
            source: path.to_path_buf(),
            path: format!("/{}/", slug),
            slug,
        })
    }
}

/// Check if a file is a markdown content file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Fall back to the file's modification time, then to now
fn file_date(path: &Path) -> DateTime<Local> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now())
}
