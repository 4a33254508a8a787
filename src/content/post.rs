//! Post and Page models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL-safe identifier, derived from the file name
    pub slug: String,

    /// Post title
    pub title: String,

    /// Short description used on listing pages and in metadata
    pub description: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// The front-matter date string as written (ISO form), empty if absent
    pub raw_date: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Author name
    pub author: String,

    /// Derived reading-time estimate, e.g. "4 min read"
    pub reading_time: String,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Whether the post is a draft
    pub draft: bool,

    /// Source file path
    pub source: PathBuf,

    /// URL path (without site url), e.g. "/blog/my-post/"
    pub path: String,

    /// Full permalink URL
    pub permalink: String,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(slug: String, title: String, date: DateTime<Local>) -> Self {
        Self {
            slug,
            title,
            description: String::new(),
            date,
            raw_date: String::new(),
            tags: Vec::new(),
            author: String::new(),
            reading_time: String::new(),
            raw: String::new(),
            content: String::new(),
            draft: false,
            source: PathBuf::new(),
            path: String::new(),
            permalink: String::new(),
        }
    }

    /// Whether this post carries the given tag, compared case-insensitively
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// The next-newer post in a date-descending list
    pub fn newer<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// The next-older post in a date-descending list
    pub fn older<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.slug == self.slug)?;
        if pos + 1 < posts.len() {
            Some(&posts[pos + 1])
        } else {
            None
        }
    }
}

/// A standalone page (about, contact, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// URL-safe identifier, derived from the file name
    pub slug: String,

    /// Page title
    pub title: String,

    /// Creation date, if the front-matter carries one
    pub date: Option<DateTime<Local>>,

    /// Raw markdown content
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path
    pub source: PathBuf,

    /// URL path, e.g. "/about/"
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(slug: &str, y: i32, m: u32, d: u32) -> Post {
        let date = Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap();
        Post::new(slug.to_string(), slug.to_string(), date)
    }

    #[test]
    fn test_has_tag_case_insensitive() {
        let mut p = post("a", 2024, 1, 1);
        p.tags = vec!["Rust".to_string(), "Ethereum".to_string()];
        assert!(p.has_tag("rust"));
        assert!(p.has_tag("ETHEREUM"));
        assert!(!p.has_tag("go"));
    }

    #[test]
    fn test_adjacent_navigation() {
        // Date-descending: newest first
        let posts = vec![post("c", 2024, 3, 1), post("b", 2024, 2, 1), post("a", 2024, 1, 1)];

        assert!(posts[0].newer(&posts).is_none());
        assert_eq!(posts[0].older(&posts).unwrap().slug, "b");
        assert_eq!(posts[1].newer(&posts).unwrap().slug, "c");
        assert_eq!(posts[1].older(&posts).unwrap().slug, "a");
        assert!(posts[2].older(&posts).is_none());
    }

    #[test]
    fn test_navigation_for_unknown_slug() {
        let posts = vec![post("a", 2024, 1, 1)];
        let stranger = post("z", 2024, 6, 1);
        assert!(stranger.newer(&posts).is_none());
        assert!(stranger.older(&posts).is_none());
    }
}
