//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Identity
    pub title: String,
    pub author: String,
    pub role: String,
    pub tagline: String,
    pub description: String,
    pub keywords: Option<Vec<String>>,
    pub language: String,

    // Contact
    pub email: String,
    pub location: String,
    pub github: String,
    pub linkedin: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub blog_dir: String,
    pub tag_dir: String,
    pub projects_file: String,

    // Writing
    pub render_drafts: bool,
    /// Reading speed used for the "N min read" estimate
    pub words_per_minute: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Pagination
    pub per_page: usize,

    // Feed
    pub feed_limit: usize,

    // Navigation
    pub menu: Vec<MenuItem>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            author: "John Doe".to_string(),
            role: "Software Engineer".to_string(),
            tagline: String::new(),
            description: String::new(),
            keywords: None,
            language: "en".to_string(),

            email: String::new(),
            location: String::new(),
            github: String::new(),
            linkedin: String::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            blog_dir: "blog".to_string(),
            tag_dir: "tags".to_string(),
            projects_file: "projects.yml".to_string(),

            render_drafts: false,
            words_per_minute: 200,
            highlight: HighlightConfig::default(),

            per_page: 10,

            feed_limit: 20,

            menu: default_menu(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// A navigation menu entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
}

fn default_menu() -> Vec<MenuItem> {
    [
        ("Home", "/"),
        ("About", "/about/"),
        ("Projects", "/projects/"),
        ("Blog", "/blog/"),
        ("Contact", "/contact/"),
    ]
    .iter()
    .map(|(label, href)| MenuItem {
        label: label.to_string(),
        href: href.to_string(),
    })
    .collect()
}

/// Syntax highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
        }
    }
}
