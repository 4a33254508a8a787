//! folio-rs: a static portfolio and blog site generator
//!
//! This crate turns a directory of flat markdown files (blog posts with YAML
//! front-matter, standalone pages, a YAML project registry) into a complete
//! personal portfolio site rendered with embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod projects;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main application handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (pages, assets)
    pub content_dir: std::path::PathBuf,
    /// Blog posts directory
    pub blog_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new application handle from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let blog_dir = content_dir.join(&config.blog_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            blog_dir,
            public_dir,
        })
    }

    /// Path of the project registry file
    pub fn projects_path(&self) -> std::path::PathBuf {
        self.base_dir.join(&self.config.projects_file)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post or page
    pub fn new_post(&self, title: &str, page: bool) -> Result<()> {
        commands::new::run(self, title, page)
    }
}
