//! Embedded site templates rendered with Tera
//!
//! All templates are compiled into the binary; the rendering surface is a
//! thin content-to-markup transform and carries no layout logic of its own.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // The generator emits HTML fragments (rendered markdown), so
        // autoescaping would double-escape them.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("page.html", include_str!("site/page.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("tags.html", include_str!("site/tags.html")),
            ("tag.html", include_str!("site/tag.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("404.html", include_str!("site/404.html")),
        ])?;

        tera.register_filter("display_date", display_date_filter);
        tera.register_filter("strip_html", strip_html_filter);

        Ok(Self { tera })
    }

    /// Render a template with the given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format an ISO date string as "January 15, 2024"
fn display_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("display_date", "value", String, value);
    if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        return Ok(tera::Value::String(crate::helpers::date::full_date(date)));
    }
    Ok(tera::Value::String(s))
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Data structures for template context

/// Listing-page view of a post (no body)
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// ISO date, formatted by the `display_date` filter in templates
    pub date: String,
    pub tags: Vec<String>,
    pub author: String,
    pub reading_time: String,
    pub path: String,
}

/// Newer/older navigation target on a post page
#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

/// A tag with its post count
#[derive(Debug, Clone, Serialize)]
pub struct TagSummary {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// A category section on the projects page
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSection {
    pub label: String,
    pub projects: Vec<crate::projects::Project>,
}

/// Pagination state for the blog index
#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub total: usize,
    pub current: usize,
    pub prev_link: String,
    pub next_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_compile() {
        // add_raw_templates parses every template eagerly
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_display_date_filter() {
        let value = tera::Value::String("2024-01-15".to_string());
        let out = display_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("January 15, 2024".to_string()));
    }

    #[test]
    fn test_display_date_passthrough_on_unparsable() {
        let value = tera::Value::String("sometime".to_string());
        let out = display_date_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("sometime".to_string()));
    }

    #[test]
    fn test_strip_html() {
        let value = tera::Value::String("<p>Hello <em>world</em></p>".to_string());
        let out = strip_html_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("Hello world".to_string()));
    }
}
