//! Generator module - renders the portfolio site into the public directory

use anyhow::Result;
use chrono::Local;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{Page, Post};
use crate::helpers::date::date_rfc3339;
use crate::projects::{by_category, Project, ProjectCategory};
use crate::templates::{
    NavPost, PaginationData, PostSummary, ProjectSection, TagSummary, TemplateRenderer,
};
use crate::Folio;

/// Number of recent posts shown on the home page
const HOME_RECENT_POSTS: usize = 3;

/// Number of projects shown on the home page
const HOME_FEATURED_PROJECTS: usize = 4;

/// Static site generator using the embedded templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            folio: folio.clone(),
            renderer,
        })
    }

    /// Generate the entire site.
    /// `posts` must already be sorted by descending date.
    pub fn generate(&self, posts: &[Post], pages: &[Page], projects: &[Project]) -> Result<()> {
        fs::create_dir_all(&self.folio.public_dir)?;

        self.copy_assets()?;

        self.generate_home(posts, projects)?;
        self.generate_blog_index(posts)?;
        self.generate_post_pages(posts)?;
        self.generate_pages(pages)?;
        self.generate_projects_page(projects)?;
        self.generate_tag_pages(posts)?;
        self.generate_not_found()?;
        self.generate_atom_feed(posts)?;
        self.generate_search_index(posts)?;

        Ok(())
    }

    /// Create a context with the variables every template expects
    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.folio.config);
        context.insert("current_year", &Local::now().format("%Y").to_string());
        context
    }

    /// Listing-page view of a post
    fn summarize(post: &Post) -> PostSummary {
        PostSummary {
            slug: post.slug.clone(),
            title: post.title.clone(),
            description: post.description.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            tags: post.tags.clone(),
            author: post.author.clone(),
            reading_time: post.reading_time.clone(),
            path: post.path.clone(),
        }
    }

    /// Write rendered HTML under the public directory
    fn write_output(&self, relative: &str, html: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Generate the home page: identity block, recent posts, featured projects
    fn generate_home(&self, posts: &[Post], projects: &[Project]) -> Result<()> {
        let recent: Vec<PostSummary> = posts.iter().take(HOME_RECENT_POSTS).map(Self::summarize).collect();
        let featured: Vec<&Project> = projects.iter().take(HOME_FEATURED_PROJECTS).collect();

        let mut context = self.base_context();
        context.insert("recent_posts", &recent);
        context.insert("featured_projects", &featured);

        let html = self.renderer.render("home.html", &context)?;
        self.write_output("index.html", &html)
    }

    /// Generate the paginated blog index
    fn generate_blog_index(&self, posts: &[Post]) -> Result<()> {
        let blog_dir = &self.folio.config.blog_dir;
        let per_page = self.folio.config.per_page.max(1);
        let total_pages = posts.len().div_ceil(per_page).max(1);

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * per_page;
            let end = (start + per_page).min(posts.len());
            let page_posts: Vec<PostSummary> =
                posts[start..end].iter().map(Self::summarize).collect();

            let pagination = PaginationData {
                total: total_pages,
                current: page_num,
                prev_link: match page_num {
                    1 => String::new(),
                    2 => format!("/{}/", blog_dir),
                    n => format!("/{}/page/{}/", blog_dir, n - 1),
                },
                next_link: if page_num < total_pages {
                    format!("/{}/page/{}/", blog_dir, page_num + 1)
                } else {
                    String::new()
                },
            };

            let mut context = self.base_context();
            context.insert("page_posts", &page_posts);
            context.insert("pagination", &pagination);

            let html = self.renderer.render("blog.html", &context)?;
            let relative = if page_num == 1 {
                format!("{}/index.html", blog_dir)
            } else {
                format!("{}/page/{}/index.html", blog_dir, page_num)
            };
            self.write_output(&relative, &html)?;
        }

        Ok(())
    }

    /// Generate individual post pages with newer/older navigation
    fn generate_post_pages(&self, posts: &[Post]) -> Result<()> {
        for post in posts {
            let newer = post.newer(posts).map(|p| NavPost {
                title: p.title.clone(),
                path: p.path.clone(),
            });
            let older = post.older(posts).map(|p| NavPost {
                title: p.title.clone(),
                path: p.path.clone(),
            });

            let mut context = self.base_context();
            context.insert("post", &Self::summarize(post));
            context.insert("post_content", &post.content);
            if let Some(ref newer) = newer {
                context.insert("newer", newer);
            }
            if let Some(ref older) = older {
                context.insert("older", older);
            }

            let html = self.renderer.render("post.html", &context)?;
            let relative = format!(
                "{}/{}/index.html",
                self.folio.config.blog_dir, post.slug
            );
            self.write_output(&relative, &html)?;
        }

        Ok(())
    }

    /// Generate standalone pages (about, contact, ...)
    fn generate_pages(&self, pages: &[Page]) -> Result<()> {
        for page in pages {
            let mut context = self.base_context();
            context.insert("page_title", &page.title);
            context.insert("page_content", &page.content);
            context.insert("is_contact", &(page.slug == "contact"));

            let html = self.renderer.render("page.html", &context)?;
            self.write_output(&format!("{}/index.html", page.slug), &html)?;
        }

        Ok(())
    }

    /// Generate the projects page, grouped by category
    fn generate_projects_page(&self, projects: &[Project]) -> Result<()> {
        let sections: Vec<ProjectSection> =
            [ProjectCategory::Fullstack, ProjectCategory::Blockchain]
                .into_iter()
                .map(|category| ProjectSection {
                    label: category.label().to_string(),
                    projects: by_category(projects, category)
                        .into_iter()
                        .cloned()
                        .collect(),
                })
                .filter(|section| !section.projects.is_empty())
                .collect();

        let mut context = self.base_context();
        context.insert("sections", &sections);

        let html = self.renderer.render("projects.html", &context)?;
        self.write_output("projects/index.html", &html)
    }

    /// Generate the tag index and one listing page per tag
    fn generate_tag_pages(&self, posts: &[Post]) -> Result<()> {
        let mut tags_map: BTreeMap<String, Vec<&Post>> = BTreeMap::new();
        for post in posts {
            for tag in &post.tags {
                if tag.trim().is_empty() {
                    continue;
                }
                tags_map.entry(tag.clone()).or_default().push(post);
            }
        }

        let tag_dir = &self.folio.config.tag_dir;

        let all_tags: Vec<TagSummary> = tags_map
            .iter()
            .map(|(name, posts)| TagSummary {
                name: name.clone(),
                slug: slug::slugify(name),
                count: posts.len(),
            })
            .collect();

        let mut context = self.base_context();
        context.insert("all_tags", &all_tags);
        let html = self.renderer.render("tags.html", &context)?;
        self.write_output(&format!("{}/index.html", tag_dir), &html)?;

        for (tag, tag_posts) in &tags_map {
            let tag_slug = slug::slugify(tag);
            if tag_slug.is_empty() {
                continue;
            }

            let summaries: Vec<PostSummary> =
                tag_posts.iter().map(|p| Self::summarize(p)).collect();

            let mut context = self.base_context();
            context.insert("tag_name", tag);
            context.insert("page_posts", &summaries);

            let html = self.renderer.render("tag.html", &context)?;
            self.write_output(&format!("{}/{}/index.html", tag_dir, tag_slug), &html)?;
        }

        tracing::info!("Generated {} tag pages", tags_map.len());
        Ok(())
    }

    /// Generate the 404 page; missing slugs resolve to it at serve time
    fn generate_not_found(&self) -> Result<()> {
        let context = self.base_context();
        let html = self.renderer.render("404.html", &context)?;
        self.write_output("404.html", &html)
    }

    /// Generate the Atom feed of the most recent posts
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.folio.config;
        let base_url = config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}/atom.xml\" rel=\"self\"/>\n",
            base_url
        ));
        feed.push_str(&format!("  <link href=\"{}/\"/>\n", base_url));
        feed.push_str(&format!(
            "  <updated>{}</updated>\n",
            posts
                .first()
                .map(|p| date_rfc3339(&p.date))
                .unwrap_or_else(|| date_rfc3339(&Local::now()))
        ));
        feed.push_str(&format!("  <id>{}/</id>\n", base_url));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in posts.iter().take(config.feed_limit) {
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!(
                "    <link href=\"{}{}\"/>\n",
                base_url, post.path
            ));
            feed.push_str(&format!("    <id>{}{}</id>\n", base_url, post.path));
            feed.push_str(&format!(
                "    <published>{}</published>\n",
                date_rfc3339(&post.date)
            ));
            feed.push_str(&format!(
                "    <updated>{}</updated>\n",
                date_rfc3339(&post.date)
            ));
            feed.push_str(&format!(
                "    <summary>{}</summary>\n",
                escape_xml(&post.description)
            ));
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                strip_invalid_xml_chars(&post.content)
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        let output_path = self.folio.public_dir.join("atom.xml");
        fs::write(&output_path, feed)?;
        tracing::info!("Generated atom.xml");

        Ok(())
    }

    /// Generate the search index (JSON)
    fn generate_search_index(&self, posts: &[Post]) -> Result<()> {
        let search_data: Vec<serde_json::Value> = posts
            .iter()
            .map(|p| {
                serde_json::json!({
                    "slug": p.slug,
                    "title": p.title,
                    "description": p.description,
                    "url": p.path,
                    "date": p.date.format("%Y-%m-%d").to_string(),
                    "tags": p.tags,
                    "content": strip_html(&p.content),
                })
            })
            .collect();

        let output_path = self.folio.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&search_data)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Copy non-markdown assets from the content directory, preserving
    /// relative paths
    fn copy_assets(&self) -> Result<()> {
        let content_dir = &self.folio.content_dir;
        if !content_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown(path) {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;
            let dest = self.folio.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}

fn is_markdown(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("mdx") | Some("markdown")
    )
}

/// Strip HTML tags from content
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip control characters XML 1.0 forbids (tab, newline, CR stay)
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use crate::projects::load_projects;
    use std::fs;
    use tempfile::TempDir;

    fn build_site() -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("content");
        let blog = content.join("blog");
        fs::create_dir_all(&blog).unwrap();

        fs::write(
            blog.join("first-post.md"),
            "---\ntitle: First Post\ndescription: The first one\ndate: \"2024-01-15\"\ntags: [\"rust\"]\n---\n\nHello from the first post.\n",
        )
        .unwrap();
        fs::write(
            blog.join("second-post.md"),
            "---\ntitle: Second Post\ndate: \"2024-02-20\"\ntags: [\"rust\", \"wasm\"]\n---\n\nHello again.\n",
        )
        .unwrap();
        fs::write(content.join("about.md"), "---\ntitle: About\n---\nAbout me.\n").unwrap();
        fs::write(content.join("avatar.svg"), "<svg></svg>").unwrap();
        fs::write(
            dir.path().join("projects.yml"),
            "- id: demo\n  title: Demo\n  description: A demo project\n  category: fullstack\n  github: https://github.com/example/demo\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    fn generate(folio: &Folio) {
        let loader = ContentLoader::new(folio);
        let posts = loader.load_posts().unwrap();
        let pages = loader.load_pages().unwrap();
        let projects = load_projects(folio.projects_path()).unwrap();
        Generator::new(folio)
            .unwrap()
            .generate(&posts, &pages, &projects)
            .unwrap();
    }

    #[test]
    fn test_generate_site_layout() {
        let (_dir, folio) = build_site();
        generate(&folio);

        let public = &folio.public_dir;
        for expected in [
            "index.html",
            "blog/index.html",
            "blog/first-post/index.html",
            "blog/second-post/index.html",
            "about/index.html",
            "projects/index.html",
            "tags/index.html",
            "tags/rust/index.html",
            "tags/wasm/index.html",
            "404.html",
            "atom.xml",
            "search.json",
            "avatar.svg",
        ] {
            assert!(public.join(expected).exists(), "missing {}", expected);
        }
    }

    #[test]
    fn test_post_page_contains_navigation() {
        let (_dir, folio) = build_site();
        generate(&folio);

        // second-post is newest, so its page links to the older first-post
        let html =
            fs::read_to_string(folio.public_dir.join("blog/second-post/index.html")).unwrap();
        assert!(html.contains("/blog/first-post/"));
        assert!(html.contains("min read"));

        let html =
            fs::read_to_string(folio.public_dir.join("blog/first-post/index.html")).unwrap();
        assert!(html.contains("/blog/second-post/"));
    }

    #[test]
    fn test_home_lists_recent_posts_and_projects() {
        let (_dir, folio) = build_site();
        generate(&folio);

        let html = fs::read_to_string(folio.public_dir.join("index.html")).unwrap();
        assert!(html.contains("Second Post"));
        assert!(html.contains("Demo"));
    }

    #[test]
    fn test_atom_feed_entries() {
        let (_dir, folio) = build_site();
        generate(&folio);

        let feed = fs::read_to_string(folio.public_dir.join("atom.xml")).unwrap();
        assert!(feed.contains("<entry>"));
        assert!(feed.contains("First Post"));
        assert!(feed.contains("/blog/second-post/"));
    }

    #[test]
    fn test_search_index_shape() {
        let (_dir, folio) = build_site();
        generate(&folio);

        let json = fs::read_to_string(folio.public_dir.join("search.json")).unwrap();
        let entries: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["slug"], "second-post");
        assert!(entries[0]["content"].as_str().unwrap().contains("Hello"));
    }

    #[test]
    fn test_empty_site_still_generates() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        generate(&folio);

        assert!(folio.public_dir.join("index.html").exists());
        assert!(folio.public_dir.join("blog/index.html").exists());
        assert!(folio.public_dir.join("404.html").exists());
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & <b>"), "a &amp; &lt;b&gt;");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hi <em>there</em></p>"), "Hi there");
    }
}
