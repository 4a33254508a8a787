//! List site content

use anyhow::Result;

use crate::content::ContentLoader;
use crate::projects;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(folio);

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug
                );
            }
        }
        "page" | "pages" => {
            let pages = loader.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [{}]", page.title, page.slug);
            }
        }
        "tag" | "tags" => {
            let posts = loader.load_posts()?;
            let mut counts: std::collections::BTreeMap<String, usize> =
                std::collections::BTreeMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *counts.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", counts.len());
            for (tag, count) in counts {
                println!("  {} ({})", tag, count);
            }
        }
        "project" | "projects" => {
            let projects = projects::load_projects(folio.projects_path())?;
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!(
                    "  {} [{}] - {}",
                    project.title,
                    project.category.label(),
                    project.id
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, page, tag, project",
                content_type
            );
        }
    }

    Ok(())
}
