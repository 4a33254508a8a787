//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::projects;
use crate::Folio;

/// Generate the static site.
/// Content is re-read and re-parsed in full on every run.
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(folio);
    let posts = loader.load_posts()?;
    let pages = loader.load_pages()?;
    let projects = projects::load_projects(folio.projects_path())?;

    tracing::info!(
        "Loaded {} posts, {} pages, {} projects",
        posts.len(),
        pages.len(),
        projects.len()
    );

    let generator = Generator::new(folio)?;
    generator.generate(&posts, &pages, &projects)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if folio.content_dir.exists() {
        watcher.watch(folio.content_dir.as_ref(), notify::RecursiveMode::Recursive)?;
    }

    let projects_path = folio.projects_path();
    if projects_path.exists() {
        watcher.watch(&projects_path, notify::RecursiveMode::NonRecursive)?;
    }

    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    // Debounce events
    let mut last_rebuild = std::time::Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    if let Err(e) = run(folio) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = std::time::Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
