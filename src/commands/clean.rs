//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the generated output
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Removed {:?}", folio.public_dir);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(folio.public_dir.join("blog")).unwrap();
        fs::write(folio.public_dir.join("index.html"), "x").unwrap();

        run(&folio).unwrap();
        assert!(!folio.public_dir.exists());

        // Cleaning an already-clean site is a no-op
        run(&folio).unwrap();
    }
}
