//! Project registry
//!
//! Projects are statically defined in a YAML file at the site root and
//! loaded once per process; the registry is never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading the project registry
#[derive(Debug, Error)]
pub enum ProjectsError {
    #[error("failed to read project registry: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse project registry: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("duplicate project id: {0}")]
    DuplicateId(String),
}

/// Project category, a fixed two-variant set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Fullstack,
    Blockchain,
}

impl ProjectCategory {
    /// Display label for section headings
    pub fn label(&self) -> &'static str {
        match self {
            ProjectCategory::Fullstack => "Full-Stack",
            ProjectCategory::Blockchain => "Blockchain",
        }
    }
}

/// A portfolio project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    pub category: ProjectCategory,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub github: String,
    #[serde(default)]
    pub live_demo: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Load the project registry from a YAML file.
/// An absent file yields an empty registry; duplicate ids are rejected.
pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<Project>, ProjectsError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let projects: Vec<Project> = serde_yaml::from_str(&content)?;

    let mut seen = HashSet::new();
    for project in &projects {
        if !seen.insert(project.id.as_str()) {
            return Err(ProjectsError::DuplicateId(project.id.clone()));
        }
    }

    Ok(projects)
}

/// Filter the registry to a single category, preserving declaration order
pub fn by_category(projects: &[Project], category: ProjectCategory) -> Vec<&Project> {
    projects.iter().filter(|p| p.category == category).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
- id: civicalert
  title: CivicAlert
  description: Real-time emergency incident reporting platform.
  category: fullstack
  technologies: ["Next.js", "NestJS", "MongoDB"]
  github: https://github.com/example/civicalert
  live_demo: https://civicalert.example.com
  highlights:
    - Real-time incident mapping with live updates
    - Role-based access control

- id: proofskill
  title: ProofSkill
  description: Decentralized skill verification marketplace.
  category: blockchain
  technologies: ["Solidity", "Hardhat"]
  github: https://github.com/example/proofskill
  highlights:
    - Soulbound NFTs for skill credentials
"#;

    fn registry(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_registry() {
        let file = registry(SAMPLE);
        let projects = load_projects(file.path()).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, "civicalert");
        assert_eq!(projects[0].category, ProjectCategory::Fullstack);
        assert_eq!(projects[1].live_demo, None);
        assert_eq!(projects[1].highlights.len(), 1);
    }

    #[test]
    fn test_absent_registry_is_empty() {
        let projects = load_projects("/no/such/projects.yml").unwrap();
        assert!(projects.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dup = r#"
- id: same
  title: One
  description: d
  category: fullstack
  github: g
- id: same
  title: Two
  description: d
  category: blockchain
  github: g
"#;
        let file = registry(dup);
        match load_projects(file.path()) {
            Err(ProjectsError::DuplicateId(id)) => assert_eq!(id, "same"),
            other => panic!("expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_by_category_preserves_order() {
        let file = registry(SAMPLE);
        let projects = load_projects(file.path()).unwrap();
        let fullstack = by_category(&projects, ProjectCategory::Fullstack);
        assert_eq!(fullstack.len(), 1);
        assert_eq!(fullstack[0].id, "civicalert");
    }

    #[test]
    fn test_unknown_category_is_parse_error() {
        let bad = "- id: x\n  title: X\n  description: d\n  category: mobile\n  github: g\n";
        let file = registry(bad);
        assert!(matches!(
            load_projects(file.path()),
            Err(ProjectsError::Parse(_))
        ));
    }
}
