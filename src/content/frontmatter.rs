//! Front-matter parsing

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter data from a post or page.
///
/// Every field is optional; a missing field falls back to an empty
/// string/list so a post with sparse metadata still loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(deserialize_with = "string_or_vec", default)]
    pub tags: Vec<String>,
    pub author: Option<String>,
    pub draft: bool,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string.
    /// Returns (front_matter, remaining_content).
    ///
    /// A file without a leading `---` block has no front-matter; a block
    /// that fails to parse as YAML is masked by the default values rather
    /// than surfaced as an error.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        if !trimmed.starts_with("---") {
            return (FrontMatter::default(), content);
        }

        let rest = trimmed[3..].trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing delimiter, treat as plain content
            return (FrontMatter::default(), content);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return (FrontMatter::default(), remaining);
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!("Malformed front-matter, substituting defaults: {}", e);
                (FrontMatter::default(), remaining)
            }
        }
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_ref().and_then(|s| parse_date_string(s))
    }
}

/// Parse a date string in the formats the content files use
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::from_naive_utc_and_offset(
                dt,
                *Local::now().offset(),
            ));
        }
    }

    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let dt = d.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(
            dt,
            *Local::now().offset(),
        ));
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Understanding the EVM
description: A walk through the Ethereum execution model
date: "2024-03-02"
tags:
  - ethereum
  - solidity
author: Shreeshanth Shetty
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, Some("Understanding the EVM".to_string()));
        assert_eq!(
            fm.description,
            Some("A walk through the Ethereum execution model".to_string())
        );
        assert_eq!(fm.tags, vec!["ethereum", "solidity"]);
        assert!(!fm.draft);
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_inline_tag_list() {
        let content = "---\ntitle: T\ntags: [\"nextjs\", \"react\"]\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.tags, vec!["nextjs", "react"]);
    }

    #[test]
    fn test_single_string_tag() {
        let content = "---\ntitle: T\ntags: notes\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.tags, vec!["notes"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let content = "---\ntitle: Only a title\n---\nbody\n";
        let (fm, _) = FrontMatter::parse(content);
        assert_eq!(fm.description, None);
        assert_eq!(fm.date, None);
        assert!(fm.tags.is_empty());
        assert_eq!(fm.author, None);
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "Just a body, no metadata.\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_malformed_frontmatter_masked() {
        let content = "---\ntitle: [unclosed\ndate 2024\n---\nbody still renders\n";
        let (fm, remaining) = FrontMatter::parse(content);
        assert_eq!(fm.title, None);
        assert!(fm.tags.is_empty());
        assert!(remaining.contains("body still renders"));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");
    }

    #[test]
    fn test_parse_rfc3339_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15T10:30:00+05:30".to_string()),
            ..Default::default()
        };
        assert!(fm.parse_date().is_some());
    }
}
