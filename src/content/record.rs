//! Content record model
//!
//! One record per content source file, rebuilt from disk on every run.
//! The metadata mapping keeps whatever the author wrote; the well-known
//! keys (`title`, `date`, `published`) get accessors with defaults.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use serde_yaml::Mapping;
use std::path::Path;

use super::{frontmatter, MarkdownRenderer};
use crate::clock::Clock;

/// Date format accepted in front-matter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A post or page after front-matter and Markdown processing.
#[derive(Debug, Clone)]
pub struct Record {
    /// Identifier derived from the file stem; drives output paths and URLs
    pub slug: String,
    /// Parsed front-matter, verbatim
    pub metadata: Mapping,
    /// Body text following the front-matter, unparsed
    pub raw_body: String,
    /// HTML produced from `raw_body`, computed once at load
    pub rendered_body: String,
    /// Publication date, resolved at load (front-matter or "now")
    pub date: DateTime<Local>,
}

impl Record {
    /// Load a record from a Markdown file.
    ///
    /// A malformed `date` string is fatal; a missing one defaults to the
    /// clock's current instant.
    pub fn load(path: &Path, renderer: &MarkdownRenderer, clock: &dyn Clock) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| anyhow!("invalid file name: {}", path.display()))?
            .to_string();

        let (metadata, body) = frontmatter::parse(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let date = resolve_date(&metadata, clock)
            .with_context(|| format!("invalid date in {}", path.display()))?;

        let rendered_body = renderer.render(body)?;

        Ok(Self {
            slug,
            metadata,
            raw_body: body.to_string(),
            rendered_body,
            date,
        })
    }

    /// Title from front-matter, defaulting to a humanized slug
    /// (`hello-world` becomes `Hello World`).
    pub fn title(&self) -> String {
        self.metadata
            .get("title")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| humanize(&self.slug))
    }

    /// Publish flag from front-matter; absent means published.
    pub fn published(&self) -> bool {
        self.metadata
            .get("published")
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }

    /// Canonical URL under the configured base path.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/writing/{}/", base_url, self.slug)
    }
}

/// Resolve the record date: absent falls back to the clock, a string
/// must be a strict `YYYY-MM-DD` calendar date (midnight local).
fn resolve_date(metadata: &Mapping, clock: &dyn Clock) -> Result<DateTime<Local>> {
    match metadata.get("date") {
        None => Ok(clock.now()),
        Some(value) => {
            let s = value
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| yaml_scalar_to_string(value));
            let date = NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
                .with_context(|| format!("date {:?} is not {}", s, DATE_FORMAT))?;
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| anyhow!("invalid time for date {:?}", s))?;
            midnight
                .and_local_timezone(Local)
                .single()
                .ok_or_else(|| anyhow!("ambiguous local time for date {:?}", s))
        }
    }
}

/// YAML parses bare `2024-01-15` as a string, but be tolerant of other
/// scalar shapes by formatting them back to text before date parsing.
fn yaml_scalar_to_string(value: &serde_yaml::Value) -> String {
    serde_yaml::to_string(value)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Replace hyphens with spaces and title-case each word: first letter
/// uppercased, the rest lowercased (`my-API-post` becomes `My Api Post`).
fn humanize(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
