//! Content loader - builds the published, date-sorted record list

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::{MarkdownRenderer, Record};
use crate::clock::Clock;
use crate::Site;

/// Loads content records from the posts directory.
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: &'a MarkdownRenderer,
    clock: &'a dyn Clock,
}

impl<'a> ContentLoader<'a> {
    pub fn new(site: &'a Site, renderer: &'a MarkdownRenderer, clock: &'a dyn Clock) -> Self {
        Self {
            site,
            renderer,
            clock,
        }
    }

    /// Load every published record, sorted by date descending.
    ///
    /// Only `*.md` files directly inside the posts directory are
    /// considered; subdirectories are not scanned. A missing directory
    /// yields an empty list. A record that fails to load (unreadable
    /// file, invalid YAML, malformed date) aborts the build.
    pub fn load_records(&self) -> Result<Vec<Record>> {
        let posts_dir = &self.site.posts_dir;
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry in fs::read_dir(posts_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_markdown_file(&path) {
                let record = self.load_record(&path)?;
                if record.published() {
                    records.push(record);
                } else {
                    tracing::debug!("Skipping unpublished: {}", path.display());
                }
            }
        }

        // Stable sort keeps enumeration order for equal dates
        records.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(records)
    }

    /// Load a single record from a file.
    pub fn load_record(&self, path: &Path) -> Result<Record> {
        Record::load(path, self.renderer, self.clock)
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}
