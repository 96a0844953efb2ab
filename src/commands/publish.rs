//! Publish operation: promote a draft to the published set
//!
//! Three ordered steps, each independently observable: move the file out
//! of drafts, rewrite its front-matter, rebuild the site. A failure
//! after the move leaves the file moved; there is no rollback.

use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

use super::build;
use crate::clock::Clock;
use crate::content::{frontmatter, record::DATE_FORMAT, ContentLoader, MarkdownRenderer};
use crate::Site;

/// Publish the named draft and rebuild the site.
///
/// A missing draft is a soft error: a message is printed and the process
/// still exits zero, with no file moves and no rebuild.
pub fn run(site: &Site, filename: &str, clock: &dyn Clock) -> Result<()> {
    let draft_path = site.drafts_dir.join(filename);

    if !draft_path.exists() {
        println!(
            "Error: Draft '{}' not found in {}",
            filename,
            site.drafts_dir.display()
        );
        return Ok(());
    }

    fs::create_dir_all(&site.posts_dir)
        .with_context(|| format!("failed to create {}", site.posts_dir.display()))?;

    let post_path = site.posts_dir.join(filename);
    move_file(&draft_path, &post_path)?;

    println!("✓ Published: {}", filename);
    println!(
        "  Moved from {} to {}",
        draft_path.display(),
        post_path.display()
    );

    // Reload the moved file; this also validates its metadata
    let renderer = MarkdownRenderer::new();
    let loader = ContentLoader::new(site, &renderer, clock);
    let record = loader.load_record(&post_path)?;
    tracing::debug!("Publishing record: {}", record.title());

    mark_published(&post_path, clock)?;

    println!("\nRebuilding site...");
    build::run(site, clock)?;

    Ok(())
}

/// Move a file, falling back to copy-then-delete when a rename is not
/// possible (e.g. across filesystems).
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)
            .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
        fs::remove_file(from)
            .with_context(|| format!("failed to remove {}", from.display()))?;
    }
    Ok(())
}

/// Rewrite the file's front-matter with `published: true`, adding a
/// `date` when absent. A file without front-matter is left untouched.
fn mark_published(path: &Path, clock: &dyn Clock) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let Some((block, rest)) = frontmatter::split(&text) else {
        return Ok(());
    };

    let metadata: Option<Value> =
        serde_yaml::from_str(block).context("invalid YAML front-matter")?;
    let mut metadata = match metadata {
        Some(Value::Mapping(map)) => map,
        _ => Mapping::new(),
    };

    metadata.insert(Value::String("published".into()), Value::Bool(true));
    if metadata.get("date").is_none() {
        metadata.insert(
            Value::String("date".into()),
            Value::String(clock.now().format(DATE_FORMAT).to_string()),
        );
    }

    let yaml = serde_yaml::to_string(&metadata)?;
    let updated = format!("---\n{}---\n{}", yaml, rest);
    fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
