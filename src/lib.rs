//! brace-ssg: a small static site generator
//!
//! Reads Markdown content with YAML front-matter from `content/`, renders
//! it through Tera templates in `templates/`, and writes a deployable
//! static tree to `docs/`.

pub mod clock;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod render;
pub mod server;

use std::path::{Path, PathBuf};

use config::SiteConfig;

/// The site: configuration plus the resolved directory layout.
///
/// Constructed once in `main` and passed by reference into every
/// component that touches the filesystem.
#[derive(Clone)]
pub struct Site {
    /// Site configuration (base URL, custom domain)
    pub config: SiteConfig,
    /// Base directory the site lives in
    pub base_dir: PathBuf,
    /// Content directory (`content/`)
    pub content_dir: PathBuf,
    /// Published post sources (`content/posts/`)
    pub posts_dir: PathBuf,
    /// Unpublished drafts (`content/drafts/`)
    pub drafts_dir: PathBuf,
    /// Template directory (`templates/`)
    pub templates_dir: PathBuf,
    /// Static asset tree (`static/`)
    pub static_dir: PathBuf,
    /// Output directory (`docs/`)
    pub output_dir: PathBuf,
}

impl Site {
    /// Create a site rooted at `base_dir` with the given configuration.
    pub fn new<P: AsRef<Path>>(base_dir: P, config: SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join("content");

        Self {
            config,
            posts_dir: content_dir.join("posts"),
            drafts_dir: content_dir.join("drafts"),
            content_dir,
            templates_dir: base_dir.join("templates"),
            static_dir: base_dir.join("static"),
            output_dir: base_dir.join("docs"),
            base_dir,
        }
    }

    /// Path of the singleton About page source.
    pub fn about_file(&self) -> PathBuf {
        self.content_dir.join("about.md")
    }

    /// Path of the projects data file.
    pub fn projects_file(&self) -> PathBuf {
        self.content_dir.join("projects.yaml")
    }
}
