//! Content loading: front-matter parsing, Markdown rendering, records

pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod record;

pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use record::Record;
