//! Template rendering using the Tera template engine
//!
//! Templates live in the site's `templates/` directory and are addressed
//! by file name (`home.html`, `feed.xml`, ...). A missing template is a
//! fatal build error surfaced at render time.

use anyhow::{Context as _, Result};
use std::path::Path;
use tera::{Context, Tera};

/// Template renderer backed by the site's `templates/` directory.
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Load every template under `templates_dir`.
    pub fn new(templates_dir: &Path) -> Result<Self> {
        let pattern = format!("{}/**/*", templates_dir.display());
        let mut tera = Tera::new(&pattern)
            .with_context(|| format!("failed to load templates from {}", templates_dir.display()))?;

        // Page content is already HTML; escaping here would mangle it.
        tera.autoescape_on(vec![]);

        Ok(Self { tera })
    }

    /// Render a template by name with the given context.
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .with_context(|| format!("failed to render template {}", template_name))
    }
}
