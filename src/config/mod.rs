//! Site configuration
//!
//! Read from the environment exactly once at process start; library code
//! only ever sees this struct, never the environment itself.

/// Site configuration threaded into URL construction and rendering.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Prefix for all generated internal links.
    ///
    /// Empty for a root domain, `/repo-name` for project-pages hosting.
    pub base_url: String,

    /// Custom domain written to `docs/CNAME`; empty disables the file.
    pub custom_domain: String,
}

impl SiteConfig {
    /// Build the configuration from `BASE_URL` and `CUSTOM_DOMAIN`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("BASE_URL").unwrap_or_default(),
            custom_domain: std::env::var("CUSTOM_DOMAIN")
                .unwrap_or_else(|_| "braceindustries.com".to_string()),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            custom_domain: "braceindustries.com".to_string(),
        }
    }
}
