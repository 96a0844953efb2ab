//! Generator module - assembles the output tree for one full build
//!
//! The build is a strictly ordered sequence: reset the output directory,
//! pin the custom domain, copy static assets, load content, then render
//! every page. Any I/O failure aborts the run; there is no rollback, so
//! a failed build can leave a partially populated output directory.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tera::Context;
use walkdir::WalkDir;

use crate::clock::Clock;
use crate::content::{frontmatter, ContentLoader, MarkdownRenderer, Record};
use crate::render::TemplateRenderer;
use crate::Site;

/// How many records the home page shows.
const HOME_RECENT_COUNT: usize = 5;

/// Feed build timestamp format (RFC-1123 style, pinned to GMT).
const FEED_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A record as seen by templates.
#[derive(Debug, Serialize)]
pub struct RecordContext {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub date: String,
    pub date_rfc822: String,
    pub content: String,
}

impl RecordContext {
    fn from_record(record: &Record, base_url: &str) -> Self {
        Self {
            slug: record.slug.clone(),
            title: record.title(),
            url: record.url(base_url),
            date: record.date.format("%Y-%m-%d").to_string(),
            date_rfc822: record.date.format(FEED_DATE_FORMAT).to_string(),
            content: record.rendered_body.clone(),
        }
    }
}

/// Static site generator: renders every page into the output directory.
pub struct Generator<'a> {
    site: &'a Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    clock: &'a dyn Clock,
}

impl<'a> Generator<'a> {
    pub fn new(site: &'a Site, clock: &'a dyn Clock) -> Result<Self> {
        let renderer = TemplateRenderer::new(&site.templates_dir)?;

        Ok(Self {
            site,
            renderer,
            markdown: MarkdownRenderer::new(),
            clock,
        })
    }

    /// Run one full build. Returns the number of published posts.
    pub fn build(&self) -> Result<usize> {
        println!("Building site...");

        self.reset_output()?;
        self.write_cname()?;
        self.copy_static()?;

        let loader = ContentLoader::new(self.site, &self.markdown, self.clock);
        let records = loader.load_records()?;

        self.generate_home(&records)?;
        self.generate_writing_index(&records)?;
        self.generate_posts(&records)?;
        self.generate_about()?;
        self.generate_projects()?;
        self.generate_contact()?;
        self.generate_feed(&records)?;

        println!("✓ Built {} posts", records.len());
        println!("✓ Site generated in {}/", self.site.output_dir.display());

        Ok(records.len())
    }

    /// Replace the output directory with a fresh empty one.
    ///
    /// Destructive by design: the whole tree is removed, then recreated.
    /// Kept as one isolated step so a staged-then-rename strategy could
    /// be swapped in without touching the rest of the build.
    fn reset_output(&self) -> Result<()> {
        let output = &self.site.output_dir;
        if output.exists() {
            fs::remove_dir_all(output)
                .with_context(|| format!("failed to remove {}", output.display()))?;
        }
        fs::create_dir_all(output)
            .with_context(|| format!("failed to create {}", output.display()))?;
        Ok(())
    }

    /// Write the domain-pinning CNAME file when a custom domain is set.
    fn write_cname(&self) -> Result<()> {
        let domain = &self.site.config.custom_domain;
        if domain.is_empty() {
            return Ok(());
        }

        let path = self.site.output_dir.join("CNAME");
        fs::write(&path, domain)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("  Generated: {}", path.display());
        Ok(())
    }

    /// Copy the static asset tree verbatim into `docs/static/`.
    fn copy_static(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let dest_root = self.site.output_dir.join("static");

        for entry in WalkDir::new(static_dir) {
            let entry = entry?;
            let path = entry.path();
            let relative = path.strip_prefix(static_dir)?;
            let dest = dest_root.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest)?;
            } else {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)
                    .with_context(|| format!("failed to copy {}", path.display()))?;
            }
        }

        Ok(())
    }

    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("base_url", &self.site.config.base_url);
        context
    }

    fn record_contexts(&self, records: &[Record]) -> Vec<RecordContext> {
        records
            .iter()
            .map(|r| RecordContext::from_record(r, &self.site.config.base_url))
            .collect()
    }

    /// Render a template and write it to `relative` under the output dir.
    fn write_page(&self, template: &str, context: &Context, relative: &Path) -> Result<()> {
        let output = self.renderer.render(template, context)?;
        let path = self.site.output_dir.join(relative);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, output).with_context(|| format!("failed to write {}", path.display()))?;

        println!("  Generated: {}", path.display());
        tracing::debug!("Generated: {:?}", path);
        Ok(())
    }

    /// Home page: the five most recent posts.
    fn generate_home(&self, records: &[Record]) -> Result<()> {
        let recent = &records[..records.len().min(HOME_RECENT_COUNT)];

        let mut context = self.base_context();
        context.insert("posts", &self.record_contexts(recent));

        self.write_page("home.html", &context, Path::new("index.html"))
    }

    /// Writing index: the full published list.
    fn generate_writing_index(&self, records: &[Record]) -> Result<()> {
        let mut context = self.base_context();
        context.insert("posts", &self.record_contexts(records));

        self.write_page("writing.html", &context, Path::new("writing/index.html"))
    }

    /// One page per published post.
    fn generate_posts(&self, records: &[Record]) -> Result<()> {
        for record in records {
            let mut context = self.base_context();
            context.insert(
                "post",
                &RecordContext::from_record(record, &self.site.config.base_url),
            );

            let relative = Path::new("writing").join(&record.slug).join("index.html");
            self.write_page("post.html", &context, &relative)?;
        }
        Ok(())
    }

    /// About page from `content/about.md`; absent file renders empty.
    fn generate_about(&self) -> Result<()> {
        let about_file = self.site.about_file();

        let content = if about_file.exists() {
            let raw = fs::read_to_string(&about_file)
                .with_context(|| format!("failed to read {}", about_file.display()))?;
            // Strip front-matter when present; fall back to the raw text
            let body = match frontmatter::split(&raw) {
                Some((_, rest)) => rest.trim().to_string(),
                None => raw,
            };
            self.markdown.render(&body)?
        } else {
            String::new()
        };

        let mut context = self.base_context();
        context.insert("content", &content);

        self.write_page("about.html", &context, Path::new("about.html"))
    }

    /// Projects page from `content/projects.yaml`; absent file means an
    /// empty project list, not an error.
    fn generate_projects(&self) -> Result<()> {
        let projects_file = self.site.projects_file();

        let projects: serde_yaml::Value = if projects_file.exists() {
            let raw = fs::read_to_string(&projects_file)
                .with_context(|| format!("failed to read {}", projects_file.display()))?;
            serde_yaml::from_str::<Option<serde_yaml::Value>>(&raw)
                .with_context(|| format!("invalid YAML in {}", projects_file.display()))?
                .unwrap_or(serde_yaml::Value::Sequence(Vec::new()))
        } else {
            serde_yaml::Value::Sequence(Vec::new())
        };

        let mut context = self.base_context();
        context.insert("projects", &projects);

        self.write_page("projects.html", &context, Path::new("projects.html"))
    }

    /// Contact page: no content dependency, base URL only.
    fn generate_contact(&self) -> Result<()> {
        let context = self.base_context();
        self.write_page("contact.html", &context, Path::new("contact.html"))
    }

    /// RSS feed with the full published list and a build timestamp.
    fn generate_feed(&self, records: &[Record]) -> Result<()> {
        let build_date = self.clock.now().format(FEED_DATE_FORMAT).to_string();

        let mut context = Context::new();
        context.insert("posts", &self.record_contexts(records));
        context.insert("build_date", &build_date);

        self.write_page("feed.xml", &context, Path::new("feed.xml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock;
    use crate::config::SiteConfig;

    fn scaffold_site(dir: &Path, config: SiteConfig) -> Site {
        let site = Site::new(dir, config);
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::create_dir_all(&site.templates_dir).unwrap();

        let templates = [
            (
                "home.html",
                "<ul>{% for post in posts %}<li><a href=\"{{ post.url }}\">{{ post.title }}</a></li>{% endfor %}</ul>",
            ),
            (
                "writing.html",
                "{% for post in posts %}<p>{{ post.title }} ({{ post.date }})</p>{% endfor %}",
            ),
            ("post.html", "<article>{{ post.content }}</article>"),
            ("about.html", "<main>{{ content }}</main>"),
            (
                "projects.html",
                "{% for project in projects %}<h2>{{ project.name }}</h2>{% endfor %}",
            ),
            ("contact.html", "<p>Reach me at {{ base_url }}/contact</p>"),
            (
                "feed.xml",
                "<rss><lastBuildDate>{{ build_date }}</lastBuildDate>{% for post in posts %}<item>{{ post.title }}</item>{% endfor %}</rss>",
            ),
        ];
        for (name, body) in templates {
            fs::write(site.templates_dir.join(name), body).unwrap();
        }

        site
    }

    fn write_post(site: &Site, name: &str, text: &str) {
        fs::write(site.posts_dir.join(name), text).unwrap();
    }

    fn read_output(site: &Site, relative: &str) -> String {
        fs::read_to_string(site.output_dir.join(relative)).unwrap()
    }

    #[test]
    fn test_full_build_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());
        write_post(
            &site,
            "hello-world.md",
            "---\ntitle: Hello World\ndate: 2024-01-15\n---\n\nFirst post.\n",
        );

        let clock = clock::fixed("2024-06-01 12:00:00");
        let count = Generator::new(&site, &clock).unwrap().build().unwrap();

        assert_eq!(count, 1);
        assert!(site.output_dir.join("index.html").exists());
        assert!(site.output_dir.join("writing/index.html").exists());
        assert!(site.output_dir.join("writing/hello-world/index.html").exists());
        assert!(site.output_dir.join("about.html").exists());
        assert!(site.output_dir.join("projects.html").exists());
        assert!(site.output_dir.join("contact.html").exists());
        assert!(site.output_dir.join("feed.xml").exists());

        let index = read_output(&site, "writing/index.html");
        assert!(index.contains("Hello World"));
        let post = read_output(&site, "writing/hello-world/index.html");
        assert!(post.contains("First post."));
    }

    #[test]
    fn test_home_lists_newest_first_and_caps_at_five() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());
        write_post(&site, "january.md", "---\ntitle: January\ndate: 2024-01-01\n---\nA.\n");
        write_post(&site, "february.md", "---\ntitle: February\ndate: 2024-02-01\n---\nB.\n");
        for day in 1..=5 {
            write_post(
                &site,
                &format!("march-{}.md", day),
                &format!("---\ntitle: March {}\ndate: 2024-03-{:02}\n---\nC.\n", day, day),
            );
        }

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();

        let home = read_output(&site, "index.html");
        // Five March posts fill the home page; January and February fall off
        assert!(home.contains("March 5"));
        assert!(!home.contains("January"));
        assert!(!home.contains("February"));
        assert!(home.find("March 5").unwrap() < home.find("March 4").unwrap());

        // The writing index still carries everything, newest first
        let writing = read_output(&site, "writing/index.html");
        assert!(writing.find("February").unwrap() < writing.find("January").unwrap());
    }

    #[test]
    fn test_cname_follows_custom_domain() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();
        assert_eq!(read_output(&site, "CNAME"), "braceindustries.com");

        let dir2 = tempfile::tempdir().unwrap();
        let site2 = scaffold_site(
            dir2.path(),
            SiteConfig {
                base_url: String::new(),
                custom_domain: String::new(),
            },
        );
        Generator::new(&site2, &clock).unwrap().build().unwrap();
        assert!(!site2.output_dir.join("CNAME").exists());
    }

    #[test]
    fn test_missing_projects_file_renders_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();

        assert_eq!(read_output(&site, "projects.html"), "");
    }

    #[test]
    fn test_projects_file_is_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());
        fs::write(
            site.projects_file(),
            "- name: Widget\n  year: 2023\n- name: Gadget\n",
        )
        .unwrap();

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();

        let projects = read_output(&site, "projects.html");
        assert!(projects.contains("Widget"));
        assert!(projects.contains("Gadget"));
    }

    #[test]
    fn test_about_strips_frontmatter() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());
        fs::write(
            site.about_file(),
            "---\ntitle: About\n---\n\nAbout the author.\n",
        )
        .unwrap();

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();

        let about = read_output(&site, "about.html");
        assert!(about.contains("About the author."));
        assert!(!about.contains("title: About"));
    }

    #[test]
    fn test_static_tree_is_copied() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());
        let css_dir = site.static_dir.join("css");
        fs::create_dir_all(&css_dir).unwrap();
        fs::write(css_dir.join("site.css"), "body {}").unwrap();

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();

        assert_eq!(read_output(&site, "static/css/site.css"), "body {}");
    }

    #[test]
    fn test_stale_output_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());
        fs::create_dir_all(&site.output_dir).unwrap();
        fs::write(site.output_dir.join("stale.txt"), "old").unwrap();

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();

        assert!(!site.output_dir.join("stale.txt").exists());
    }

    #[test]
    fn test_rebuild_is_idempotent_with_fixed_clock() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());
        write_post(
            &site,
            "hello-world.md",
            "---\ntitle: Hello World\ndate: 2024-01-15\n---\nBody.\n",
        );

        let clock = clock::fixed("2024-06-01 12:00:00");
        let generator = Generator::new(&site, &clock).unwrap();

        generator.build().unwrap();
        let first_feed = read_output(&site, "feed.xml");
        let first_index = read_output(&site, "index.html");

        generator.build().unwrap();
        assert_eq!(read_output(&site, "feed.xml"), first_feed);
        assert_eq!(read_output(&site, "index.html"), first_index);
    }

    #[test]
    fn test_feed_carries_build_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let site = scaffold_site(dir.path(), SiteConfig::default());

        let clock = clock::fixed("2024-06-01 12:00:00");
        Generator::new(&site, &clock).unwrap().build().unwrap();

        let feed = read_output(&site, "feed.xml");
        assert!(feed.contains("Sat, 01 Jun 2024 12:00:00 GMT"));
    }
}
