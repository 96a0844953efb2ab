//! CLI entry point for brace-ssg

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brace_ssg::clock::SystemClock;
use brace_ssg::config::SiteConfig;
use brace_ssg::{commands, server, Site};

#[derive(Parser)]
#[command(name = "brace")]
#[command(version)]
#[command(about = "Brace Industries static site generator", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Build once, then serve docs/ until interrupted
    #[arg(long)]
    serve: bool,

    /// Port for the dev server
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Publish a draft post by filename
    #[arg(long, value_name = "FILENAME")]
    publish: Option<String>,

    /// Print deployment instructions
    #[arg(long)]
    deploy: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "brace_ssg=debug,info"
    } else {
        "brace_ssg=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    // Configuration is read from the environment exactly once, here
    let site = Site::new(base_dir, SiteConfig::from_env());
    let clock = SystemClock;

    if let Some(filename) = cli.publish {
        commands::publish::run(&site, &filename, &clock)?;
    } else if cli.serve {
        commands::build::run(&site, &clock)?;
        server::start(&site, cli.port).await?;
    } else if cli.deploy {
        commands::deploy::run();
    } else {
        commands::build::run(&site, &clock)?;
    }

    Ok(())
}
