//! git-latest-changes
//!
//! Binary entry point: runs the plugin lifecycle over markdown pages, the
//! way a documentation build would.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use git_latest_changes::config::ConfigFile;
use git_latest_changes::{BuildCommand, LatestChangesPlugin, Page};

#[derive(Parser, Debug)]
#[command(name = "git-latest-changes")]
#[command(about = "Replace {{ latest_changes }} in markdown pages with the latest git change per file", long_about = None)]
struct Cli {
    /// Markdown pages to process
    #[arg(required = true)]
    pages: Vec<PathBuf>,

    /// TOML file with [site] and [plugin] tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the hosted repository (overrides [site].repo_url)
    #[arg(long)]
    repo_url: Option<String>,

    /// Repository name or vendor hint, e.g. GitHub (overrides [site].repo_name)
    #[arg(long)]
    repo_name: Option<String>,

    /// Documentation source directory (overrides [site].docs_dir)
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// Behave like a preview server (honors enabled_on_serve)
    #[arg(long)]
    serve: bool,

    /// Rewrite pages instead of printing them
    #[arg(long)]
    in_place: bool,

    /// Enable verbose logging (or set GIT_LATEST_CHANGES_LOG)
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("GIT_LATEST_CHANGES_LOG").unwrap_or_else(|_| {
        if verbose {
            "git_latest_changes=debug".to_string()
        } else {
            "git_latest_changes=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ConfigFile::from_file(path)?,
        None => ConfigFile::default(),
    };
    if cli.repo_url.is_some() {
        config.site.repo_url = cli.repo_url.clone();
    }
    if cli.repo_name.is_some() {
        config.site.repo_name = cli.repo_name.clone();
    }
    if let Some(docs_dir) = &cli.docs_dir {
        config.site.docs_dir = docs_dir.clone();
    }

    let mut plugin = LatestChangesPlugin::new(config.plugin);
    plugin.on_startup(if cli.serve {
        BuildCommand::Serve
    } else {
        BuildCommand::Build
    });
    plugin.on_config(&config.site)?;

    for path in &cli.pages {
        let markdown = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        let page = Page {
            src_uri: path.display().to_string(),
            abs_src_path: std::path::absolute(path)?,
        };

        let rendered = plugin.on_page_markdown(&markdown, &page)?;
        let output = rendered.as_deref().unwrap_or(&markdown);

        if cli.in_place {
            if rendered.is_some() {
                std::fs::write(path, output)
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
            }
        } else {
            print!("{}", output);
        }
    }

    Ok(())
}
