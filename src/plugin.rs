//! Host pipeline adapter
//!
//! Wires the documentation build lifecycle to the history query and the
//! table renderer:
//!
//! 1. [`LatestChangesPlugin::on_startup`]: remember whether the host serves
//! 2. [`LatestChangesPlugin::on_config`]: validate options, resolve vendor
//! 3. [`LatestChangesPlugin::on_page_markdown`]: replace [`MARKER`]

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{PluginConfig, Settings, SiteConfig};
use crate::error::PluginError;
use crate::git::constants::special;
use crate::history::{HistoryQuery, get_recent_changes};
use crate::model::{Vendor, resolve_vendor};
use crate::paths;
use crate::render::{render_notice, render_table};

/// Token replaced by the latest-changes table
pub const MARKER: &str = "{{ latest_changes }}";

/// Host command being run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildCommand {
    #[default]
    Build,
    GhDeploy,
    Serve,
}

/// A documentation page handed to the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Path relative to the docs directory, for log messages
    pub src_uri: String,

    /// Absolute path of the page source
    pub abs_src_path: PathBuf,
}

/// Options resolved by [`LatestChangesPlugin::on_config`]
#[derive(Debug, Clone)]
struct Configured {
    settings: Settings,
    repo_vendor: Option<Vendor>,
    repo_url: String,
    tracked_dir: PathBuf,
}

/// The latest-changes plugin
#[derive(Debug, Clone)]
pub struct LatestChangesPlugin {
    config: PluginConfig,
    start_dir: Option<PathBuf>,
    is_serve: bool,
    configured: Option<Configured>,
}

impl LatestChangesPlugin {
    /// Create a plugin; the repository is searched from the current directory
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            start_dir: None,
            is_serve: false,
            configured: None,
        }
    }

    /// Search for the repository starting at `dir` instead
    pub fn with_start_dir(mut self, dir: PathBuf) -> Self {
        self.start_dir = Some(dir);
        self
    }

    pub fn on_startup(&mut self, command: BuildCommand) {
        self.is_serve = command == BuildCommand::Serve;
    }

    /// Validate options and resolve everything that does not depend on a page
    ///
    /// Any invalid option is fatal, before git is touched.
    pub fn on_config(&mut self, site: &SiteConfig) -> Result<(), PluginError> {
        if self.is_disabled_on_serve() {
            info!("Plugin deactivated during `serve`. Hint: config option `enabled_on_serve`");
        }

        let settings = self.config.validate()?;

        let repo_vendor = resolve_vendor(&settings.repo_vendor, &site.vendor_hint());
        let repo_url = site.repo_url.clone().unwrap_or_default();

        let tracked_dir = if settings.limit_to_docs_dir {
            let docs_dir = self.absolute(&site.docs_dir)?;
            debug!(
                "limit_to_docs_dir enabled: only files from {} are taken into account",
                docs_dir.display()
            );
            docs_dir
        } else {
            PathBuf::from(special::WHOLE_TREE)
        };

        self.configured = Some(Configured {
            settings,
            repo_vendor,
            repo_url,
            tracked_dir,
        });
        Ok(())
    }

    /// Replace the marker in `markdown` with the latest-changes table
    ///
    /// Returns `None` when the page is left untouched.
    pub fn on_page_markdown(
        &self,
        markdown: &str,
        page: &Page,
    ) -> Result<Option<String>, PluginError> {
        if self.is_disabled_on_serve() || !markdown.contains(MARKER) {
            return Ok(None);
        }

        let configured = self.configured.as_ref().ok_or(PluginError::NotConfigured)?;
        debug!("Found latest_changes marker in {}", page.src_uri);

        let query = HistoryQuery {
            repo_url: configured.repo_url.clone(),
            repo_vendor: configured.repo_vendor,
            history_limit: configured.settings.history_limit,
            scope_dir: configured.tracked_dir.clone(),
            page_path: paths::resolve(&page.abs_src_path),
            start_dir: self.start_dir.clone(),
        };
        let changes = get_recent_changes(&query)?;

        let mut table = render_table(
            &changes.entries,
            &configured.settings.columns,
            &configured.settings.timestamp_format,
            configured.settings.limit_to_docs_dir,
        );

        if let Some(notice) = changes.truncation_notice {
            table.push_str("\n\n");
            table.push_str(&render_notice(&notice));
            table.push_str("\n\n");
        }

        Ok(Some(markdown.replace(MARKER, &table)))
    }

    fn is_disabled_on_serve(&self) -> bool {
        self.is_serve && !self.config.enabled_on_serve
    }

    fn absolute(&self, path: &Path) -> Result<PathBuf, PluginError> {
        let base = match &self.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        Ok(paths::resolve(&base.join(path)))
    }
}
