//! Configuration management for the web lint language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional settings file that enables or disables checkers
//! - Watching that file so edits apply without a restart

use anyhow::{Context, Result, bail};
use clap::Parser;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::validation::Language;

/// Command-line arguments for the web lint language server
#[derive(Debug, Parser)]
#[command(name = "weblint-ls")]
#[command(about = "Language server reporting syntax diagnostics for JavaScript, HTML and CSS")]
#[command(version)]
pub struct Args {
    /// Settings file to read instead of the default location
    #[arg(long, help = "Path to a settings TOML file")]
    pub config: Option<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Print the framework catalog as JSON and exit
    #[arg(long)]
    pub list_frameworks: bool,

    /// Check a single file, print its diagnostics as JSON and exit
    #[arg(long, value_name = "PATH")]
    pub check: Option<PathBuf>,
}

/// Which checkers run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerSettings {
    pub javascript: bool,
    pub html: bool,
    pub css: bool,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            javascript: true,
            html: true,
            css: true,
        }
    }
}

impl CheckerSettings {
    pub fn is_enabled(&self, language: Language) -> bool {
        match language {
            Language::JavaScript => self.javascript,
            Language::Html => self.html,
            Language::Css => self.css,
        }
    }
}

/// Settings file layout (matches TOML)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SettingsFile {
    checkers: CheckerSettings,
}

/// What the binary has been asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Serve,
    ListFrameworks,
    Check(PathBuf),
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// Settings file in effect, whether or not it exists yet
    pub settings_path: Option<PathBuf>,
    pub checkers: CheckerSettings,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let checkers = match &args.config {
            Some(path) if !path.exists() => {
                bail!("Settings file not found: {}", path.display())
            }
            Some(path) => load_checker_settings(path)?,
            None => match default_settings_path() {
                Some(path) => load_checker_settings(&path)?,
                None => CheckerSettings::default(),
            },
        };

        let mode = if args.list_frameworks {
            Mode::ListFrameworks
        } else if let Some(path) = args.check {
            Mode::Check(path)
        } else {
            Mode::Serve
        };

        Ok(Config {
            mode,
            settings_path: args.config.or_else(default_settings_path),
            checkers,
            log_level: args.log_level,
        })
    }
}

/// `~/.config/weblint-ls/config.toml` or the platform equivalent
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("weblint-ls").join("config.toml"))
}

/// Parse settings from TOML text
pub fn parse_checker_settings(content: &str) -> Result<CheckerSettings, toml::de::Error> {
    toml::from_str::<SettingsFile>(content).map(|file| file.checkers)
}

/// Load settings from a file; a missing file means defaults
pub fn load_checker_settings(path: &Path) -> Result<CheckerSettings> {
    if !path.exists() {
        log::debug!("No settings file at {}, using defaults", path.display());
        return Ok(CheckerSettings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    parse_checker_settings(&content)
        .with_context(|| format!("Failed to parse settings TOML: {}", path.display()))
}

/// Events from the file watcher
#[derive(Debug)]
enum WatcherEvent {
    SettingsChanged,
    WatcherError(notify::Error),
}

/// Watches the settings file and reloads it on change
pub struct SettingsWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<WatcherEvent>,
}

impl SettingsWatcher {
    /// Start watching the directory holding `path`. The directory must exist.
    pub fn new(path: PathBuf) -> Result<Self> {
        let Some(dir) = path.parent().filter(|dir| dir.is_dir()) else {
            bail!("Settings directory does not exist: {}", path.display());
        };
        let file_name = path.file_name().map(|name| name.to_os_string());

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) => {
                    if let EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) =
                        event.kind
                    {
                        let touches_settings = event
                            .paths
                            .iter()
                            .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                        if touches_settings {
                            let _ = tx.send(WatcherEvent::SettingsChanged);
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatcherEvent::WatcherError(e));
                }
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(1)),
        )?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            path,
            _watcher: watcher,
            rx,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wait for the next change and return the reloaded settings.
    /// Returns `None` once the watcher has shut down.
    pub async fn next_change(&mut self) -> Option<Result<CheckerSettings>> {
        let event = self.rx.recv().await?;
        Some(match event {
            WatcherEvent::SettingsChanged => load_checker_settings(&self.path),
            WatcherEvent::WatcherError(e) => {
                Err(anyhow::Error::new(e).context("Settings file watcher error"))
            }
        })
    }
}
