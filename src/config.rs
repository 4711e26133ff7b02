//! Configuration file support for filelookup
//!
//! Defaults for the command line come from the first config file found:
//!
//! 1. A project config (`.filelookup.json`, `.filelookup.toml`,
//!    `.filelookup.yaml` or `.filelookup.yml`) in the working directory or
//!    any of its parents.
//! 2. A user config (`config.json`, `config.toml`, `config.yaml` or
//!    `config.yml`) in `~/.config/filelookup/`.
//!
//! ```json
//! {
//!   "candidates": ["config.json", "config.yaml"],
//!   "bubble": true,
//!   "contents": false
//! }
//! ```
//!
//! No config file at all means built-in defaults. A config file that exists
//! but cannot be read or parsed is an error.

use crate::fs::{FileSystem, HostFs};
use crate::lookup::{LookupError, LookupRequest, LookupResult, lookup_with};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project config filenames, highest priority first
pub const PROJECT_CONFIG_FILES: &[&str] = &[
    ".filelookup.json",
    ".filelookup.toml",
    ".filelookup.yaml",
    ".filelookup.yml",
];

/// User config filenames inside the config directory
pub const USER_CONFIG_FILES: &[&str] = &["config.json", "config.toml", "config.yaml", "config.yml"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot determine config directory. HOME environment variable not set.")]
    NoConfigDir,

    #[error(transparent)]
    Read(#[from] LookupError),

    #[error("Failed to parse config file {path}: {details}")]
    Parse { path: PathBuf, details: String },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Candidate filenames used when none are given on the command line
    pub candidates: Vec<String>,

    /// Search parent directories by default
    pub bubble: bool,

    /// Print contents instead of paths by default
    pub contents: bool,

    /// The file this config was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load configuration for the current directory, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let user_dir = match config_dir() {
            Ok(dir) => Some(dir),
            Err(e) => {
                debug!("Skipping user config: {e}");
                None
            }
        };
        Self::load_with(&HostFs, &cwd, user_dir.as_deref())
    }

    /// Resolve configuration against `fs`, starting the project search at `cwd`.
    pub fn load_with<F>(fs: &F, cwd: &Path, user_dir: Option<&Path>) -> Result<Self, ConfigError>
    where
        F: FileSystem + ?Sized,
    {
        let project = LookupRequest::new(cwd, PROJECT_CONFIG_FILES.iter().copied()).with_bubble();
        if let Some(path) = find_path(fs, &project)? {
            return Self::read(fs, path);
        }

        if let Some(dir) = user_dir {
            let user = LookupRequest::new(dir, USER_CONFIG_FILES.iter().copied());
            if let Some(path) = find_path(fs, &user)? {
                return Self::read(fs, path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Config::default())
    }

    fn read<F>(fs: &F, path: PathBuf) -> Result<Self, ConfigError>
    where
        F: FileSystem + ?Sized,
    {
        debug!("Loading config from {path:?}");
        let content = match fs.read_to_string(&path) {
            Ok(content) => content,
            Err(source) => return Err(LookupError::Read { path, source }.into()),
        };

        let mut config = parse(&path, &content)?;
        config.source = Some(path);
        Ok(config)
    }
}

fn find_path<F>(fs: &F, request: &LookupRequest) -> Result<Option<PathBuf>, LookupError>
where
    F: FileSystem + ?Sized,
{
    Ok(lookup_with(fs, request)?.and_then(LookupResult::into_path))
}

/// Parse config text, picking the format from the file extension.
fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let parsed = match extension {
        "toml" => toml::from_str(content).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| e.to_string()),
        _ => serde_json::from_str(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|details| ConfigError::Parse {
        path: path.to_path_buf(),
        details,
    })
}

/// Returns the user config directory: `~/.config/filelookup`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".config"))
                .unwrap_or_default()
        });

    if config_base.as_os_str().is_empty() {
        return Err(ConfigError::NoConfigDir);
    }

    Ok(config_base.join("filelookup"))
}
