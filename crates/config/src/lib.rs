//! Layered configuration for klipbook.
//!
//! Layers are merged in order, later layers winning:
//!
//! 1. built-in defaults ([`Config::default`]);
//! 2. `config.toml` and `config.yaml` in the user config directory;
//! 3. an explicitly requested file (`--config`), TOML or YAML by extension;
//! 4. `KLIPBOOK_*` environment variables, e.g. `KLIPBOOK_BOOKS=25`.

pub mod error;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use klipbook_extract::ParsePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const ENV_PREFIX: &str = "KLIPBOOK_";
pub const DEFAULT_BOOKS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many of the most recently updated books to output.
    pub books: usize,
    pub policy: ParsePolicy,
    /// Overwrite existing output files.
    pub force: bool,
    /// File name template for per-book HTML pages, if not the builtin one.
    pub filename: Option<String>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            books: DEFAULT_BOOKS,
            policy: ParsePolicy::default(),
            force: false,
            filename: None,
        }
    }
}
impl Config {
    /// Loads the configuration from every layer, looking for user config files
    /// in the platform's config directory (e.g. `~/.config/klipbook`).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(user_config_dir().as_deref(), explicit)
    }

    /// Like [`load`](Self::load), with the user config directory given
    /// explicitly. `None` skips that layer.
    #[instrument(level = "debug")]
    pub fn load_from(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let config: Self = figment(user_dir, explicit)?
            .extract()
            .map_err(|err| ErrorKind::Invalid(err.to_string()))?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }
}

pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "klipbook").map(|dirs| dirs.config_dir().to_path_buf())
}

fn figment(user_dir: Option<&Path>, explicit: Option<&Path>) -> Result<Figment> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if let Some(dir) = user_dir {
        // Missing user files are silently skipped by figment.
        figment = figment.merge(Toml::file(dir.join("config.toml"))).merge(Yaml::file(dir.join("config.yaml")));
    }
    if let Some(path) = explicit {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        figment = match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => figment.merge(Toml::file_exact(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        };
    }
    Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
}
