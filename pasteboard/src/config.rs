use anyhow::Context;
use pasteboard_core::ContentKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the pasteboard command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kind used when a command gets no --kind (e.g. "text", "html", "png")
    pub default_kind: String,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Poll interval in milliseconds
    pub interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_kind: ContentKind::default().name().to_string(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval_ms: 500 }
    }
}

impl Config {
    /// Load configuration from `path` or the default location
    ///
    /// A missing file yields the defaults; nothing is written to disk.
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = match path.or_else(default_path) {
            Some(p) => p,
            None => return Ok(Config::default()),
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }
        Self::from_file(&config_path)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.default_kind()?;
        Ok(config)
    }

    pub fn default_kind(&self) -> anyhow::Result<ContentKind> {
        self.default_kind
            .parse()
            .context("invalid default_kind in config")
    }
}

fn default_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("pasteboard");
        path.push("config.toml");
        path
    })
}
