use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::services::pagination::DEFAULT_PAGE_SIZE;
use crate::services::weighting::DEFAULT_MIN_VOTES;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Account names whose lists are merged.
    pub users: Vec<String>,

    pub general: GeneralConfig,

    pub paths: PathsConfig,

    pub fetch: FetchConfig,

    pub ranking: RankingConfig,

    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// "text" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where fetched exports are stored until the pages are written.
    pub temp_dir: PathBuf,

    pub output_dir: PathBuf,

    pub template_file: PathBuf,

    /// Keep downloaded exports after a run instead of emptying `temp_dir`.
    pub keep_exports: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            temp_dir: PathBuf::from("./temp"),
            output_dir: PathBuf::from("./public"),
            template_file: PathBuf::from("./template.html"),
            keep_exports: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Export endpoint. `u`, `status` and `type` query parameters are appended.
    pub export_url: String,

    pub max_parallel_downloads: usize,

    /// Pause between download batches to stay under the site's rate limit.
    pub batch_delay_seconds: u64,

    /// Wait after the last batch before the exports are read.
    pub settle_seconds: u64,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            export_url: "https://myanimelist.net/malappinfo.php".to_string(),
            max_parallel_downloads: 3,
            batch_delay_seconds: 2,
            settle_seconds: 1,
            request_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Minimum-votes constant of the weighted score.
    pub min_votes: f64,

    pub page_size: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_votes: DEFAULT_MIN_VOTES,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prefix for every generated CSS class and id.
    pub css_prefix: String,

    pub profile_url: String,

    pub profile_label: String,

    pub anime_url: String,

    pub manga_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            css_prefix: "mal-".to_string(),
            profile_url: "https://myanimelist.net/profile/".to_string(),
            profile_label: "myanimelist.net".to_string(),
            anime_url: "https://myanimelist.net/anime/".to_string(),
            manga_url: "https://myanimelist.net/manga/".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            general: GeneralConfig::default(),
            paths: PathsConfig::default(),
            fetch: FetchConfig::default(),
            ranking: RankingConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Loads from `path` when given, otherwise from the first existing file
    /// in the default search locations.
    pub fn load_with_override(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("listarr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".listarr").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes the default config to `path` unless a file is already there.
    ///
    /// Returns whether a file was created.
    pub fn create_default_at(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranking.page_size == 0 {
            anyhow::bail!("ranking.page_size must be > 0");
        }

        if !(self.ranking.min_votes.is_finite() && self.ranking.min_votes > 0.0) {
            anyhow::bail!("ranking.min_votes must be a positive number");
        }

        if self.fetch.max_parallel_downloads == 0 {
            anyhow::bail!("fetch.max_parallel_downloads must be > 0");
        }

        if self.fetch.export_url.trim().is_empty() {
            anyhow::bail!("fetch.export_url cannot be empty");
        }

        Ok(())
    }

    /// Configured user names with duplicates removed, first occurrence kept.
    #[must_use]
    pub fn unique_users(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.users
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty() && seen.insert(u.to_string()))
            .map(str::to_string)
            .collect()
    }
}
