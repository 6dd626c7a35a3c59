//! Configuration loading for InnoMed.
//! Reads innomed.toml from the current directory or path in INNOMED_CONFIG env var.

use innomed_mit::ScoreWeights;
use innomed_sources::SourceTimeouts;
use innomed_web::QueryLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub scoring: ScoreWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

fn default_bind() -> String { "0.0.0.0:8000".to_string() }

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Directory holding `mock_*.json` tables; compiled-in tables when unset
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

/// Per-provider timeouts in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_10s")]
    pub market: u64,
    #[serde(default = "default_10s")]
    pub trade: u64,
    #[serde(default = "default_15s")]
    pub patents: u64,
    #[serde(default = "default_15s")]
    pub trials: u64,
    #[serde(default = "default_20s")]
    pub web: u64,
    #[serde(default = "default_10s")]
    pub internal: u64,
}

fn default_10s() -> u64 { 10 }
fn default_15s() -> u64 { 15 }
fn default_20s() -> u64 { 20 }

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            market:   default_10s(),
            trade:    default_10s(),
            patents:  default_15s(),
            trials:   default_15s(),
            web:      default_20s(),
            internal: default_10s(),
        }
    }
}

impl TimeoutsConfig {
    pub fn to_source_timeouts(&self) -> SourceTimeouts {
        SourceTimeouts {
            market:   Duration::from_secs(self.market),
            trade:    Duration::from_secs(self.trade),
            patents:  Duration::from_secs(self.patents),
            trials:   Duration::from_secs(self.trials),
            web:      Duration::from_secs(self.web),
            internal: Duration::from_secs(self.internal),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "bool_true")]
    pub enabled: bool,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn bool_true()        -> bool { true }
fn default_ttl_secs() -> u64  { 3600 }

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: bool_true(), ttl_secs: default_ttl_secs() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_reports_dir")]
    pub dir: PathBuf,
}

fn default_reports_dir() -> PathBuf { PathBuf::from("./storage/reports") }

impl Default for ReportsConfig {
    fn default() -> Self {
        Self { dir: default_reports_dir() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_molecule_length")]
    pub max_molecule_length: usize,
    #[serde(default = "default_max_prompt_length")]
    pub max_prompt_length: usize,
}

fn default_max_molecule_length() -> usize { 100 }
fn default_max_prompt_length()   -> usize { 2000 }

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_molecule_length: default_max_molecule_length(),
            max_prompt_length:   default_max_prompt_length(),
        }
    }
}

impl LimitsConfig {
    pub fn to_query_limits(&self) -> QueryLimits {
        QueryLimits {
            max_molecule_length: self.max_molecule_length,
            max_prompt_length:   self.max_prompt_length,
        }
    }
}


impl Config {
    /// Load configuration from innomed.toml.
    /// Checks INNOMED_CONFIG env var first, then current directory.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("INNOMED_CONFIG")
            .unwrap_or_else(|_| "innomed.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::warn!("Config file not found: {path}, using defaults");
            tracing::warn!("Copy innomed.example.toml to innomed.toml to customise.");
            return Ok(Self::default());
        }
        Self::load_from(Path::new(&path))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        if !config.scoring.validate() {
            anyhow::bail!("[scoring] tiers must be ordered large > mid > base");
        }
        Ok(config)
    }
}
