use crate::controller::GenreSource;
use crate::error::{CatalogError, Result};
use crate::store::memory::Latency;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FETCH_LATENCY_MS: u64 = 500;
const DEFAULT_MUTATION_LATENCY_MS: u64 = 300;

/// Keys accepted by [`CatalogConfig::get`] and [`CatalogConfig::set`].
pub const CONFIG_KEYS: [&str; 4] = [
    "fetch-latency",
    "mutation-latency",
    "genre-source",
    "seed-file",
];

/// Configuration for moviehub, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Simulated delay of a full catalog fetch, in milliseconds
    #[serde(default = "default_fetch_latency")]
    pub fetch_latency_ms: u64,

    /// Simulated delay of add, update and delete, in milliseconds
    #[serde(default = "default_mutation_latency")]
    pub mutation_latency_ms: u64,

    /// Where the genre filter list comes from
    #[serde(default)]
    pub genre_source: GenreSource,

    /// JSON file replacing the built-in seed catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
}

fn default_fetch_latency() -> u64 {
    DEFAULT_FETCH_LATENCY_MS
}

fn default_mutation_latency() -> u64 {
    DEFAULT_MUTATION_LATENCY_MS
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fetch_latency_ms: DEFAULT_FETCH_LATENCY_MS,
            mutation_latency_ms: DEFAULT_MUTATION_LATENCY_MS,
            genre_source: GenreSource::default(),
            seed_file: None,
        }
    }
}

impl CatalogConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CatalogError::Io)?;
        let config: CatalogConfig =
            serde_json::from_str(&content).map_err(CatalogError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CatalogError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CatalogError::Serialization)?;
        fs::write(config_path, content).map_err(CatalogError::Io)?;
        Ok(())
    }

    pub fn latency(&self) -> Latency {
        Latency::from_millis(self.fetch_latency_ms, self.mutation_latency_ms)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "fetch-latency" => Some(self.fetch_latency_ms.to_string()),
            "mutation-latency" => Some(self.mutation_latency_ms.to_string()),
            "genre-source" => Some(
                match self.genre_source {
                    GenreSource::Seed => "seed",
                    GenreSource::Live => "live",
                }
                .to_string(),
            ),
            "seed-file" => Some(
                self.seed_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    /// Set a key from its text form. An empty `seed-file` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "fetch-latency" => self.fetch_latency_ms = parse_millis(key, value)?,
            "mutation-latency" => self.mutation_latency_ms = parse_millis(key, value)?,
            "genre-source" => {
                self.genre_source = match value {
                    "seed" => GenreSource::Seed,
                    "live" => GenreSource::Live,
                    other => {
                        return Err(CatalogError::Api(format!(
                            "genre-source must be 'seed' or 'live', got '{}'",
                            other
                        )))
                    }
                }
            }
            "seed-file" => {
                self.seed_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                }
            }
            other => {
                return Err(CatalogError::Api(format!(
                    "Unknown config key: {} (expected one of {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| CatalogError::Api(format!("{} must be a number of milliseconds", key)))
}
