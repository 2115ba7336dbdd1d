use crate::error::{JobTrackError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_RECENT_LIMIT: usize = 5;

/// Configuration for jobtrack, stored next to the database as config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobTrackConfig {
    /// Write the database file indented
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,

    /// How many applications the dashboard lists as recent
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_pretty_json() -> bool {
    true
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for JobTrackConfig {
    fn default() -> Self {
        Self {
            pretty_json: default_pretty_json(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl JobTrackConfig {
    pub const KEYS: [&'static str; 2] = ["pretty-json", "recent-limit"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: JobTrackConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "pretty-json" => Ok(self.pretty_json.to_string()),
            "recent-limit" => Ok(self.recent_limit.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "pretty-json" => {
                self.pretty_json = value.parse().map_err(|_| {
                    JobTrackError::Config(format!("pretty-json expects true or false, got {}", value))
                })?;
            }
            "recent-limit" => {
                self.recent_limit = value.parse().map_err(|_| {
                    JobTrackError::Config(format!(
                        "recent-limit expects a non-negative number, got {}",
                        value
                    ))
                })?;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> JobTrackError {
    JobTrackError::Config(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        JobTrackConfig::KEYS.join(", ")
    ))
}
