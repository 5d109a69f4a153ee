use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schedule::ScheduleConfig;
use crate::scoring::{RankingLimits, ScoringWeights};
use crate::strategy::StrategyThresholds;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub web_root: String,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            web_root: "public".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub scoring: ScoringWeights,
    pub ranking: RankingLimits,
    pub strategy: StrategyThresholds,
    pub schedule: ScheduleConfig,
    pub server: ServerConfig,
}

impl PlannerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => PlannerConfig::default(),
        };

        config.apply_env_overrides(|key| env::var(key).ok());
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(write_error)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("HOST").filter(|value| !value.trim().is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|value| value.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(web_root) = lookup("WEB_ROOT").filter(|value| !value.trim().is_empty()) {
            self.server.web_root = web_root;
        }
        if let Some(limit) = lookup("MAX_BODY_BYTES").and_then(|value| value.trim().parse::<usize>().ok()) {
            self.server.max_body_bytes = limit;
        }
        if let Some(days) = lookup("SCHEDULE_WINDOW_DAYS").and_then(|value| value.trim().parse::<u32>().ok()) {
            self.schedule.window_days = days;
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("PLANNER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/planner.toml")))
}
