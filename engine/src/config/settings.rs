// Engine settings, loaded from a JSON file or the embedded defaults
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::goals::GoalPolicy;
use crate::screener::ScreenerDefaults;

/// Environment variable naming a settings file, used when no path is given.
pub const CONFIG_ENV_VAR: &str = "GROWMORE_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../../config/default.json");

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub log_level: String,
    pub goals: GoalPolicy,
    pub screener: ScreenerDefaults,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            log_level: "info".to_string(),
            goals: GoalPolicy::default(),
            screener: ScreenerDefaults::default(),
        }
    }
}

impl EngineSettings {
    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_json_str(DEFAULT_CONFIG)
    }

    /// Explicit path first, then `GROWMORE_CONFIG`, then the embedded defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }
        match env::var(CONFIG_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => Self::load_from_path(Path::new(value.trim())),
            _ => Self::load_default(),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read settings file '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, EngineError> {
        let settings: EngineSettings = serde_json::from_str(contents)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        tracing::Level::from_str(&self.log_level)
            .map_err(|_| EngineError::ConfigError(format!("Unknown log level '{}'", self.log_level)))?;
        if !self.goals.is_ordered() {
            return Err(EngineError::ConfigError(format!(
                "Goal ratios must satisfy 0 < comfortable ({}) < 1 < aggressive ({})",
                self.goals.comfortable_ratio, self.goals.aggressive_ratio
            )));
        }
        let screener = &self.screener;
        if screener.default_limit == 0 || screener.max_limit == 0 {
            return Err(EngineError::ConfigError("Screener limits must be positive".to_string()));
        }
        if screener.default_limit > screener.max_limit {
            return Err(EngineError::ConfigError(format!(
                "Screener default_limit ({}) exceeds max_limit ({})",
                screener.default_limit, screener.max_limit
            )));
        }
        Ok(())
    }

    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}
