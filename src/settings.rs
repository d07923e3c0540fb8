//! Game settings
//!
//! The discrete constant sets the session draws from. Defaults reproduce the
//! classic tuning; a JSON document can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable constant sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Obstacle speed multipliers, picked uniformly at spawn.
    /// Larger values mean a longer interval between moves.
    pub speeds: Vec<u32>,
    /// Spawner defers while this many obstacles are live
    pub max_obstacles: usize,
    /// Period between spawn attempts (ms)
    pub spawn_period_ms: u64,
    /// Minimum time between shots (ms)
    pub fire_cooldown_ms: u64,
    /// Minimum time between brake requests (ms)
    pub slow_cooldown_ms: u64,
    /// Projectile lifetime in ticks
    pub projectile_range: u32,
    /// Lives granted on (re)start
    pub starting_lives: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speeds: vec![10, 1, 5],
            max_obstacles: 10,
            spawn_period_ms: 1000,
            fire_cooldown_ms: 100,
            slow_cooldown_ms: 100,
            projectile_range: 300,
            starting_lives: 4,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.speeds.is_empty() {
            return Err(ConfigError::Invalid {
                field: "speeds",
                reason: "must not be empty",
            });
        }
        if self.speeds.contains(&0) {
            return Err(ConfigError::Invalid {
                field: "speeds",
                reason: "every speed must be at least 1",
            });
        }
        if self.max_obstacles == 0 {
            return Err(ConfigError::Invalid {
                field: "max_obstacles",
                reason: "must be at least 1",
            });
        }
        if self.spawn_period_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "spawn_period_ms",
                reason: "must be at least 1",
            });
        }
        if self.projectile_range == 0 {
            return Err(ConfigError::Invalid {
                field: "projectile_range",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_tuning() {
        let settings = Settings::default();
        assert_eq!(settings.speeds, vec![10, 1, 5]);
        assert_eq!(settings.max_obstacles, 10);
        assert_eq!(settings.spawn_period_ms, 1000);
        assert_eq!(settings.projectile_range, 300);
        assert_eq!(settings.starting_lives, 4);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "max_obstacles": 3 }"#).unwrap();
        assert_eq!(settings.max_obstacles, 3);
        assert_eq!(settings.fire_cooldown_ms, 100);
    }

    #[test]
    fn test_rejects_zero_speed() {
        let err = Settings::from_json(r#"{ "speeds": [1, 0] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "speeds", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ speeds: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            starting_lives: 2,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
