// Configuration module for reading Duel.toml
// This module provides OOP-style configuration management for the game

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::input::Key;
use crate::player::KeyBindings;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub timing: TimingConfig,
    pub snake: SnakeConfig,
    pub controls: ControlsConfig,
    pub logging: LoggingConfig,
    pub debug: DebugConfig,
}

/// Frame rate and growth pacing
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    pub ticks_per_second: u32,
    pub growth_interval_secs: u32,
}

impl TimingConfig {
    /// Time budget of a single frame
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }

    /// Number of frames between two growth steps
    pub fn growth_period_ticks(&self) -> u64 {
        u64::from(self.growth_interval_secs) * u64::from(self.ticks_per_second)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.ticks_per_second == 0 {
            return Err("timing.ticks_per_second must be positive".to_string());
        }
        if self.growth_interval_secs == 0 {
            return Err("timing.growth_interval_secs must be positive".to_string());
        }
        Ok(())
    }
}

/// Snake sizing
#[derive(Debug, Deserialize, Clone)]
pub struct SnakeConfig {
    /// Initial length is the playable width divided by this
    pub length_divisor: u32,
}

impl SnakeConfig {
    pub fn initial_length(&self, initial_width: i32) -> usize {
        let divisor = self.length_divisor.max(1) as i32;
        (initial_width / divisor).max(1) as usize
    }
}

/// Key names for both players
#[derive(Debug, Deserialize, Clone)]
pub struct ControlsConfig {
    pub player_one: KeyBindingsConfig,
    pub player_two: KeyBindingsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeyBindingsConfig {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
}

impl KeyBindingsConfig {
    pub fn to_bindings(&self) -> Result<KeyBindings, String> {
        Ok(KeyBindings {
            up: Key::parse(&self.up)?,
            down: Key::parse(&self.down)?,
            left: Key::parse(&self.left)?,
            right: Key::parse(&self.right)?,
        })
    }
}

/// Where log output goes; the terminal itself is taken by the game
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub file_path: String,
    /// Filter used when RUST_LOG is not set
    pub level: String,
}

/// Round log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Duel.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Duel.toml in the working directory
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Duel.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the values shipped in Duel.toml
    pub fn default_hardcoded() -> Self {
        Config {
            timing: TimingConfig {
                ticks_per_second: 20,
                growth_interval_secs: 2,
            },
            snake: SnakeConfig { length_divisor: 5 },
            controls: ControlsConfig {
                player_one: KeyBindingsConfig {
                    up: "w".to_string(),
                    down: "s".to_string(),
                    left: "a".to_string(),
                    right: "d".to_string(),
                },
                player_two: KeyBindingsConfig {
                    up: "up".to_string(),
                    down: "down".to_string(),
                    left: "left".to_string(),
                    right: "right".to_string(),
                },
            },
            logging: LoggingConfig {
                file_path: "duel_snake.log".to_string(),
                level: "info".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "duel_rounds.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Duel.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
