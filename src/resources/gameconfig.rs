//! Game configuration resource.
//!
//! Manages timing and knight tuning loaded from an INI configuration file.
//! Provides defaults for safe startup; missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [time]
//! fixed_delta = 0.02
//! max_frame_delta = 0.25
//!
//! [knight]
//! jump_force = 12.0
//! jump_extra_force = 0.5
//! jump_hold_max = 0.25
//! gravity = 0.7
//! walk_speed = 10.0
//! dash_speed = 35.0
//! dash_ticks = 8
//! dash_momentum = 15.0
//! momentum_window = 0.2
//! combo_window = 0.3
//! land_buffer = 0.05
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::actor::ActorTuning;

/// Default safe values for startup
const DEFAULT_FIXED_DELTA: f32 = 0.02;
const DEFAULT_MAX_FRAME_DELTA: f32 = 0.25;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores the frame-timing parameters and the knight tuning block. Loaded
/// once by the composition root before the world starts; systems read it
/// through `Res<GameConfig>`.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Fixed-timestep length in seconds.
    pub fixed_delta: f32,
    /// Upper clamp for a single frame's measured delta, in seconds.
    pub max_frame_delta: f32,
    /// Knight movement/combat tuning.
    pub tuning: ActorTuning,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            fixed_delta: DEFAULT_FIXED_DELTA,
            max_frame_delta: DEFAULT_MAX_FRAME_DELTA,
            tuning: ActorTuning::default(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [time] section
        if let Some(v) = config.getfloat("time", "fixed_delta").ok().flatten() {
            self.fixed_delta = v as f32;
        }
        if let Some(v) = config.getfloat("time", "max_frame_delta").ok().flatten() {
            self.max_frame_delta = v as f32;
        }

        // [knight] section
        if let Some(v) = config.getfloat("knight", "jump_force").ok().flatten() {
            self.tuning.jump_force = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "jump_extra_force").ok().flatten() {
            self.tuning.jump_extra_force = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "jump_hold_max").ok().flatten() {
            self.tuning.jump_hold_max = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "gravity").ok().flatten() {
            self.tuning.gravity = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "walk_speed").ok().flatten() {
            self.tuning.walk_speed = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "walk_decay_window").ok().flatten() {
            self.tuning.walk_decay_window = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "dash_speed").ok().flatten() {
            self.tuning.dash_speed = v as f32;
        }
        if let Some(v) = config.getuint("knight", "dash_ticks").ok().flatten() {
            self.tuning.dash_ticks = v as u32;
        }
        if let Some(v) = config.getfloat("knight", "dash_momentum").ok().flatten() {
            self.tuning.dash_momentum = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "momentum_window").ok().flatten() {
            self.tuning.momentum_window = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "combo_window").ok().flatten() {
            self.tuning.combo_window = v as f32;
        }
        if let Some(v) = config.getfloat("knight", "land_buffer").ok().flatten() {
            self.tuning.land_buffer = v as f32;
        }

        info!(
            "Loaded config: fixed_delta={}, max_frame_delta={}, jump_force={}, gravity={}, dash_speed={}x{}",
            self.fixed_delta,
            self.max_frame_delta,
            self.tuning.jump_force,
            self.tuning.gravity,
            self.tuning.dash_speed,
            self.tuning.dash_ticks
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    #[allow(dead_code)]
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [time] section
        config.set("time", "fixed_delta", Some(self.fixed_delta.to_string()));
        config.set(
            "time",
            "max_frame_delta",
            Some(self.max_frame_delta.to_string()),
        );

        // [knight] section
        config.set(
            "knight",
            "jump_force",
            Some(self.tuning.jump_force.to_string()),
        );
        config.set(
            "knight",
            "jump_extra_force",
            Some(self.tuning.jump_extra_force.to_string()),
        );
        config.set(
            "knight",
            "jump_hold_max",
            Some(self.tuning.jump_hold_max.to_string()),
        );
        config.set("knight", "gravity", Some(self.tuning.gravity.to_string()));
        config.set(
            "knight",
            "walk_speed",
            Some(self.tuning.walk_speed.to_string()),
        );
        config.set(
            "knight",
            "walk_decay_window",
            Some(self.tuning.walk_decay_window.to_string()),
        );
        config.set(
            "knight",
            "dash_speed",
            Some(self.tuning.dash_speed.to_string()),
        );
        config.set(
            "knight",
            "dash_ticks",
            Some(self.tuning.dash_ticks.to_string()),
        );
        config.set(
            "knight",
            "dash_momentum",
            Some(self.tuning.dash_momentum.to_string()),
        );
        config.set(
            "knight",
            "momentum_window",
            Some(self.tuning.momentum_window.to_string()),
        );
        config.set(
            "knight",
            "combo_window",
            Some(self.tuning.combo_window.to_string()),
        );
        config.set(
            "knight",
            "land_buffer",
            Some(self.tuning.land_buffer.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
