//! Game configuration (player tuning, water, pickups, loop rates). Loaded from config.ron at startup.

use engine_core::SetupError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::collectable::PickupAmounts;

/// Character tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTuning {
    /// Horizontal speed (and swim speed) in units per second.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Upward velocity applied by a jump.
    #[serde(default = "default_jump_speed")]
    pub jump_speed: f32,
    /// Velocity multiplier applied every physics tick in water. 0.1..=0.9.
    #[serde(default = "default_water_damping")]
    pub water_damping: f32,
    /// Radius of the feet probe. 0..=1.
    #[serde(default = "default_ground_check_radius")]
    pub ground_check_radius: f32,
    /// Seconds of submersion per unit of oxygen.
    #[serde(default = "default_oxygen_loss_interval")]
    pub oxygen_loss_interval: f32,
    /// Seconds a dropped-through bridge stays passable (wall clock).
    #[serde(default = "default_half_second")]
    pub drop_through_delay: f32,
    /// Seconds after respawn before the character can move again.
    #[serde(default = "default_half_second")]
    pub respawn_grace: f32,
    #[serde(default = "default_starting_oxygen")]
    pub starting_oxygen: i32,
    #[serde(default)]
    pub starting_fuel: i32,
}

/// Water tint fade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterTuning {
    #[serde(default = "default_half_second")]
    pub change_time: f32,
    /// Tile alpha while the player is inside.
    #[serde(default = "default_reveal_alpha")]
    pub reveal_alpha: f32,
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub player: PlayerTuning,
    #[serde(default)]
    pub water: WaterTuning,
    #[serde(default)]
    pub collectables: PickupAmounts,
    /// Visual frames per second for the headless loop.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Physics ticks per second.
    #[serde(default = "default_fixed_rate")]
    pub fixed_rate: f64,
    /// Length of a headless session in seconds.
    #[serde(default = "default_session_seconds")]
    pub session_seconds: f32,
}

fn default_speed() -> f32 {
    5.0
}
fn default_jump_speed() -> f32 {
    8.0
}
fn default_water_damping() -> f32 {
    0.5
}
fn default_ground_check_radius() -> f32 {
    0.2
}
fn default_oxygen_loss_interval() -> f32 {
    2.0
}
fn default_half_second() -> f32 {
    0.5
}
fn default_starting_oxygen() -> i32 {
    5
}
fn default_reveal_alpha() -> f32 {
    0.7
}
fn default_frame_rate() -> f64 {
    60.0
}
fn default_fixed_rate() -> f64 {
    50.0
}
fn default_session_seconds() -> f32 {
    30.0
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            jump_speed: default_jump_speed(),
            water_damping: default_water_damping(),
            ground_check_radius: default_ground_check_radius(),
            oxygen_loss_interval: default_oxygen_loss_interval(),
            drop_through_delay: default_half_second(),
            respawn_grace: default_half_second(),
            starting_oxygen: default_starting_oxygen(),
            starting_fuel: 0,
        }
    }
}

impl Default for WaterTuning {
    fn default() -> Self {
        Self {
            change_time: default_half_second(),
            reveal_alpha: default_reveal_alpha(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            water: WaterTuning::default(),
            collectables: PickupAmounts::default(),
            frame_rate: default_frame_rate(),
            fixed_rate: default_fixed_rate(),
            session_seconds: default_session_seconds(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    /// Reject values the simulation can't run with.
    pub fn validate(&self) -> Result<(), SetupError> {
        let p = &self.player;
        SetupError::check_range("player.water_damping", p.water_damping, 0.1, 0.9)?;
        SetupError::check_range("player.ground_check_radius", p.ground_check_radius, 0.0, 1.0)?;
        SetupError::check_range("player.oxygen_loss_interval", p.oxygen_loss_interval, 0.001, f32::MAX)?;
        SetupError::check_range("player.drop_through_delay", p.drop_through_delay, 0.0, f32::MAX)?;
        SetupError::check_range("player.respawn_grace", p.respawn_grace, 0.0, f32::MAX)?;
        SetupError::check_range("water.change_time", self.water.change_time, 0.0, f32::MAX)?;
        SetupError::check_range("water.reveal_alpha", self.water.reveal_alpha, 0.0, 1.0)?;
        SetupError::check_range("collectables.small", self.collectables.small as f32, 1.0, 10.0)?;
        SetupError::check_range("collectables.normal", self.collectables.normal as f32, 1.0, 10.0)?;
        SetupError::check_range("frame_rate", self.frame_rate as f32, 1.0, 1000.0)?;
        SetupError::check_range("fixed_rate", self.fixed_rate as f32, 1.0, 1000.0)?;
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
