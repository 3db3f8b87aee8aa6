//! Game configuration
//!
//! Loaded from `platformer.toml` (or `.ron`) next to the binary; every field
//! has a default so partial files work.

use std::path::PathBuf;

use platformer_engine::config::Config;
use platformer_engine::foundation::math::Vec2;
use platformer_engine::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::input::InputSegment;

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Engine settings
    pub engine: EngineConfig,

    /// Room loaded at startup
    pub room: String,

    /// Where the respawn record is kept
    pub record_path: PathBuf,

    /// Respawn point used when no record exists
    pub spawn_point: [f32; 2],

    /// Frames between the player's death and the respawn
    pub respawn_delay_frames: u32,

    /// Scripted input, replayed in a loop
    pub script: Vec<InputSegment>,

    /// Player movement tuning
    pub player: PlayerTuning,

    /// Hurt effect settings
    pub hurt: HurtConfig,

    /// Blood particle settings
    pub blood: BloodConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default().with_max_frames(600).with_target_fps(60),
            room: "TestRoom".to_string(),
            record_path: PathBuf::from("respawn.txt"),
            spawn_point: [-176.0, -108.0],
            respawn_delay_frames: 30,
            script: InputSegment::demo_script(),
            player: PlayerTuning::default(),
            hurt: HurtConfig::default(),
            blood: BloodConfig::default(),
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Spawn point as a vector
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.spawn_point[0], self.spawn_point[1])
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.room.trim().is_empty() {
            return Err("room cannot be empty".to_string());
        }
        if self.hurt.speed_min_factor > self.hurt.speed_max_factor {
            return Err(format!(
                "hurt.speed_min_factor ({}) exceeds hurt.speed_max_factor ({})",
                self.hurt.speed_min_factor, self.hurt.speed_max_factor
            ));
        }
        self.engine.validate()
    }
}

/// Player movement tuning, in units and frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal speed per frame
    pub speed: f32,
    /// Vertical speed set when a jump starts
    pub jump_speed: f32,
    /// Base gravity per frame
    pub gravity: f32,
    /// Gravity multiplier while rising with the jump button held
    pub low_gravity_multiplier: f32,
    /// Gravity multiplier while falling
    pub fall_gravity_multiplier: f32,
    /// Terminal vertical speed (negative)
    pub max_fall_speed: f32,
    /// Frames the jump button extends a jump
    pub max_jump_hold_frames: u32,
    /// Frames after leaving the ground in which a jump is still allowed
    pub coyote_time_frames: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 3.0,
            jump_speed: 20.0,
            gravity: 3.0,
            low_gravity_multiplier: 0.4,
            fall_gravity_multiplier: 1.6,
            max_fall_speed: -12.0,
            max_jump_hold_frames: 12,
            coyote_time_frames: 6,
        }
    }
}

/// Hurt effect settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HurtConfig {
    /// Blood particles spawned on death
    pub blood_count: u32,
    /// Base particle speed
    pub blood_speed: f32,
    /// Lower bound of the random speed factor
    pub speed_min_factor: f32,
    /// Upper bound of the random speed factor
    pub speed_max_factor: f32,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for HurtConfig {
    fn default() -> Self {
        Self {
            blood_count: 32,
            blood_speed: 5.0,
            speed_min_factor: 0.6,
            speed_max_factor: 1.2,
            seed: None,
        }
    }
}

/// Blood particle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloodConfig {
    /// Gravity per frame
    pub gravity: f32,
    /// Collider radius
    pub radius: f32,
    /// Frames before the particle disappears
    pub lifetime_frames: u32,
}

impl Default for BloodConfig {
    fn default() -> Self {
        Self {
            gravity: 0.15,
            radius: 2.0,
            lifetime_frames: 180,
        }
    }
}
