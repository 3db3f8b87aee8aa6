//! # Unified Configuration System
//!
//! All engine-side configuration lives here: logging, the object manager,
//! the reference physics service and the frame loop.
//!
//! ## Design Goals
//!
//! - **Centralized**: All configuration types in one place for easy discovery
//! - **Serializable**: Loadable from TOML or RON through [`Config`]
//! - **Defaulted**: Every field has a default, so partial files are fine

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Logging Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger` filter string, e.g. `"info"` or `"platformer_engine=debug"`
    pub filter: String,
    /// Include timestamps in log lines
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            timestamps: true,
        }
    }
}

/// # Object Manager Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectManagerConfig {
    /// Slots to pre-allocate in the object table
    pub initial_capacity: usize,
}

impl Default for ObjectManagerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
        }
    }
}

/// # Physics Configuration
///
/// Tuning for the reference [`PhysicsWorld`](crate::physics::PhysicsWorld).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Integrate dynamic bodies' velocity into position each step
    pub integrate_velocity: bool,
    /// Maximum speed (units per frame) of any dynamic body
    pub max_speed: f32,
    /// Contacts shallower than this are ignored
    pub min_penetration: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            integrate_velocity: true,
            max_speed: 64.0,
            min_penetration: 0.0,
        }
    }
}

impl PhysicsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.max_speed > 0.0) {
            return Err(format!("max_speed must be positive, got {}", self.max_speed));
        }
        if self.min_penetration < 0.0 {
            return Err(format!(
                "min_penetration cannot be negative, got {}",
                self.min_penetration
            ));
        }
        Ok(())
    }
}

/// # Engine Configuration
///
/// Top-level configuration consumed by [`Engine`](crate::Engine).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logging setup
    pub logging: LoggingConfig,
    /// Object manager setup
    pub objects: ObjectManagerConfig,
    /// Physics setup
    pub physics: PhysicsConfig,
    /// Stop after this many frames (headless runs and tests)
    pub max_frames: Option<u64>,
    /// Pace the loop to this frame rate
    pub target_fps: Option<u32>,
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Limit the run to `frames` frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Pace the loop to `fps`
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = Some(fps);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.target_fps == Some(0) {
            return Err("target_fps must be at least 1".to_string());
        }
        self.physics.validate()
    }
}
