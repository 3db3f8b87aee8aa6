//! # Platformer Engine
//!
//! Object runtime for a 2D platformer.
//!
//! ## Features
//!
//! - **Generational Handles**: Stale references are detected, never dereferenced
//! - **Object Manager**: Owns every game object and drives the per-frame update
//! - **Deferred Mutations**: Safe creation/destruction from inside callbacks
//! - **Physics Bridge**: Pluggable physics service with collision callbacks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use platformer_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         // Create your initial objects
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         // Feed input, run room logic
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod config;
pub mod foundation;
pub mod objects;
pub mod physics;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError};
pub use crate::core::config::EngineConfig;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        config::Config,
        foundation::math::Vec2,
        objects::{
            DestroyTarget, GameObject, InstanceId, ObjectHandle, ObjectManager,
        },
        physics::{
            Body, BodyKind, Collider, CollisionLayers, Manifold, PhysicsService, Shape,
        },
    };
}
