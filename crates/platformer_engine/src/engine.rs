//! Core engine implementation

use crate::{
    application::Application,
    core::config::EngineConfig,
    foundation::{logging, time::FrameClock},
    objects::ObjectManager,
};
use thiserror::Error;

/// Main engine struct
///
/// Owns the object manager and drives the frame loop.
pub struct Engine {
    /// Every game object lives here
    pub objects: ObjectManager,

    /// Frame timing
    clock: FrameClock,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        logging::init_with_config(&config.logging);
        config.validate().map_err(EngineError::InvalidConfig)?;

        log::info!("Initializing engine...");
        let objects = ObjectManager::from_engine_config(&config);
        let clock = FrameClock::new(config.target_fps);

        Ok(Self {
            objects,
            clock,
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Returns when the application calls [`quit`](Self::quit), when
    /// `max_frames` is reached, or when the application reports an error.
    /// Cleanup and object teardown run in every case.
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config)?;

        // Initialize application
        let mut result = app
            .initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)));

        if let Err(e) = &result {
            log::error!("Skipping main loop: {}", e);
        } else {
            log::info!("Starting main loop...");
            while engine.running {
                if let Err(e) = engine.step(app) {
                    log::error!("Stopping main loop: {}", e);
                    result = Err(e);
                    break;
                }
            }
        }

        // Cleanup
        app.cleanup(&mut engine);
        engine.objects.shutdown();

        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            engine.clock.frame_count(),
            engine.clock.average_fps()
        );
        result
    }

    /// Run exactly one frame: application update, object update, late update
    pub fn step<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        self.clock.tick();
        let delta_time = self.clock.delta_time();

        app.update(self, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

        self.objects.update_all();

        app.late_update(self)
            .map_err(|e| EngineError::ApplicationError(format!("App late update: {}", e)))?;

        if let Some(max_frames) = self.config.max_frames {
            if self.clock.frame_count() >= max_frames {
                log::info!("Reached frame limit ({})", max_frames);
                self.running = false;
            }
        }

        self.clock.pace();
        Ok(())
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop will run another frame
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the object manager
    pub fn objects(&self) -> &ObjectManager {
        &self.objects
    }

    /// Get mutable access to the object manager
    pub fn objects_mut(&mut self) -> &mut ObjectManager {
        &mut self.objects
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.clock.delta_time()
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
