//! The platformer demo application

use std::rc::Rc;

use platformer_engine::{AppError, Application, Engine};

use crate::config::GameConfig;
use crate::input::{shared_input, InputScript, SharedInput};
use crate::layout;
use crate::session::{PlayerSession, RoomTransition, SharedSession};

/// Drives the rooms: scripted input, respawns, doors and record saving
pub struct PlatformerApp {
    config: GameConfig,
    input: SharedInput,
    script: InputScript,
    session: SharedSession,
    /// Room currently built in the object manager
    room: String,
    /// Frames left before the next respawn, while the player is dead
    respawn_countdown: Option<u32>,
}

impl PlatformerApp {
    pub fn new(config: GameConfig) -> Self {
        let input = shared_input();
        let session = PlayerSession::new(&config, Rc::clone(&input)).into_shared();
        let script = InputScript::new(config.script.clone());
        let room = config.room.clone();
        Self {
            config,
            input,
            script,
            session,
            room,
            respawn_countdown: None,
        }
    }

    /// Unload the current room and load the requested one, player emerging at the door's mark
    fn change_room(&mut self, engine: &mut Engine, transition: RoomTransition) -> Result<(), AppError> {
        log::info!("Leaving {} for {}", self.room, transition.room);
        self.session.borrow_mut().set_emerge_position(transition.emerge);

        engine.objects.reset();
        self.respawn_countdown = None;
        self.room = transition.room;

        layout::build_room(
            &self.room,
            &mut engine.objects,
            &self.session,
            self.config.spawn_point(),
        )
    }

    fn respawn_when_dead(&mut self, engine: &mut Engine) {
        let player = self.session.borrow().player();
        if engine.objects.is_valid(player) {
            self.respawn_countdown = None;
            return;
        }

        let remaining = self
            .respawn_countdown
            .get_or_insert(self.config.respawn_delay_frames);
        if *remaining > 0 {
            *remaining -= 1;
            return;
        }

        self.respawn_countdown = None;
        self.session
            .borrow_mut()
            .respawn(&mut engine.objects, &self.room);
    }
}

impl Application for PlatformerApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.config.validate().map_err(AppError::Custom)?;

        self.session.borrow_mut().load_record(&self.config.record_path);
        layout::build_room(
            &self.room,
            &mut engine.objects,
            &self.session,
            self.config.spawn_point(),
        )?;

        log::info!("Platformer initialized in {}", self.room);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.input.set(self.script.input_at(engine.frame_count()));
        Ok(())
    }

    fn late_update(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let transition = self.session.borrow_mut().take_transition();
        match transition {
            Some(transition) => self.change_room(engine, transition)?,
            None => self.respawn_when_dead(engine),
        }

        let dirty = self.session.borrow_mut().take_dirty();
        if dirty {
            self.session.borrow().save_record(&self.config.record_path);
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let session = self.session.borrow();
        session.save_record(&self.config.record_path);
        log::info!(
            "Platformer finished in {} after {} frames, {} deaths, respawn point in {}",
            self.room,
            engine.frame_count(),
            session.deaths(),
            session.record().room
        );
    }
}
