//! Player session
//!
//! Book-keeping that outlives any single player object: the current player
//! handle, the respawn point, a pending emerge position, a requested room
//! change and the hurt effect.
//! It is shared explicitly as [`SharedSession`] with every object that needs
//! it; there is no global instance.

use std::cell::RefCell;
use std::f32::consts::TAU;
use std::path::Path;
use std::rc::Rc;

use platformer_engine::foundation::math::{direction, Vec2};
use platformer_engine::objects::{ObjectHandle, ObjectManager};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BloodConfig, GameConfig, HurtConfig, PlayerTuning};
use crate::input::SharedInput;
use crate::objects::{Blood, Player};
use crate::respawn::RespawnRecord;

/// Session shared between the application and the objects that call back into it
pub type SharedSession = Rc<RefCell<PlayerSession>>;

/// Room change requested by a door, applied by the application after the frame
#[derive(Debug, Clone, PartialEq)]
pub struct RoomTransition {
    pub room: String,
    pub emerge: Vec2,
}

/// Respawn and player book-keeping for one run
pub struct PlayerSession {
    record: RespawnRecord,
    player: ObjectHandle,
    emerge: Option<Vec2>,
    transition: Option<RoomTransition>,
    tuning: PlayerTuning,
    hurt: HurtConfig,
    blood: BloodConfig,
    input: SharedInput,
    rng: StdRng,
    dirty: bool,
    deaths: u32,
}

impl PlayerSession {
    pub fn new(config: &GameConfig, input: SharedInput) -> Self {
        let rng = match config.hurt.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            record: RespawnRecord::default(),
            player: ObjectHandle::invalid(),
            emerge: None,
            transition: None,
            tuning: config.player.clone(),
            hurt: config.hurt.clone(),
            blood: config.blood.clone(),
            input,
            rng,
            dirty: false,
            deaths: 0,
        }
    }

    /// Wrap for sharing
    pub fn into_shared(self) -> SharedSession {
        Rc::new(RefCell::new(self))
    }

    /// Current player handle; may be stale once the player died
    pub fn player(&self) -> ObjectHandle {
        self.player
    }

    pub fn record(&self) -> &RespawnRecord {
        &self.record
    }

    pub fn has_respawn_record(&self) -> bool {
        self.record.has_record
    }

    /// Times the player has been hurt
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Move the respawn point; marks the record dirty when it changes
    pub fn set_respawn_point(&mut self, position: Vec2, room: &str) {
        let record = RespawnRecord::new(room, position);
        if record != self.record {
            log::debug!("Respawn point set to {} ({}, {})", room, position.x, position.y);
            self.record = record;
            self.dirty = true;
        }
    }

    /// Where the next [`emerge`](Self::emerge) places the player
    pub fn set_emerge_position(&mut self, position: Vec2) {
        self.emerge = Some(position);
    }

    /// Ask for a room change; the first request in a frame wins
    pub fn request_transition(&mut self, room: &str, emerge: Vec2) {
        if let Some(pending) = &self.transition {
            log::debug!("Ignoring transition to {}, already going to {}", room, pending.room);
            return;
        }
        log::info!("Transition to {} requested", room);
        self.transition = Some(RoomTransition { room: room.to_string(), emerge });
    }

    /// Hand over the pending room change, if any
    pub fn take_transition(&mut self) -> Option<RoomTransition> {
        self.transition.take()
    }

    /// Put the player at the respawn point, reusing it if still alive
    pub fn respawn(&mut self, objects: &mut ObjectManager, current_room: &str) -> ObjectHandle {
        if !self.record.has_record {
            log::warn!("Respawning without a respawn point");
        } else if self.record.room != current_room {
            log::warn!(
                "Respawn point belongs to {} but the current room is {}",
                self.record.room,
                current_room
            );
        }
        self.place_player(objects, self.record.position)
    }

    /// Place the player at the pending emerge position, or respawn if there is none
    pub fn emerge(&mut self, objects: &mut ObjectManager, current_room: &str) -> ObjectHandle {
        match self.emerge.take() {
            Some(position) => self.place_player(objects, position),
            None => self.respawn(objects, current_room),
        }
    }

    /// Kill the player: spray blood and schedule its destruction
    ///
    /// Everything is deferred, so this is safe from inside a collision hook.
    /// Returns false when there is no live player to hurt.
    pub fn hurt(&mut self, objects: &mut ObjectManager) -> bool {
        let Some(origin) = objects.get_as::<Player>(self.player).map(Player::position) else {
            return false;
        };

        let count = self.hurt.blood_count;
        for i in 0..count {
            let angle = TAU * (i as f32 + 0.5) / count as f32;
            let factor = self
                .rng
                .gen_range(self.hurt.speed_min_factor..=self.hurt.speed_max_factor);
            let velocity = direction(angle) * self.hurt.blood_speed * factor;
            let config = self.blood.clone();
            objects.create_delayed(move || Blood::new(origin, velocity, &config));
        }

        objects.destroy_delayed(self.player);
        self.deaths += 1;
        log::info!("Player hurt at ({}, {}), death #{}", origin.x, origin.y, self.deaths);
        true
    }

    /// Returns whether the record changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Write the respawn record; failures are logged
    pub fn save_record(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.record.write_to(path) {
            Ok(()) => {
                log::debug!("Saved respawn record to {}", path.display());
                true
            }
            Err(e) => {
                log::error!("Failed to save respawn record to {}: {}", path.display(), e);
                false
            }
        }
    }

    /// Read the respawn record; a missing or malformed file keeps the current one
    pub fn load_record(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match RespawnRecord::read_from(path) {
            Ok(record) => {
                log::info!("Loaded respawn record for {} from {}", record.room, path.display());
                self.record = record;
                self.dirty = false;
                true
            }
            Err(e) if e.is_not_found() => {
                log::info!("No respawn record at {}", path.display());
                false
            }
            Err(e) => {
                log::warn!("Ignoring respawn record at {}: {}", path.display(), e);
                false
            }
        }
    }

    fn place_player(&mut self, objects: &mut ObjectManager, position: Vec2) -> ObjectHandle {
        if objects.is_valid(self.player) {
            match objects.get_as_mut::<Player>(self.player) {
                Some(player) => player.teleport(position),
                // Only happens while one of the player's own hooks is running
                None => log::warn!("Player {} is busy, not moved", self.player),
            }
            return self.player;
        }

        self.player = objects.create_immediate(Player::new(
            position,
            self.tuning.clone(),
            Rc::clone(&self.input),
        ));
        log::info!("Player {} created at ({}, {})", self.player, position.x, position.y);
        self.player
    }
}
