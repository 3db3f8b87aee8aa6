//! The player character
//!
//! Movement runs in `framely_update` and only sets velocity; the physics step
//! moves the body, and the collision hooks push it back out of solids.
//! Everything transient (grounded, coyote time, jump hold) lives here.

use std::collections::HashSet;

use platformer_engine::foundation::math::Vec2;
use platformer_engine::objects::{GameObject, ObjectHandle, ObjectManager};
use platformer_engine::physics::{Body, Collider, CollisionLayers, Manifold};

use super::{PLAYER_TAG, SOLID_TAG};
use crate::config::PlayerTuning;
use crate::input::SharedInput;

/// Corrections smaller than this do not count as support or a wall
const CONTACT_EPSILON: f32 = 0.001;

/// The controllable character
pub struct Player {
    body: Body,
    tuning: PlayerTuning,
    input: SharedInput,
    /// Solids currently holding the player up
    supports: HashSet<ObjectHandle>,
    coyote_frames_left: u32,
    jump_hold_frames_left: u32,
}

impl Player {
    /// Collider half width
    pub const HALF_WIDTH: f32 = 8.0;
    /// Collider half height
    pub const HALF_HEIGHT: f32 = 12.0;

    /// Create a player at `position` reading from `input`
    pub fn new(position: Vec2, tuning: PlayerTuning, input: SharedInput) -> Self {
        let collider = Collider::aabb(Self::HALF_WIDTH, Self::HALF_HEIGHT).with_layers(
            CollisionLayers::PLAYER,
            CollisionLayers::SOLID | CollisionLayers::HAZARD | CollisionLayers::TRIGGER,
        );
        Self {
            body: Body::dynamic(position).with_collider(collider),
            tuning,
            input,
            supports: HashSet::new(),
            coyote_frames_left: 0,
            jump_hold_frames_left: 0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[cfg(test)]
    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    /// Standing on at least one solid
    pub fn is_grounded(&self) -> bool {
        !self.supports.is_empty()
    }

    /// Move to `position` at rest, dropping all contact state
    pub fn teleport(&mut self, position: Vec2) {
        self.body.teleport(position);
        self.supports.clear();
        self.coyote_frames_left = 0;
        self.jump_hold_frames_left = 0;
    }

    fn can_jump(&self) -> bool {
        self.is_grounded() || self.coyote_frames_left > 0
    }

    fn drop_support(&mut self, other: ObjectHandle) {
        let was_grounded = self.is_grounded();
        self.supports.remove(&other);
        if was_grounded && !self.is_grounded() && self.body.velocity.y <= 0.0 {
            // Walked off a ledge
            self.coyote_frames_left = self.tuning.coyote_time_frames;
        }
    }

    fn push_out(&mut self, other: ObjectHandle, manifold: &Manifold, objects: &ObjectManager) {
        if !objects.get(other).is_some_and(|object| object.has_tag(SOLID_TAG)) {
            return;
        }

        let correction = manifold.correction();
        self.body.position += correction;

        if correction.y > CONTACT_EPSILON {
            self.supports.insert(other);
            self.coyote_frames_left = 0;
            self.body.velocity.y = self.body.velocity.y.max(0.0);
        } else {
            self.drop_support(other);
            if correction.y < -CONTACT_EPSILON && self.body.velocity.y > 0.0 {
                // Head hit a ceiling
                self.body.velocity.y = 0.0;
                self.jump_hold_frames_left = 0;
            }
        }

        if correction.x.abs() > CONTACT_EPSILON && correction.x * self.body.velocity.x < 0.0 {
            self.body.velocity.x = 0.0;
        }
    }
}

impl GameObject for Player {
    fn start(&mut self, me: ObjectHandle, _objects: &mut ObjectManager) {
        log::debug!("Player {} spawned at ({}, {})", me, self.body.position.x, self.body.position.y);
    }

    fn framely_update(&mut self, _me: ObjectHandle, _objects: &mut ObjectManager) {
        let input = self.input.get();
        let tuning = &self.tuning;

        if input.jump && self.can_jump() {
            self.body.velocity.y = tuning.jump_speed;
            self.supports.clear();
            self.coyote_frames_left = 0;
            self.jump_hold_frames_left = tuning.max_jump_hold_frames;
        } else if input.jump {
            self.jump_hold_frames_left = self.jump_hold_frames_left.saturating_sub(1);
        } else {
            self.jump_hold_frames_left = 0;
        }

        let direction = input.direction();
        self.body.velocity.x = direction * tuning.speed;

        let rising = self.body.velocity.y > 0.0;
        let multiplier = if rising && input.jump && self.jump_hold_frames_left > 0 {
            tuning.low_gravity_multiplier
        } else if self.body.velocity.y < 0.0 {
            tuning.fall_gravity_multiplier
        } else {
            1.0
        };
        self.body.velocity.y =
            (self.body.velocity.y - tuning.gravity * multiplier).max(tuning.max_fall_speed);

        self.coyote_frames_left = self.coyote_frames_left.saturating_sub(1);
    }

    fn on_destroy(&mut self, me: ObjectHandle, _objects: &mut ObjectManager) {
        log::debug!("Player {} destroyed", me);
    }

    fn on_collision_enter(
        &mut self,
        _me: ObjectHandle,
        other: ObjectHandle,
        manifold: &Manifold,
        objects: &mut ObjectManager,
    ) {
        self.push_out(other, manifold, objects);
    }

    fn on_collision_stay(
        &mut self,
        _me: ObjectHandle,
        other: ObjectHandle,
        manifold: &Manifold,
        objects: &mut ObjectManager,
    ) {
        self.push_out(other, manifold, objects);
    }

    fn on_collision_exit(
        &mut self,
        _me: ObjectHandle,
        other: ObjectHandle,
        _manifold: &Manifold,
        _objects: &mut ObjectManager,
    ) {
        self.drop_support(other);
    }

    fn body(&self) -> Option<&Body> {
        Some(&self.body)
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        Some(&mut self.body)
    }

    fn has_tag(&self, tag: &str) -> bool {
        tag == PLAYER_TAG
    }
}
