use platformer_engine::foundation::math::Vec2;
use platformer_engine::objects::{GameObject, ObjectHandle, ObjectManager};
use platformer_engine::physics::{Body, Collider, CollisionLayers, Manifold};

use crate::session::SharedSession;

/// Trigger that moves the respawn point here when the player touches it
pub struct Checkpoint {
    body: Body,
    room: String,
    session: SharedSession,
    activated: bool,
}

impl Checkpoint {
    /// Trigger half width
    pub const HALF_WIDTH: f32 = 12.0;
    /// Trigger half height
    pub const HALF_HEIGHT: f32 = 24.0;

    pub fn new(center: Vec2, room: impl Into<String>, session: SharedSession) -> Self {
        let collider = Collider::aabb(Self::HALF_WIDTH, Self::HALF_HEIGHT)
            .with_layers(CollisionLayers::TRIGGER, CollisionLayers::PLAYER);
        Self {
            body: Body::fixed(center).with_collider(collider),
            room: room.into(),
            session,
            activated: false,
        }
    }

    #[cfg(test)]
    pub fn is_activated(&self) -> bool {
        self.activated
    }
}

impl GameObject for Checkpoint {
    fn on_collision_enter(
        &mut self,
        _me: ObjectHandle,
        other: ObjectHandle,
        _manifold: &Manifold,
        _objects: &mut ObjectManager,
    ) {
        let mut session = self.session.borrow_mut();
        if session.player() != other {
            return;
        }

        session.set_respawn_point(self.body.position, &self.room);
        if !self.activated {
            self.activated = true;
            log::info!(
                "Checkpoint reached in {} at ({}, {})",
                self.room,
                self.body.position.x,
                self.body.position.y
            );
        }
    }

    fn body(&self) -> Option<&Body> {
        Some(&self.body)
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        Some(&mut self.body)
    }
}
