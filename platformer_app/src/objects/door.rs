use platformer_engine::foundation::math::Vec2;
use platformer_engine::objects::{GameObject, ObjectHandle, ObjectManager};
use platformer_engine::physics::{Body, Collider, CollisionLayers, Manifold};

use crate::session::SharedSession;

/// Trigger that sends the player to another room
///
/// The door only files the request with the session. Tearing the room down
/// from inside a collision hook is left to the application, which applies
/// the transition once the frame is over.
pub struct Door {
    body: Body,
    target: String,
    emerge: Vec2,
    session: SharedSession,
}

impl Door {
    /// Trigger half width
    pub const HALF_WIDTH: f32 = 12.0;
    /// Trigger half height
    pub const HALF_HEIGHT: f32 = 30.0;

    /// Door at `center` leading to `target`, where the player appears at `emerge`
    pub fn new(center: Vec2, target: impl Into<String>, emerge: Vec2, session: SharedSession) -> Self {
        let collider = Collider::aabb(Self::HALF_WIDTH, Self::HALF_HEIGHT)
            .with_layers(CollisionLayers::TRIGGER, CollisionLayers::PLAYER);
        Self {
            body: Body::fixed(center).with_collider(collider),
            target: target.into(),
            emerge,
            session,
        }
    }
}

impl GameObject for Door {
    fn on_collision_enter(
        &mut self,
        _me: ObjectHandle,
        other: ObjectHandle,
        _manifold: &Manifold,
        _objects: &mut ObjectManager,
    ) {
        let mut session = self.session.borrow_mut();
        if session.player() == other {
            session.request_transition(&self.target, self.emerge);
        }
    }

    fn body(&self) -> Option<&Body> {
        Some(&self.body)
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        Some(&mut self.body)
    }
}
