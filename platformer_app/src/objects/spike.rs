use platformer_engine::foundation::math::Vec2;
use platformer_engine::objects::{GameObject, ObjectHandle, ObjectManager};
use platformer_engine::physics::{Body, Collider, CollisionLayers, Manifold};

use crate::session::SharedSession;

/// Back-and-forth route of a moving spike
#[derive(Debug, Clone, Copy)]
struct Patrol {
    from: Vec2,
    to: Vec2,
    speed: f32,
    outbound: bool,
}

impl Patrol {
    /// Velocity that moves `position` toward the current end, turning around on arrival
    fn velocity(&mut self, position: Vec2) -> Vec2 {
        let target = if self.outbound { self.to } else { self.from };
        let offset = target - position;
        let distance = offset.norm();
        if distance <= self.speed {
            self.outbound = !self.outbound;
            offset
        } else {
            offset * (self.speed / distance)
        }
    }
}

/// Hazard that kills the player on touch
pub struct Spike {
    body: Body,
    session: SharedSession,
    patrol: Option<Patrol>,
}

impl Spike {
    /// Collider half extent
    pub const HALF_SIZE: f32 = 16.0;

    fn collider() -> Collider {
        Collider::aabb(Self::HALF_SIZE, Self::HALF_SIZE)
            .with_layers(CollisionLayers::HAZARD, CollisionLayers::PLAYER)
    }

    pub fn new(center: Vec2, session: SharedSession) -> Self {
        Self {
            body: Body::fixed(center).with_collider(Self::collider()),
            session,
            patrol: None,
        }
    }

    /// Spike that shuttles between `from` and `to` at `speed` units per frame
    pub fn moving(from: Vec2, to: Vec2, speed: f32, session: SharedSession) -> Self {
        Self {
            body: Body::dynamic(from).with_collider(Self::collider()),
            session,
            patrol: Some(Patrol { from, to, speed, outbound: true }),
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }
}

impl GameObject for Spike {
    fn framely_update(&mut self, _me: ObjectHandle, _objects: &mut ObjectManager) {
        if let Some(patrol) = self.patrol.as_mut() {
            self.body.velocity = patrol.velocity(self.body.position);
        }
    }

    fn on_collision_enter(
        &mut self,
        _me: ObjectHandle,
        other: ObjectHandle,
        _manifold: &Manifold,
        objects: &mut ObjectManager,
    ) {
        let hit_player = self.session.borrow().player() == other;
        if hit_player {
            self.session.borrow_mut().hurt(objects);
        }
    }

    fn body(&self) -> Option<&Body> {
        Some(&self.body)
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        Some(&mut self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::shared_input;
    use crate::objects::Block;
    use crate::session::PlayerSession;
    use approx::assert_relative_eq;
    use std::rc::Rc;

    fn shared_session() -> SharedSession {
        let mut config = GameConfig::default();
        config.hurt.seed = Some(1);
        PlayerSession::new(&config, shared_input()).into_shared()
    }

    #[test]
    fn test_touching_spike_kills_player() {
        let mut objects = ObjectManager::default();
        let session = shared_session();
        session.borrow_mut().set_respawn_point(Vec2::zeros(), "TestRoom");
        let player = session.borrow_mut().respawn(&mut objects, "TestRoom");
        let spike = objects.create_immediate(Spike::new(Vec2::new(10.0, 0.0), Rc::clone(&session)));

        objects.update_all();

        assert!(!objects.is_valid(player));
        assert!(objects.is_valid(spike));
        assert_eq!(session.borrow().deaths(), 1);
        // The spike plus the blood spray
        assert_eq!(objects.count(), 33);
    }

    #[test]
    fn test_spike_ignores_everything_else() {
        let mut objects = ObjectManager::default();
        let session = shared_session();
        objects.create_immediate(Spike::new(Vec2::zeros(), Rc::clone(&session)));
        objects.create_immediate(Block::new(Vec2::zeros(), Vec2::new(18.0, 18.0)));

        objects.update_all();

        assert_eq!(session.borrow().deaths(), 0);
        assert_eq!(objects.count(), 2);
    }

    #[test]
    fn test_moving_spike_shuttles_between_ends() {
        let mut objects = ObjectManager::default();
        let session = shared_session();
        let spike = objects.create_immediate(Spike::moving(
            Vec2::zeros(),
            Vec2::new(0.0, 10.0),
            4.0,
            Rc::clone(&session),
        ));
        let height = |objects: &ObjectManager| {
            objects.get_as::<Spike>(spike).map(Spike::position).expect("Should be alive").y
        };

        for _ in 0..3 {
            objects.update_all();
        }
        assert_relative_eq!(height(&objects), 10.0);

        objects.update_all();
        assert_relative_eq!(height(&objects), 6.0);

        for _ in 0..3 {
            objects.update_all();
        }
        assert_relative_eq!(height(&objects), 0.0);
    }

    #[test]
    fn test_moving_spike_kills_player_it_reaches() {
        let mut objects = ObjectManager::default();
        let session = shared_session();
        session.borrow_mut().set_respawn_point(Vec2::new(60.0, 0.0), "TestRoom");
        let player = session.borrow_mut().respawn(&mut objects, "TestRoom");
        objects.create_immediate(Block::new(Vec2::new(60.0, -30.0), Vec2::new(110.0, 18.0)));
        objects.create_immediate(Spike::moving(
            Vec2::zeros(),
            Vec2::new(100.0, 0.0),
            5.0,
            Rc::clone(&session),
        ));

        let mut frames = 0;
        while objects.is_valid(player) {
            objects.update_all();
            frames += 1;
            assert!(frames < 20, "Spike should reach the player");
        }
        assert_eq!(session.borrow().deaths(), 1);
    }
}
