//! Blood particles thrown out when the player dies

use platformer_engine::foundation::math::Vec2;
use platformer_engine::objects::{GameObject, ObjectHandle, ObjectManager};
use platformer_engine::physics::{Body, Collider, CollisionLayers, Manifold};

use crate::config::BloodConfig;

/// A particle that falls and sticks to the first solid it hits
pub struct Blood {
    body: Body,
    gravity: f32,
    frames_left: u32,
    stuck: bool,
}

impl Blood {
    pub fn new(position: Vec2, velocity: Vec2, config: &BloodConfig) -> Self {
        let collider = Collider::circle(config.radius)
            .with_layers(CollisionLayers::PARTICLE, CollisionLayers::SOLID);
        Self {
            body: Body::dynamic(position).with_collider(collider).with_velocity(velocity),
            gravity: config.gravity,
            frames_left: config.lifetime_frames,
            stuck: false,
        }
    }

    #[cfg(test)]
    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    #[cfg(test)]
    pub fn is_stuck(&self) -> bool {
        self.stuck
    }

    fn stick(&mut self, manifold: &Manifold) {
        self.body.position += manifold.correction();
        self.body.velocity = Vec2::zeros();
        self.stuck = true;
    }
}

impl GameObject for Blood {
    fn framely_update(&mut self, me: ObjectHandle, objects: &mut ObjectManager) {
        if self.frames_left == 0 {
            objects.destroy_delayed(me);
            return;
        }
        self.frames_left -= 1;

        if !self.stuck {
            self.body.add_velocity(Vec2::new(0.0, -self.gravity));
        }
    }

    fn on_collision_enter(
        &mut self,
        _me: ObjectHandle,
        _other: ObjectHandle,
        manifold: &Manifold,
        _objects: &mut ObjectManager,
    ) {
        self.stick(manifold);
    }

    fn on_collision_stay(
        &mut self,
        _me: ObjectHandle,
        _other: ObjectHandle,
        manifold: &Manifold,
        _objects: &mut ObjectManager,
    ) {
        self.stick(manifold);
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
    use crate::objects::Block;
    use approx::assert_relative_eq;

    #[test]
    fn test_falls_and_sticks_to_floor() {
        let mut objects = ObjectManager::default();
        objects.create_immediate(Block::new(Vec2::new(0.0, -18.0), Vec2::new(100.0, 18.0)));
        let blood = objects.create_immediate(Blood::new(
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, 1.0),
            &BloodConfig::default(),
        ));

        for _ in 0..60 {
            objects.update_all();
        }

        let blood = objects.get_as::<Blood>(blood).expect("Should still be alive");
        assert!(blood.is_stuck());
        assert_relative_eq!(blood.position().y, BloodConfig::default().radius, epsilon = 0.01);
    }

    #[test]
    fn test_expires_after_lifetime() {
        let config = BloodConfig { lifetime_frames: 3, ..BloodConfig::default() };
        let mut objects = ObjectManager::default();
        let blood = objects.create_immediate(Blood::new(Vec2::zeros(), Vec2::zeros(), &config));

        for _ in 0..3 {
            objects.update_all();
        }
        assert!(objects.is_valid(blood));

        objects.update_all();
        assert!(!objects.is_valid(blood));
    }

    #[test]
    fn test_particles_ignore_each_other() {
        let mut objects = ObjectManager::default();
        let config = BloodConfig::default();
        let a = objects.create_immediate(Blood::new(Vec2::zeros(), Vec2::zeros(), &config));
        let b = objects.create_immediate(Blood::new(Vec2::zeros(), Vec2::zeros(), &config));

        objects.update_all();

        assert!(objects.is_valid(a) && objects.is_valid(b));
        assert!(!objects.get_as::<Blood>(a).is_some_and(Blood::is_stuck));
        assert!(!objects.get_as::<Blood>(b).is_some_and(Blood::is_stuck));
    }
}
