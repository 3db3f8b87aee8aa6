//! Collision layer system for filtering collision detection
//!
//! Every collider sits on one or more layers and carries a mask of the layers
//! it wants to touch. A pair is tested only when each side's layer is in the
//! other side's mask.

use bitflags::bitflags;

bitflags! {
    /// Collision layer bitmask
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Static level geometry the player stands on
        const SOLID = 1 << 1;
        /// Things that hurt on contact (spikes)
        const HAZARD = 1 << 2;
        /// Trigger volumes (checkpoints, tips)
        const TRIGGER = 1 << 3;
        /// Cosmetic particles (blood)
        const PARTICLE = 1 << 4;
        /// Projectiles
        const PROJECTILE = 1 << 5;
    }
}

impl CollisionLayers {
    /// Every layer, including ones not named above
    pub const EVERYTHING: Self = Self::from_bits_retain(u32::MAX);

    /// Check if two colliders should be tested against each other
    ///
    /// # Example
    /// ```
    /// use platformer_engine::physics::CollisionLayers;
    ///
    /// // Player touches solids and hazards, spikes only care about the player
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::PLAYER, CollisionLayers::SOLID | CollisionLayers::HAZARD,
    ///     CollisionLayers::HAZARD, CollisionLayers::PLAYER,
    /// ));
    /// ```
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        layer_a.intersects(mask_b) && layer_b.intersects(mask_a)
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::EVERYTHING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_collide_mutual() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::SOLID,
            CollisionLayers::SOLID,
            CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn test_should_not_collide_one_way() {
        // Particles want solids, but this solid ignores particles
        assert!(!CollisionLayers::should_collide(
            CollisionLayers::PARTICLE,
            CollisionLayers::SOLID,
            CollisionLayers::SOLID,
            CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn test_everything_matches_named_layers() {
        assert!(CollisionLayers::should_collide(
            CollisionLayers::TRIGGER,
            CollisionLayers::EVERYTHING,
            CollisionLayers::PROJECTILE,
            CollisionLayers::EVERYTHING,
        ));
        assert_eq!(CollisionLayers::default(), CollisionLayers::EVERYTHING);
    }
}
