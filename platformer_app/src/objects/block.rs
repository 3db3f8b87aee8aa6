use platformer_engine::foundation::math::Vec2;
use platformer_engine::objects::GameObject;
use platformer_engine::physics::{Body, Collider, CollisionLayers};

use super::SOLID_TAG;

/// Static level geometry
pub struct Block {
    body: Body,
}

impl Block {
    /// Edge length of one tile
    pub const TILE: f32 = 36.0;

    /// Solid box centered at `center`
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        let collider = Collider::aabb(half_extents.x, half_extents.y)
            .with_layers(CollisionLayers::SOLID, CollisionLayers::EVERYTHING);
        Self {
            body: Body::fixed(center).with_collider(collider),
        }
    }

    /// Single tile centered at `center`
    pub fn tile(center: Vec2) -> Self {
        Self::new(center, Vec2::new(Self::TILE / 2.0, Self::TILE / 2.0))
    }
}

impl GameObject for Block {
    fn body(&self) -> Option<&Body> {
        Some(&self.body)
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        Some(&mut self.body)
    }

    fn has_tag(&self, tag: &str) -> bool {
        tag == SOLID_TAG
    }
}
