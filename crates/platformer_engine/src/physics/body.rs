//! Physics bodies and collider shapes
//!
//! A [`Body`] is plain data owned by the game object that exposes it through
//! [`GameObject::body`](crate::objects::GameObject::body). The physics service
//! reads and integrates it during the step; gameplay code moves it freely the
//! rest of the frame.

use crate::foundation::math::Vec2;
use super::CollisionLayers;

/// Collision shape in body-local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box
    Aabb {
        /// Half width and half height
        half_extents: Vec2,
    },
    /// Circle
    Circle {
        /// Circle radius
        radius: f32,
    },
}

impl Shape {
    /// Half extents of the shape's bounding box
    pub fn bounding_half_extents(&self) -> Vec2 {
        match *self {
            Self::Aabb { half_extents } => half_extents,
            Self::Circle { radius } => Vec2::new(radius, radius),
        }
    }
}

/// Shape placed in world space for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldShape {
    /// World-space center
    pub center: Vec2,
    /// The shape
    pub shape: Shape,
}

impl WorldShape {
    /// Minimum corner of the bounding box
    pub fn min(&self) -> Vec2 {
        self.center - self.shape.bounding_half_extents()
    }

    /// Maximum corner of the bounding box
    pub fn max(&self) -> Vec2 {
        self.center + self.shape.bounding_half_extents()
    }
}

/// Collider attached to a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// The collision shape
    pub shape: Shape,
    /// Offset of the shape's center from the body position
    pub offset: Vec2,
    /// Layers this collider sits on
    pub layers: CollisionLayers,
    /// Layers this collider wants to touch
    pub mask: CollisionLayers,
}

impl Collider {
    /// Create a collider on every layer, touching every layer
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            offset: Vec2::zeros(),
            layers: CollisionLayers::EVERYTHING,
            mask: CollisionLayers::EVERYTHING,
        }
    }

    /// Box collider from half width and half height
    pub fn aabb(half_width: f32, half_height: f32) -> Self {
        Self::new(Shape::Aabb { half_extents: Vec2::new(half_width, half_height) })
    }

    /// Circle collider
    pub fn circle(radius: f32) -> Self {
        Self::new(Shape::Circle { radius })
    }

    /// Set layer and mask
    pub fn with_layers(mut self, layers: CollisionLayers, mask: CollisionLayers) -> Self {
        self.layers = layers;
        self.mask = mask;
        self
    }

    /// Set the shape offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// How the physics step treats a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never integrated; level geometry, hazards, triggers
    Static,
    /// Velocity is integrated every step
    Dynamic,
}

/// Position, velocity and collider of one object
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Current position
    pub position: Vec2,
    /// Position before the most recent integration
    pub previous_position: Vec2,
    /// Velocity in units per frame
    pub velocity: Vec2,
    /// Static or dynamic
    pub kind: BodyKind,
    /// Collider, if the body takes part in collision detection
    pub collider: Option<Collider>,
}

impl Body {
    /// Create a body at rest
    pub fn new(kind: BodyKind, position: Vec2) -> Self {
        Self {
            position,
            previous_position: position,
            velocity: Vec2::zeros(),
            kind,
            collider: None,
        }
    }

    /// Static body at `position`
    pub fn fixed(position: Vec2) -> Self {
        Self::new(BodyKind::Static, position)
    }

    /// Dynamic body at `position`
    pub fn dynamic(position: Vec2) -> Self {
        Self::new(BodyKind::Dynamic, position)
    }

    /// Attach a collider
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Teleport, forgetting the previous position
    pub fn teleport(&mut self, position: Vec2) {
        self.position = position;
        self.previous_position = position;
        self.velocity = Vec2::zeros();
    }

    /// Accelerate by `delta`
    pub fn add_velocity(&mut self, delta: Vec2) {
        self.velocity += delta;
    }

    /// Whether the step integrates this body
    pub fn is_dynamic(&self) -> bool {
        self.kind == BodyKind::Dynamic
    }

    /// Advance one step: remember the old position, move by velocity
    pub fn integrate(&mut self, max_speed: f32) {
        let speed = self.velocity.norm();
        if speed > max_speed {
            self.velocity *= max_speed / speed;
        }
        self.previous_position = self.position;
        self.position += self.velocity;
    }

    /// Collider placed at the current position
    pub fn world_shape(&self) -> Option<WorldShape> {
        self.collider.map(|collider| WorldShape {
            center: self.position + collider.offset,
            shape: collider.shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_integrate_tracks_previous_position() {
        let mut body = Body::dynamic(Vec2::new(1.0, 1.0)).with_velocity(Vec2::new(2.0, -1.0));
        body.integrate(100.0);

        assert_eq!(body.previous_position, Vec2::new(1.0, 1.0));
        assert_eq!(body.position, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_integrate_clamps_speed() {
        let mut body = Body::dynamic(Vec2::zeros()).with_velocity(Vec2::new(30.0, 40.0));
        body.integrate(5.0);

        assert_relative_eq!(body.velocity.norm(), 5.0, epsilon = 1.0e-5);
        assert_relative_eq!(body.position.x, 3.0, epsilon = 1.0e-5);
        assert_relative_eq!(body.position.y, 4.0, epsilon = 1.0e-5);
    }

    #[test]
    fn test_world_shape_applies_offset() {
        let body = Body::fixed(Vec2::new(10.0, 0.0))
            .with_collider(Collider::aabb(2.0, 3.0).with_offset(Vec2::new(0.0, 3.0)));
        let shape = body.world_shape().expect("Should have a collider");

        assert_eq!(shape.center, Vec2::new(10.0, 3.0));
        assert_eq!(shape.min(), Vec2::new(8.0, 0.0));
        assert_eq!(shape.max(), Vec2::new(12.0, 6.0));
    }

    #[test]
    fn test_body_without_collider_has_no_shape() {
        assert!(Body::fixed(Vec2::zeros()).world_shape().is_none());
    }
}
