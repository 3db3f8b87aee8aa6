//! Contact manifolds

use crate::foundation::math::Vec2;

/// Description of one contact between two colliders
///
/// `normal` points from the receiving object toward the other party and
/// `depths[i]` is the penetration at `contact_points[i]`. Only the first
/// `count` entries are meaningful.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Manifold {
    /// Number of contact points (0..=2)
    pub count: usize,
    /// Penetration depth per contact point
    pub depths: [f32; 2],
    /// Contact points in world space
    pub contact_points: [Vec2; 2],
    /// Unit contact normal
    pub normal: Vec2,
}

impl Default for Manifold {
    fn default() -> Self {
        Self::empty()
    }
}

impl Manifold {
    /// Manifold without contacts (used for exit events)
    pub fn empty() -> Self {
        Self {
            count: 0,
            depths: [0.0; 2],
            contact_points: [Vec2::zeros(); 2],
            normal: Vec2::zeros(),
        }
    }

    /// Single-point manifold
    pub fn single(normal: Vec2, depth: f32, point: Vec2) -> Self {
        Self {
            count: 1,
            depths: [depth, 0.0],
            contact_points: [point, Vec2::zeros()],
            normal,
        }
    }

    /// Two-point manifold sharing one normal and depth
    pub fn pair(normal: Vec2, depth: f32, points: [Vec2; 2]) -> Self {
        Self {
            count: 2,
            depths: [depth, depth],
            contact_points: points,
            normal,
        }
    }

    /// Whether there is any contact
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The same contact seen from the other party
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            ..*self
        }
    }

    /// Deepest penetration among the contact points
    pub fn max_depth(&self) -> f32 {
        self.depths[..self.count.min(2)]
            .iter()
            .copied()
            .fold(0.0, f32::max)
    }

    /// Translation that moves the receiver out of the contact
    pub fn correction(&self) -> Vec2 {
        if self.is_empty() {
            Vec2::zeros()
        } else {
            -self.normal * self.depths[0]
        }
    }
}
