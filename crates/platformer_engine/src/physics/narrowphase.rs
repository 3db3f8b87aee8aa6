//! Narrowphase contact generation
//!
//! Every function returns a manifold whose normal points from the first shape
//! toward the second, or `None` when the shapes do not overlap.

use crate::foundation::math::{clamp_vec, sign_or_positive, Vec2, EPSILON};
use super::{Manifold, Shape, WorldShape};

/// Contact between two placed shapes
pub fn collide(a: &WorldShape, b: &WorldShape) -> Option<Manifold> {
    match (a.shape, b.shape) {
        (Shape::Aabb { half_extents: ha }, Shape::Aabb { half_extents: hb }) => {
            aabb_aabb(a.center, ha, b.center, hb)
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle(a.center, ra, b.center, rb)
        }
        (Shape::Circle { radius }, Shape::Aabb { half_extents }) => {
            circle_aabb(a.center, radius, b.center, half_extents)
        }
        (Shape::Aabb { half_extents }, Shape::Circle { radius }) => {
            circle_aabb(b.center, radius, a.center, half_extents).map(|m| m.flipped())
        }
    }
}

/// Box against box, separated along the axis of least overlap
pub fn aabb_aabb(ca: Vec2, ha: Vec2, cb: Vec2, hb: Vec2) -> Option<Manifold> {
    let d = cb - ca;
    let overlap_x = ha.x + hb.x - d.x.abs();
    let overlap_y = ha.y + hb.y - d.y.abs();
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let min = Vec2::new((ca.x - ha.x).max(cb.x - hb.x), (ca.y - ha.y).max(cb.y - hb.y));
    let max = Vec2::new((ca.x + ha.x).min(cb.x + hb.x), (ca.y + ha.y).min(cb.y + hb.y));

    if overlap_x < overlap_y {
        let sign = sign_or_positive(d.x);
        let x = (min.x + max.x) * 0.5;
        Some(Manifold::pair(
            Vec2::new(sign, 0.0),
            overlap_x,
            [Vec2::new(x, min.y), Vec2::new(x, max.y)],
        ))
    } else {
        let sign = sign_or_positive(d.y);
        let y = (min.y + max.y) * 0.5;
        Some(Manifold::pair(
            Vec2::new(0.0, sign),
            overlap_y,
            [Vec2::new(min.x, y), Vec2::new(max.x, y)],
        ))
    }
}

/// Circle against circle
pub fn circle_circle(ca: Vec2, ra: f32, cb: Vec2, rb: f32) -> Option<Manifold> {
    let d = cb - ca;
    let distance = d.norm();
    let depth = ra + rb - distance;
    if depth <= 0.0 {
        return None;
    }

    // Coincident centers: pick an arbitrary separation axis
    let normal = if distance > EPSILON { d / distance } else { Vec2::new(0.0, 1.0) };
    Some(Manifold::single(normal, depth, ca + normal * ra))
}

/// Circle against box, normal from the circle toward the box
pub fn circle_aabb(circle: Vec2, radius: f32, center: Vec2, half: Vec2) -> Option<Manifold> {
    let closest = clamp_vec(circle, center - half, center + half);
    let d = closest - circle;
    let distance_sq = d.norm_squared();

    if distance_sq > EPSILON * EPSILON {
        let distance = distance_sq.sqrt();
        let depth = radius - distance;
        if depth <= 0.0 {
            return None;
        }
        return Some(Manifold::single(d / distance, depth, closest));
    }

    // Circle center inside the box: leave through the nearest face
    let local = circle - center;
    let to_face_x = half.x - local.x.abs();
    let to_face_y = half.y - local.y.abs();
    if to_face_x < to_face_y {
        let sign = sign_or_positive(local.x);
        Some(Manifold::single(
            Vec2::new(-sign, 0.0),
            radius + to_face_x,
            Vec2::new(center.x + sign * half.x, circle.y),
        ))
    } else {
        let sign = sign_or_positive(local.y);
        Some(Manifold::single(
            Vec2::new(0.0, -sign),
            radius + to_face_y,
            Vec2::new(circle.x, center.y + sign * half.y),
        ))
    }
}
