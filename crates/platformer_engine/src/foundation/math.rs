//! Math utilities and types
//!
//! 2D aliases over nalgebra plus the handful of helpers gameplay code needs.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Tolerance used when comparing lengths against zero
pub const EPSILON: f32 = 1.0e-6;

/// Unit vector pointing at `angle` radians (0 = +x, counter-clockwise)
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Component-wise clamp of `value` into the box `[min, max]`
pub fn clamp_vec(value: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(value.x.clamp(min.x, max.x), value.y.clamp(min.y, max.y))
}

/// Sign of `value`, treating zero as positive
pub fn sign_or_positive(value: f32) -> f32 {
    if value < 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direction_quarter_turns() {
        let up = direction(std::f32::consts::FRAC_PI_2);
        assert_relative_eq!(up.x, 0.0, epsilon = 1.0e-6);
        assert_relative_eq!(up.y, 1.0, epsilon = 1.0e-6);

        let left = direction(std::f32::consts::PI);
        assert_relative_eq!(left.x, -1.0, epsilon = 1.0e-6);
    }

    #[test]
    fn test_clamp_vec() {
        let clamped = clamp_vec(
            Vec2::new(5.0, -5.0),
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, 1.0),
        );
        assert_eq!(clamped, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_sign_or_positive() {
        assert_eq!(sign_or_positive(0.0), 1.0);
        assert_eq!(sign_or_positive(-0.5), -1.0);
    }
}
