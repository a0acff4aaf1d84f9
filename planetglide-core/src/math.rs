//! Vector and quaternion helpers for orienting things on a sphere.

use glam::{Quat, Vec3};
use tracing::warn;

/// Tolerance used to detect antiparallel inputs in [`shortest_arc_rotation`].
///
/// Sized for `f32`: a normalized vector dotted with its own negation can land
/// a few ulps away from -1.
pub const ARC_EPSILON: f32 = 1e-6;

/// Returns a unit vector perpendicular to `v`.
///
/// `v` is crossed with the coordinate axis it is least aligned with, so the
/// cross product never degenerates for non-zero input.
pub fn orthogonal_vector(v: Vec3) -> Vec3 {
    let x = v.x.abs();
    let y = v.y.abs();
    let z = v.z.abs();

    let other = if x < y {
        if x < z { Vec3::X } else { Vec3::Z }
    } else if y < z {
        Vec3::Y
    } else {
        Vec3::Z
    };

    v.cross(other).normalize()
}

/// Unit quaternion rotating direction `from` onto direction `to` along the
/// shortest path.
///
/// Antiparallel inputs have no unique axis; a 180 degree turn about
/// [`orthogonal_vector`]`(from)` is returned in that case.
pub fn shortest_arc_rotation(from: Vec3, to: Vec3) -> Quat {
    let x = from.normalize();
    let y = to.normalize();

    let cos_theta = x.dot(y);

    if (cos_theta + 1.0).abs() < 2.0 * ARC_EPSILON {
        let axis = orthogonal_vector(x);
        return Quat::from_xyzw(axis.x, axis.y, axis.z, 0.0).normalize();
    }

    let v = x.cross(y);
    Quat::from_xyzw(v.x, v.y, v.z, cos_theta + 1.0).normalize()
}

/// Converts degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Normalizes `v`, falling back to `+Y` when it has no usable direction.
///
/// A zero or non-finite vector here means something sits exactly at the
/// world center; that is logged and clamped rather than propagated as NaN.
pub fn unit_or_up(v: Vec3) -> Vec3 {
    match v.try_normalize() {
        Some(n) => n,
        None => {
            warn!("degenerate direction {:?}, clamping to +Y", v);
            Vec3::Y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn sample_directions() -> Vec<Vec3> {
        vec![
            Vec3::X,
            Vec3::Y,
            Vec3::Z,
            -Vec3::X,
            -Vec3::Y,
            -Vec3::Z,
            Vec3::new(1.0, 2.0, 3.0).normalize(),
            Vec3::new(-0.3, 0.9, 0.1).normalize(),
            Vec3::new(0.577, -0.577, 0.577).normalize(),
        ]
    }

    #[test]
    fn test_orthogonal_vector_is_perpendicular_unit() {
        for v in sample_directions() {
            let o = orthogonal_vector(v);
            assert!(o.dot(v).abs() < TOLERANCE, "{o:?} not perpendicular to {v:?}");
            assert!((o.length() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_orthogonal_vector_picks_least_aligned_axis() {
        // Smallest component is x, so the cross is taken with +X.
        let v = Vec3::new(0.1, 0.7, 0.7);
        let expected = v.cross(Vec3::X).normalize();
        assert!((orthogonal_vector(v) - expected).length() < TOLERANCE);
    }

    #[test]
    fn test_shortest_arc_same_direction_is_identity() {
        for a in sample_directions() {
            let q = shortest_arc_rotation(a, a);
            assert!(q.abs_diff_eq(Quat::IDENTITY, TOLERANCE), "{q:?}");
        }
    }

    #[test]
    fn test_shortest_arc_antiparallel_fallback() {
        for a in sample_directions() {
            let q = shortest_arc_rotation(a, -a);
            assert!(q.is_finite());
            assert!((q.length() - 1.0).abs() < TOLERANCE);
            assert!(q.w.abs() < TOLERANCE);

            let axis = Vec3::new(q.x, q.y, q.z);
            assert!(axis.dot(a).abs() < TOLERANCE);
            assert!((q * a + a).length() < 1e-4);
        }
    }

    #[test]
    fn test_shortest_arc_maps_from_onto_to() {
        let dirs = sample_directions();
        for &from in &dirs {
            for &to in &dirs {
                if from.dot(to) < -0.999 {
                    continue;
                }
                let q = shortest_arc_rotation(from, to);
                assert!((q.length() - 1.0).abs() < TOLERANCE);
                assert!((q * from - to).length() < 1e-4, "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn test_shortest_arc_normalizes_inputs() {
        let q = shortest_arc_rotation(Vec3::Y * 10.0, Vec3::X * 0.2);
        assert!((q * Vec3::Y - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_degrees_to_radians() {
        assert!((degrees_to_radians(180.0) - std::f32::consts::PI).abs() < TOLERANCE);
        assert!((degrees_to_radians(-60.0) + std::f32::consts::FRAC_PI_3).abs() < TOLERANCE);
        assert_eq!(degrees_to_radians(0.0), 0.0);
    }

    #[test]
    fn test_unit_or_up_clamps_degenerate() {
        assert_eq!(unit_or_up(Vec3::ZERO), Vec3::Y);
        assert_eq!(unit_or_up(Vec3::splat(f32::NAN)), Vec3::Y);
        assert!((unit_or_up(Vec3::new(0.0, 0.0, 4.0)) - Vec3::Z).length() < TOLERANCE);
    }
}
