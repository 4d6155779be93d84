//! Stroke geometry: simplification, spline smoothing, coordinate transforms
//!
//! Raw pointer input is dense and jittery. Rendering runs it through two
//! passes: a greedy distance-based simplification that thins the points to
//! usable spline control points, then a Catmull-Rom interpolation that
//! produces the smooth polyline the rasterizer fans into rake teeth.

use glam::Vec2;

use crate::consts::{GARDEN_SIZE, SIMPLIFY_MIN_DISTANCE, TEXTURE_SIZE};

/// Map a world position to texture pixel coordinates (floored).
#[inline]
pub fn world_to_texture(x: f32, z: f32) -> (i32, i32) {
    let u = ((x + GARDEN_SIZE / 2.0) / GARDEN_SIZE) * TEXTURE_SIZE as f32;
    let v = ((z + GARDEN_SIZE / 2.0) / GARDEN_SIZE) * TEXTURE_SIZE as f32;
    (u.floor() as i32, v.floor() as i32)
}

/// Map texture pixel coordinates back to world space.
/// Inverse of [`world_to_texture`] up to the floor rounding loss.
#[inline]
pub fn texture_to_world(u: i32, v: i32) -> (f32, f32) {
    let x = (u as f32 / TEXTURE_SIZE as f32) * GARDEN_SIZE - GARDEN_SIZE / 2.0;
    let z = (v as f32 / TEXTURE_SIZE as f32) * GARDEN_SIZE - GARDEN_SIZE / 2.0;
    (x, z)
}

/// Thin a polyline so consecutive points are at least `min_distance` apart.
///
/// The first and last points are always kept; an interior point survives
/// only if it is far enough from the last kept point. Inputs shorter than
/// 3 points are returned unchanged.
pub fn simplify_points(points: &[Vec2], min_distance: f32) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut simplified = vec![points[0]];

    for point in &points[1..points.len() - 1] {
        let last = simplified[simplified.len() - 1];
        if last.distance(*point) >= min_distance {
            simplified.push(*point);
        }
    }

    simplified.push(points[points.len() - 1]);
    simplified
}

/// Evaluate one Catmull-Rom segment between `p1` and `p2` at parameter `t`.
/// Uniform parametrization, tension 0.5.
#[inline]
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    const TENSION: f32 = 0.5;
    let t2 = t * t;
    let t3 = t2 * t;

    let m0 = (p2 - p0) * TENSION;
    let m1 = (p3 - p1) * TENSION;

    (2.0 * (p1 - p2) + m0 + m1) * t3 + (3.0 * (p2 - p1) - 2.0 * m0 - m1) * t2 + m0 * t + p1
}

/// Fit a Catmull-Rom spline through the (simplified) input polyline,
/// emitting `segments` interpolated points per control-point interval.
///
/// The curve passes exactly through every control point (each interval
/// starts at t = 0). Boundary intervals duplicate the first/last control
/// point as the virtual neighbor rather than extrapolating. Inputs of
/// fewer than 3 points pass through unsmoothed.
pub fn smooth_points(points: &[Vec2], segments: usize) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let ctrl = simplify_points(points, SIMPLIFY_MIN_DISTANCE);
    if ctrl.len() < 3 {
        return ctrl;
    }

    let mut smoothed = vec![ctrl[0]];

    for i in 0..ctrl.len() - 1 {
        let p0 = ctrl[i.saturating_sub(1)];
        let p1 = ctrl[i];
        let p2 = ctrl[i + 1];
        let p3 = ctrl[(i + 2).min(ctrl.len() - 1)];

        for s in 0..segments {
            let t = s as f32 / segments as f32;
            smoothed.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }

    smoothed.push(ctrl[ctrl.len() - 1]);
    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize, step: f32) -> Vec<Vec2> {
        (0..n).map(|i| Vec2::new(i as f32 * step, 0.0)).collect()
    }

    #[test]
    fn test_simplify_keeps_endpoints() {
        let points = line(20, 0.01);
        let simplified = simplify_points(&points, 0.12);
        assert_eq!(simplified[0], points[0]);
        assert_eq!(*simplified.last().unwrap(), *points.last().unwrap());
    }

    #[test]
    fn test_simplify_spacing() {
        let points = line(50, 0.03);
        let simplified = simplify_points(&points, 0.12);
        // Every consecutive pair except possibly the final one respects the spacing
        for pair in simplified[..simplified.len() - 1].windows(2) {
            assert!(pair[0].distance(pair[1]) >= 0.12);
        }
    }

    #[test]
    fn test_simplify_short_input_passthrough() {
        let points = vec![Vec2::ZERO, Vec2::new(0.001, 0.0)];
        assert_eq!(simplify_points(&points, 0.12), points);
    }

    #[test]
    fn test_smooth_passes_through_control_points() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.5),
            Vec2::new(2.0, -0.5),
            Vec2::new(3.0, 0.0),
        ];
        let smoothed = smooth_points(&points, 16);
        // All inputs are > 0.12 apart, so they all survive simplification and
        // each must appear exactly on the curve (t = 0 of its interval).
        for p in &points {
            assert!(
                smoothed.iter().any(|q| q.distance(*p) < 1e-6),
                "control point {p:?} missing from smoothed output"
            );
        }
    }

    #[test]
    fn test_smooth_two_points_passthrough() {
        let points = vec![Vec2::ZERO, Vec2::new(1.0, 1.0)];
        assert_eq!(smooth_points(&points, 16), points);
    }

    #[test]
    fn test_smooth_densifies() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
        ];
        let smoothed = smooth_points(&points, 16);
        assert!(smoothed.len() > points.len());
    }

    #[test]
    fn test_world_texture_roundtrip() {
        for &(u, v) in &[(0, 0), (512, 512), (1023, 1023), (17, 900)] {
            let (x, z) = texture_to_world(u, v);
            let (u2, v2) = world_to_texture(x, z);
            assert!((u - u2).abs() <= 1, "u {u} -> {u2}");
            assert!((v - v2).abs() <= 1, "v {v} -> {v2}");
        }
    }

    #[test]
    fn test_world_to_texture_corners() {
        let half = GARDEN_SIZE / 2.0;
        assert_eq!(world_to_texture(-half, -half), (0, 0));
        let (u, v) = world_to_texture(half - 0.001, half - 0.001);
        assert!(u < TEXTURE_SIZE as i32 && v < TEXTURE_SIZE as i32);
    }
}
