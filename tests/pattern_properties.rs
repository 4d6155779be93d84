//! Property-based tests for the pattern pipeline using proptest
//!
//! These verify the geometric invariants hold across random inputs:
//! - Simplification keeps endpoints and enforces spacing
//! - Smoothing interpolates its control points and never produces NaN
//! - The deflection field vanishes outside the influence ring, stays
//!   bounded inside it, and goes to zero at the outer boundary
//! - Coordinate transforms round-trip within floor-rounding loss
//! - Stroke-buffer decimation rejects sub-threshold pointer movement

use glam::Vec2;
use proptest::prelude::*;

use zen_rake::consts::{GARDEN_SIZE, INFLUENCE_FACTOR, TEXTURE_SIZE};
use zen_rake::pattern::{deflect_point, simplify_points, smooth_points, texture_to_world, world_to_texture};
use zen_rake::{GardenState, Stone};

/// Strategy: a world-space point inside the garden
fn garden_point() -> impl Strategy<Value = Vec2> {
    let half = GARDEN_SIZE / 2.0;
    (-half..half, -half..half).prop_map(|(x, z)| Vec2::new(x, z))
}

/// Strategy: a polyline of 3-40 garden points
fn polyline() -> impl Strategy<Value = Vec<Vec2>> {
    prop::collection::vec(garden_point(), 3..40)
}

/// Strategy: a stone somewhere in the garden
fn stone() -> impl Strategy<Value = Stone> {
    (garden_point(), 0.2f32..0.8).prop_map(|(position, radius)| Stone {
        id: 1,
        position,
        radius,
        scale: 1.0,
    })
}

proptest! {
    #[test]
    fn simplify_keeps_endpoints_and_spacing(points in polyline(), min_distance in 0.05f32..0.5) {
        let simplified = simplify_points(&points, min_distance);

        prop_assert_eq!(simplified[0], points[0]);
        prop_assert_eq!(*simplified.last().unwrap(), *points.last().unwrap());

        // Every consecutive pair except possibly the final one is spaced out
        if simplified.len() > 2 {
            for pair in simplified[..simplified.len() - 1].windows(2) {
                prop_assert!(pair[0].distance(pair[1]) >= min_distance);
            }
        }
    }

    #[test]
    fn smoothing_is_finite_and_interpolating(points in polyline()) {
        let smoothed = smooth_points(&points, 16);

        for p in &smoothed {
            prop_assert!(p.is_finite());
        }
        // The gesture's endpoints always survive both passes
        prop_assert_eq!(smoothed[0], points[0]);
        prop_assert_eq!(*smoothed.last().unwrap(), *points.last().unwrap());
    }

    #[test]
    fn deflection_vanishes_outside_influence(stone in stone(), p in garden_point(), offset in -0.2f32..0.2) {
        let d = p.distance(stone.position);
        let influence_radius = stone.radius * INFLUENCE_FACTOR;
        prop_assume!(d >= influence_radius || d <= stone.radius);

        prop_assert_eq!(deflect_point(p, &[stone], offset), p);
    }

    #[test]
    fn deflection_is_bounded_by_offset(stones in prop::collection::vec(stone(), 1..4), p in garden_point(), offset in -0.2f32..0.2) {
        let moved = deflect_point(p, &stones, offset);
        prop_assert!(moved.is_finite());
        // Tangential 0.8 + radial 0.3 give at most sqrt(0.73) ~ 0.855 of the
        // offset per unit influence; the weighted average cannot exceed it
        prop_assert!(moved.distance(p) <= offset.abs() * 0.86 + 1e-5);
    }

    #[test]
    fn deflection_fades_to_zero_at_boundary(stone in stone(), offset in 0.05f32..0.2, frac in 0.95f32..1.0) {
        // A point at `frac` of the influence radius, just inside the ring
        let influence_radius = stone.radius * INFLUENCE_FACTOR;
        let p = stone.position + Vec2::new(influence_radius * frac, 0.0);

        let falloff = (influence_radius - p.distance(stone.position))
            / (influence_radius - stone.radius);
        let bound = offset * 0.86 * falloff * falloff;

        prop_assert!(deflect_point(p, &[stone], offset).distance(p) <= bound + 1e-5);
    }

    #[test]
    fn texture_roundtrip_within_one_pixel(u in 0i32..TEXTURE_SIZE as i32, v in 0i32..TEXTURE_SIZE as i32) {
        let (x, z) = texture_to_world(u, v);
        let (u2, v2) = world_to_texture(x, z);
        prop_assert!((u - u2).abs() <= 1);
        prop_assert!((v - v2).abs() <= 1);
    }

    #[test]
    fn sub_threshold_motion_never_grows_buffer(start in garden_point(), steps in prop::collection::vec((-0.03f32..0.03, -0.03f32..0.03), 1..20)) {
        let mut garden = GardenState::empty();
        garden.start_stroke(start.x, start.y);

        for (dx, dz) in steps {
            // Each candidate stays within sqrt(2)*0.03 < 0.05 of the start
            // point, which remains the only kept point
            garden.continue_stroke(start.x + dx, start.y + dz);
            prop_assert_eq!(garden.current_stroke.len(), 1);
        }
    }
}
