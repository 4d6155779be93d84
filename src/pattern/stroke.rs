//! Multi-tooth rake stroke rasterization
//!
//! A stroke renders as `num_teeth` parallel offset polylines. Each smoothed
//! centerline point fans outward along the local perpendicular, bends
//! through the stone deflection field, and is dropped entirely when it
//! lands inside a stone body - flushing the accumulated sub-path so the
//! tooth visibly breaks against the rock instead of crossing it.

use glam::Vec2;

use crate::consts::{
    MARK_COLOR, PREVIEW_OPACITY, SPLINE_SEGMENTS, STROKE_ALPHA, STROKE_WIDTH, TOOTH_SPACING,
};
use crate::garden::Stone;
use crate::perpendicular;

use super::deflect::{deflect_point, inside_any_stone};
use super::geometry::{smooth_points, world_to_texture};
use super::raster::Raster;

/// Draw one rake stroke into the raster.
///
/// `stones` must be the stroke's own snapshot for persisted strokes, or the
/// live stone list for the preview - the caller decides; this function only
/// ever sees one set.
pub fn draw_rake_stroke(
    raster: &mut Raster,
    points: &[Vec2],
    opacity: f32,
    stones: &[Stone],
    num_teeth: usize,
) {
    if points.len() < 2 {
        return;
    }

    let alpha = opacity * STROKE_ALPHA;
    let smoothed = smooth_points(points, SPLINE_SEGMENTS);

    for tooth in 0..num_teeth {
        let offset = (tooth as f32 - (num_teeth as f32 - 1.0) / 2.0) * TOOTH_SPACING;

        let mut path: Vec<Vec2> = Vec::new();
        for (i, point) in smoothed.iter().enumerate() {
            // Perpendicular of the outgoing segment; the last point reuses
            // the incoming one
            let perp = if i + 1 < smoothed.len() {
                perpendicular(smoothed[i + 1] - *point)
            } else {
                perpendicular(*point - smoothed[i - 1])
            };

            let fanned = *point + perp * offset;
            let world = deflect_point(fanned, stones, offset);

            if inside_any_stone(world, stones) {
                flush(raster, &mut path, alpha);
                continue;
            }

            let (u, v) = world_to_texture(world.x, world.y);
            path.push(Vec2::new(u as f32, v as f32));
        }
        flush(raster, &mut path, alpha);
    }
}

/// Draw the in-progress gesture as a preview stroke against the live stones.
pub fn draw_preview_stroke(raster: &mut Raster, points: &[Vec2], stones: &[Stone], num_teeth: usize) {
    draw_rake_stroke(raster, points, PREVIEW_OPACITY, stones, num_teeth);
}

/// Stroke the accumulated sub-path (if drawable) and reset it.
fn flush(raster: &mut Raster, path: &mut Vec<Vec2>, alpha: f32) {
    if path.len() >= 2 {
        raster.stroke_polyline(path, STROKE_WIDTH, MARK_COLOR, alpha);
    }
    path.clear();
}
