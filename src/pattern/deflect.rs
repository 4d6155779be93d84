//! Radial-influence deflection field around stones
//!
//! Each stone bends nearby rake teeth as if the stroke were tracing
//! concentric ripples: a tangential push proportional to the tooth's
//! signed offset from the stroke centerline, plus a smaller outward radial
//! push. Influence falls off quadratically from the stone surface to
//! 3x its radius, and overlapping stones are blended by influence-weighted
//! average so the displacement stays bounded.

use glam::Vec2;

use crate::consts::{INFLUENCE_FACTOR, RADIAL_STRENGTH, TANGENTIAL_STRENGTH};
use crate::garden::Stone;

/// Displace a point by the stones' combined deflection field.
///
/// `offset` is the tooth's signed distance from the stroke centerline; it
/// scales both the tangential bend direction and the radial push. A point
/// outside every influence ring (or inside a stone body, handled by the
/// caller via [`inside_any_stone`]) is returned unchanged.
pub fn deflect_point(p: Vec2, stones: &[Stone], offset: f32) -> Vec2 {
    let mut total = Vec2::ZERO;
    let mut total_influence = 0.0_f32;

    for stone in stones {
        let delta = p - stone.position;
        let distance = delta.length();

        let influence_radius = stone.radius * INFLUENCE_FACTOR;

        // Strictly outside the stone body, strictly inside the influence ring.
        // distance == 0 falls through, so the division below never sees it.
        if distance > stone.radius && distance < influence_radius {
            let falloff = (influence_radius - distance) / (influence_radius - stone.radius);
            let influence = falloff * falloff;

            let normal = delta / distance;
            let tangent = Vec2::new(-normal.y, normal.x);

            // This stone's contribution, already scaled by its influence
            let contribution = tangent * (offset * influence * TANGENTIAL_STRENGTH)
                + normal * (offset.abs() * influence * RADIAL_STRENGTH);

            // Influence-weighted blend: overlapping rings average instead of
            // stacking, and a lone stone's pull still dies off with falloff
            total += contribution * influence;
            total_influence += influence;
        }
    }

    if total_influence > 0.0 {
        p + total / total_influence
    } else {
        p
    }
}

/// True if the point lies strictly inside any stone's body.
#[inline]
pub fn inside_any_stone(p: Vec2, stones: &[Stone]) -> bool {
    stones
        .iter()
        .any(|stone| p.distance(stone.position) < stone.radius)
}
