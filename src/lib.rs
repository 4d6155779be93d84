//! Zen Rake - sand-raking pattern engine for a zen garden
//!
//! Core modules:
//! - `pattern`: Deterministic pattern pipeline (smoothing, deflection, rasterization)
//! - `garden`: State store for stones, strokes, and the in-progress gesture
//! - `persistence`: Save/load of garden state
//!
//! The engine receives world-space `(x, z)` pointer positions from the host
//! and produces an RGBA texture the host uploads to its sand material. Scene
//! setup, camera, and input capture live outside this crate.

pub mod garden;
pub mod pattern;
pub mod persistence;

pub use garden::{GardenState, RakeStroke, Stone, Tool};
pub use pattern::PatternTexture;

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Side length of the square pattern texture, in pixels
    pub const TEXTURE_SIZE: usize = 1024;
    /// Side length of the garden in world units (coordinates span ±GARDEN_SIZE/2)
    pub const GARDEN_SIZE: f32 = 10.0;

    /// Number of parallel rake teeth per stroke
    pub const NUM_TEETH: usize = 5;
    /// Spacing between adjacent teeth (world units)
    pub const TOOTH_SPACING: f32 = 0.08;
    /// Stroke line width (texture pixels)
    pub const STROKE_WIDTH: f32 = 3.0;
    /// Alpha applied on top of a stroke's own opacity
    pub const STROKE_ALPHA: f32 = 0.7;
    /// Opacity of the in-progress preview stroke
    pub const PREVIEW_OPACITY: f32 = 0.5;

    /// Undisturbed sand color (#e8e4dc)
    pub const SAND_COLOR: [u8; 3] = [232, 228, 220];
    /// Rake mark color (#8b7355)
    pub const MARK_COLOR: [u8; 3] = [139, 115, 85];
    /// Per-channel grain noise amplitude on the base texture
    pub const NOISE_AMPLITUDE: f32 = 6.0;

    /// Minimum spacing between simplified spline control points (world units)
    pub const SIMPLIFY_MIN_DISTANCE: f32 = 0.12;
    /// Interpolated points emitted per control-point interval
    pub const SPLINE_SEGMENTS: usize = 16;
    /// Minimum pointer travel before a new point enters the stroke buffer
    pub const MIN_POINT_DISTANCE: f32 = 0.05;

    /// Influence radius of a stone = INFLUENCE_FACTOR * radius
    pub const INFLUENCE_FACTOR: f32 = 3.0;
    /// Tangential deflection strength (bends teeth around the stone)
    pub const TANGENTIAL_STRENGTH: f32 = 0.8;
    /// Radial deflection strength (pushes teeth outward)
    pub const RADIAL_STRENGTH: f32 = 0.3;

    /// Grace period before a stroke starts fading (ms)
    pub const FADE_START_MS: f64 = 8000.0;
    /// Linear fade-out duration after the grace period (ms)
    pub const FADE_DURATION_MS: f64 = 4000.0;

    /// Maximum number of stones in the garden
    pub const MAX_STONES: usize = 5;
    /// Extra clearance around a stone when testing rake collisions (world units)
    pub const STONE_HIT_MARGIN: f32 = 0.1;
}

/// Left-hand perpendicular of a direction vector, normalized.
/// Returns `Vec2::ZERO` for a zero-length input.
#[inline]
pub fn perpendicular(dir: Vec2) -> Vec2 {
    let len = dir.length();
    if len > 0.0 {
        Vec2::new(-dir.y, dir.x) / len
    } else {
        Vec2::ZERO
    }
}
