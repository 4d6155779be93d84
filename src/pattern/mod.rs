//! Deterministic pattern pipeline
//!
//! Everything that turns a stroke's point sequence into sand marks lives
//! here. This module must stay pure and deterministic:
//! - Seeded RNG only (base grain texture)
//! - No platform or render-backend dependencies
//! - Time enters only as explicit `now_ms` parameters

pub mod compositor;
pub mod deflect;
pub mod geometry;
pub mod raster;
pub mod stroke;

pub use compositor::PatternTexture;
pub use deflect::{deflect_point, inside_any_stone};
pub use geometry::{simplify_points, smooth_points, texture_to_world, world_to_texture};
pub use raster::{Raster, Rgb};
pub use stroke::{draw_preview_stroke, draw_rake_stroke};
