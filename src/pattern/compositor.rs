//! Full-frame pattern texture composition
//!
//! Per update: restore the precomputed base sand texture (overwrite, never
//! blend - regenerating noise every frame would flicker), advance stroke
//! fades through the store, draw every persisted stroke from its own stone
//! snapshot, draw the in-progress gesture as a preview against the live
//! stones, and flag the texture dirty for the consuming material.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{NOISE_AMPLITUDE, NUM_TEETH, SAND_COLOR, TEXTURE_SIZE};
use crate::garden::GardenState;

use super::raster::Raster;
use super::stroke::{draw_preview_stroke, draw_rake_stroke};

/// The persistent output texture of the pattern engine.
pub struct PatternTexture {
    raster: Raster,
    /// Undisturbed sand, generated once and re-blitted every update
    base: Vec<u8>,
    dirty: bool,
}

impl PatternTexture {
    /// Build the texture with a seeded grain so the sand looks identical
    /// across sessions with the same seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut base = vec![0u8; TEXTURE_SIZE * TEXTURE_SIZE * 4];
        for px in base.chunks_exact_mut(4) {
            // One noise value across all channels keeps the grain gray
            let noise: f32 = rng.random_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE);
            px[0] = (SAND_COLOR[0] as f32 + noise).clamp(0.0, 255.0) as u8;
            px[1] = (SAND_COLOR[1] as f32 + noise).clamp(0.0, 255.0) as u8;
            px[2] = (SAND_COLOR[2] as f32 + noise).clamp(0.0, 255.0) as u8;
            px[3] = 255;
        }

        let mut raster = Raster::new(TEXTURE_SIZE, TEXTURE_SIZE);
        raster.blit(&base);

        Self {
            raster,
            base,
            dirty: true,
        }
    }

    /// Advance fades and redraw the whole texture for the current state.
    ///
    /// Persisted strokes always render from their finalize-time stone
    /// snapshot; only the live preview sees the current stone positions.
    pub fn update(&mut self, garden: &mut GardenState, now_ms: f64) {
        garden.advance_fades(now_ms);

        self.raster.blit(&self.base);

        for stroke in &garden.strokes {
            draw_rake_stroke(
                &mut self.raster,
                &stroke.points,
                stroke.opacity,
                &stroke.stones_snapshot,
                NUM_TEETH,
            );
        }

        if garden.current_stroke.len() >= 2 {
            draw_preview_stroke(
                &mut self.raster,
                &garden.current_stroke,
                &garden.stones,
                NUM_TEETH,
            );
        }

        self.dirty = true;
    }

    /// Texture side length in pixels.
    pub fn size(&self) -> usize {
        TEXTURE_SIZE
    }

    /// Current RGBA pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        self.raster.pixels()
    }

    /// Consume the dirty flag; true means the host should re-upload.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
