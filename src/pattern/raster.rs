//! CPU raster surface for the pattern texture
//!
//! Polylines are stroked by evaluating a capsule SDF per pixel: distance to
//! the nearest segment, a 1-pixel linear edge ramp for antialiasing, round
//! caps and joins falling out of the distance function itself. Coverage is
//! max-combined across all segments of a polyline and composited once, so
//! a semi-transparent stroke never darkens where its own segments overlap.
//!
//! The surface is opaque: compositing blends source-over an alpha-255
//! destination.

use glam::Vec2;

/// Solid color, no alpha (alpha comes in per stroke call).
pub type Rgb = [u8; 3];

/// A fixed-size RGBA pixel buffer.
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    /// Scratch coverage mask reused across stroke calls
    coverage: Vec<f32>,
}

/// Distance from `p` to the segment `a`-`b`.
#[inline]
pub fn sd_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let h = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (p - a - ab * h).length()
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
            coverage: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The RGBA pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Fill the whole surface with an opaque color.
    pub fn fill(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color[0];
            px[1] = color[1];
            px[2] = color[2];
            px[3] = 255;
        }
    }

    /// Overwrite the whole surface from a same-sized RGBA buffer.
    pub fn blit(&mut self, src: &[u8]) {
        debug_assert_eq!(src.len(), self.pixels.len());
        self.pixels.copy_from_slice(src);
    }

    /// Stroke a polyline with round caps and joins.
    ///
    /// `width` is the full stroke width in pixels; `alpha` in [0, 1] is the
    /// uniform opacity of the whole stroke. Fewer than 2 points draws
    /// nothing.
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgb, alpha: f32) {
        if points.len() < 2 || alpha <= 0.0 {
            return;
        }

        let half = width / 2.0;
        let pad = half + 1.0;

        // Overall bbox, for the composite pass and scratch clearing
        let (x0, y0, x1, y1) = match self.clamped_bbox(points, pad) {
            Some(b) => b,
            None => return,
        };

        for seg in points.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let Some((sx0, sy0, sx1, sy1)) = self.clamped_bbox(seg, pad) else {
                continue;
            };
            for y in sy0..=sy1 {
                for x in sx0..=sx1 {
                    let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let d = sd_segment(p, a, b);
                    // 1px linear ramp across the capsule edge
                    let cov = (half + 0.5 - d).clamp(0.0, 1.0);
                    if cov > 0.0 {
                        let idx = y * self.width + x;
                        if cov > self.coverage[idx] {
                            self.coverage[idx] = cov;
                        }
                    }
                }
            }
        }

        // Single source-over composite for the whole polyline
        for y in y0..=y1 {
            for x in x0..=x1 {
                let idx = y * self.width + x;
                let cov = self.coverage[idx];
                if cov > 0.0 {
                    self.coverage[idx] = 0.0;
                    let a = alpha * cov;
                    let px = &mut self.pixels[idx * 4..idx * 4 + 4];
                    px[0] = blend(color[0], px[0], a);
                    px[1] = blend(color[1], px[1], a);
                    px[2] = blend(color[2], px[2], a);
                    px[3] = 255;
                }
            }
        }
    }

    /// Pixel bbox of `points` inflated by `pad`, clamped to the surface.
    /// None when the whole box falls outside.
    fn clamped_bbox(&self, points: &[Vec2], pad: f32) -> Option<(usize, usize, usize, usize)> {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        let x0 = (min.x - pad).floor() as i64;
        let y0 = (min.y - pad).floor() as i64;
        let x1 = (max.x + pad).ceil() as i64;
        let y1 = (max.y + pad).ceil() as i64;

        if x1 < 0 || y1 < 0 || x0 >= self.width as i64 || y0 >= self.height as i64 {
            return None;
        }
        Some((
            x0.max(0) as usize,
            y0.max(0) as usize,
            x1.min(self.width as i64 - 1) as usize,
            y1.min(self.height as i64 - 1) as usize,
        ))
    }
}

/// Source-over blend of one channel against an opaque destination.
#[inline]
fn blend(src: u8, dst: u8, alpha: f32) -> u8 {
    (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(raster: &Raster, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * raster.width() + x) * 4;
        raster.pixels()[idx..idx + 4].try_into().unwrap()
    }

    #[test]
    fn test_fill() {
        let mut raster = Raster::new(8, 8);
        raster.fill([10, 20, 30]);
        assert_eq!(px(&raster, 3, 5), [10, 20, 30, 255]);
    }

    #[test]
    fn test_stroke_covers_line_not_background() {
        let mut raster = Raster::new(64, 64);
        raster.fill([255, 255, 255]);
        raster.stroke_polyline(
            &[Vec2::new(8.0, 32.0), Vec2::new(56.0, 32.0)],
            3.0,
            [0, 0, 0],
            1.0,
        );
        // On the centerline: fully dark
        assert!(px(&raster, 32, 32)[0] < 30);
        // Far from the line: untouched
        assert_eq!(px(&raster, 32, 8), [255, 255, 255, 255]);
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut raster = Raster::new(64, 64);
        raster.fill([255, 255, 255]);
        raster.stroke_polyline(
            &[Vec2::new(16.0, 32.0), Vec2::new(48.0, 32.0)],
            6.0,
            [0, 0, 0],
            1.0,
        );
        // One pixel beyond the endpoint, still within the cap radius
        assert!(px(&raster, 49, 32)[0] < 128);
    }

    #[test]
    fn test_single_point_draws_nothing() {
        let mut raster = Raster::new(16, 16);
        raster.fill([255, 255, 255]);
        raster.stroke_polyline(&[Vec2::new(8.0, 8.0)], 4.0, [0, 0, 0], 1.0);
        assert_eq!(px(&raster, 8, 8), [255, 255, 255, 255]);
    }

    #[test]
    fn test_alpha_blends() {
        let mut raster = Raster::new(16, 16);
        raster.fill([200, 200, 200]);
        raster.stroke_polyline(
            &[Vec2::new(2.0, 8.0), Vec2::new(14.0, 8.0)],
            4.0,
            [0, 0, 0],
            0.5,
        );
        let value = px(&raster, 8, 8)[0];
        assert!(value > 80 && value < 120, "got {value}");
    }

    #[test]
    fn test_join_does_not_double_darken() {
        // Two segments meeting at (32,32): the joint must blend once
        let mut a = Raster::new(64, 64);
        a.fill([200, 200, 200]);
        a.stroke_polyline(
            &[
                Vec2::new(8.0, 8.0),
                Vec2::new(32.0, 32.0),
                Vec2::new(8.0, 56.0),
            ],
            4.0,
            [0, 0, 0],
            0.5,
        );

        let mut b = Raster::new(64, 64);
        b.fill([200, 200, 200]);
        b.stroke_polyline(&[Vec2::new(8.0, 8.0), Vec2::new(32.0, 32.0)], 4.0, [0, 0, 0], 0.5);

        assert_eq!(px(&a, 32, 32), px(&b, 32, 32));
    }

    #[test]
    fn test_offscreen_polyline_is_ignored() {
        let mut raster = Raster::new(16, 16);
        raster.fill([255, 255, 255]);
        raster.stroke_polyline(
            &[Vec2::new(-50.0, -50.0), Vec2::new(-40.0, -50.0)],
            4.0,
            [0, 0, 0],
            1.0,
        );
        assert_eq!(px(&raster, 0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blit_overwrites() {
        let mut raster = Raster::new(4, 4);
        raster.fill([1, 2, 3]);
        let snapshot = raster.pixels().to_vec();
        raster.stroke_polyline(&[Vec2::new(0.0, 2.0), Vec2::new(4.0, 2.0)], 2.0, [9, 9, 9], 1.0);
        raster.blit(&snapshot);
        assert_eq!(raster.pixels(), &snapshot[..]);
    }

    #[test]
    fn test_sd_segment_degenerate() {
        let a = Vec2::new(3.0, 3.0);
        assert_eq!(sd_segment(Vec2::new(3.0, 7.0), a, a), 4.0);
    }
}
