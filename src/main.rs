//! Zen Rake entry point
//!
//! The engine is a library: on the web the host page drives it through the
//! lib API and uploads the texture itself. The native binary runs a short
//! headless session as a smoke check.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Zen Rake engine loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Zen Rake (native) starting...");
    run_headless_session();
}

/// Rake one sweeping gesture past the default stones and tick the texture
/// through its fade schedule, logging how much sand stays marked.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_session() {
    use zen_rake::{GardenState, PatternTexture};

    let seed = 0xC0FFEE;
    let mut garden = GardenState::new();
    let mut texture = PatternTexture::new(seed);
    let base = PatternTexture::new(seed);

    garden.start_stroke(-4.0, -2.0);
    let steps = 60;
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        let x = -4.0 + 8.0 * t;
        let z = -2.0 + 3.0 * (t * std::f32::consts::PI).sin();
        // Input glue refuses points on stones, same as the pointer handler
        if !garden.stone_blocks(x, z) {
            garden.continue_stroke(x, z);
        }
    }
    garden.end_stroke(0.0);
    log::info!(
        "stroke finalized: {} strokes, {} stones",
        garden.strokes.len(),
        garden.stones.len()
    );

    for &now in &[0.0, 4000.0, 9000.0, 12_000.0] {
        texture.update(&mut garden, now);

        let marked = texture
            .pixels()
            .chunks_exact(4)
            .zip(base.pixels().chunks_exact(4))
            .filter(|(a, b)| a != b)
            .count();
        let total = texture.size() * texture.size();
        let opacity = garden.strokes.first().map(|s| s.opacity).unwrap_or(0.0);

        log::info!(
            "t={now:>6}ms  strokes={} opacity={opacity:.2}  marked {marked}/{total} px ({:.2}%)",
            garden.strokes.len(),
            100.0 * marked as f64 / total as f64,
        );
    }

    assert!(garden.strokes.is_empty(), "stroke should fade out by 12s");
    log::info!("headless session complete");
}
