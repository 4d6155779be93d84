//! Save/load of garden state
//!
//! Strokes and stones flatten to plain JSON shapes inside a versioned
//! envelope, persisted to LocalStorage on wasm32 and stubbed natively.
//! Corrupt or unparseable input always degrades to "no prior state" - the
//! caller cannot tell the difference and does not need to.
//!
//! Stroke snapshots are not persisted: a restored stroke is re-snapshotted
//! against the stones loaded with it, so the garden renders consistently
//! with its own layout.

use serde::{Deserialize, Serialize};

use crate::garden::{GardenState, RakeStroke, Stone};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// LocalStorage key (used only in wasm32)
#[allow(dead_code)]
const STORAGE_KEY: &str = "zen_rake_save";

/// Flat 2D point shape (`{x, y}`) for stroke serialization
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavedPoint {
    pub x: f32,
    pub y: f32,
}

/// Flat stroke shape: `{id, points, timestamp, opacity}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedStroke {
    pub id: u32,
    pub points: Vec<SavedPoint>,
    pub timestamp: f64,
    pub opacity: f32,
}

impl From<&RakeStroke> for SavedStroke {
    fn from(stroke: &RakeStroke) -> Self {
        Self {
            id: stroke.id,
            points: stroke
                .points
                .iter()
                .map(|p| SavedPoint { x: p.x, y: p.y })
                .collect(),
            timestamp: stroke.timestamp,
            opacity: stroke.opacity,
        }
    }
}

impl SavedStroke {
    /// Rebuild a stroke, snapshotting it against the given stones.
    pub fn restore(&self, stones: &[Stone]) -> RakeStroke {
        RakeStroke {
            id: self.id,
            points: self
                .points
                .iter()
                .map(|p| glam::Vec2::new(p.x, p.y))
                .collect(),
            timestamp: self.timestamp,
            opacity: self.opacity.clamp(0.0, 1.0),
            stones_snapshot: stones.to_vec(),
        }
    }
}

/// Serialize strokes to their flat JSON form.
pub fn serialize_strokes(strokes: &[RakeStroke]) -> String {
    let flat: Vec<SavedStroke> = strokes.iter().map(SavedStroke::from).collect();
    serde_json::to_string(&flat).unwrap_or_default()
}

/// Restore strokes from JSON, snapshotting against `stones`.
/// Corrupt input yields an empty list.
pub fn deserialize_strokes(data: &str, stones: &[Stone]) -> Vec<RakeStroke> {
    match serde_json::from_str::<Vec<SavedStroke>>(data) {
        Ok(flat) => flat.iter().map(|s| s.restore(stones)).collect(),
        Err(_) => Vec::new(),
    }
}

/// Serialize stones (`{id, position: [x, z], radius, scale}`).
pub fn serialize_stones(stones: &[Stone]) -> String {
    serde_json::to_string(stones).unwrap_or_default()
}

/// Restore stones from JSON. Corrupt input yields an empty list.
pub fn deserialize_stones(data: &str) -> Vec<Stone> {
    serde_json::from_str(data).unwrap_or_default()
}

/// Versioned save envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GardenSave {
    pub version: u32,
    pub stones: Vec<Stone>,
    pub strokes: Vec<SavedStroke>,
    /// Unix timestamp (ms) when captured
    pub saved_at: f64,
}

impl GardenSave {
    /// Capture the persistable parts of the garden.
    pub fn capture(garden: &GardenState, now_ms: f64) -> Self {
        Self {
            version: SAVE_VERSION,
            stones: garden.stones.clone(),
            strokes: garden.strokes.iter().map(SavedStroke::from).collect(),
            saved_at: now_ms,
        }
    }

    /// Rebuild a garden from the envelope.
    pub fn restore(&self) -> GardenState {
        let strokes = self
            .strokes
            .iter()
            .map(|s| s.restore(&self.stones))
            .collect();
        GardenState::from_saved(self.stones.clone(), strokes)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse an envelope; `None` on corrupt input or version mismatch.
    pub fn from_json(data: &str) -> Option<Self> {
        let save: GardenSave = serde_json::from_str(data).ok()?;
        if save.version != SAVE_VERSION {
            log::warn!("discarding save with unknown version {}", save.version);
            return None;
        }
        Some(save)
    }
}

/// Save the garden to LocalStorage (WASM only).
#[cfg(target_arch = "wasm32")]
pub fn save_garden(garden: &GardenState, now_ms: f64) {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten();

    if let Some(storage) = storage {
        let json = GardenSave::capture(garden, now_ms).to_json();
        let _ = storage.set_item(STORAGE_KEY, &json);
        log::info!(
            "Garden saved ({} stones, {} strokes)",
            garden.stones.len(),
            garden.strokes.len()
        );
    }
}

/// Load a saved garden from LocalStorage (WASM only).
#[cfg(target_arch = "wasm32")]
pub fn load_garden() -> Option<GardenState> {
    let storage = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()?;

    if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
        if let Some(save) = GardenSave::from_json(&json) {
            log::info!("Loaded garden with {} stones", save.stones.len());
            return Some(save.restore());
        }
    }

    log::info!("No saved garden found, starting fresh");
    None
}

/// Remove the saved garden from LocalStorage (WASM only).
#[cfg(target_arch = "wasm32")]
pub fn clear_save() {
    if let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    {
        let _ = storage.remove_item(STORAGE_KEY);
        log::info!("Saved garden cleared");
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn save_garden(_garden: &GardenState, _now_ms: f64) {
    // No-op for native
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_garden() -> Option<GardenState> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clear_save() {
    // No-op for native
}
