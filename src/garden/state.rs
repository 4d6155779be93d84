//! Garden state and stroke lifecycle
//!
//! A stroke's life: points accumulate in `current_stroke` while the rake is
//! down, `end_stroke` freezes them into a [`RakeStroke`] with a deep stone
//! snapshot, and `advance_fades` walks persisted strokes toward removal.
//! Stone movement after finalize must never change how an older stroke
//! renders - the snapshot is the only stone set its rasterization sees.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    FADE_DURATION_MS, FADE_START_MS, MAX_STONES, MIN_POINT_DISTANCE, STONE_HIT_MARGIN,
};

/// Opacity changes smaller than this are not written back (avoids churn)
const OPACITY_EPSILON: f32 = 0.02;

/// A fixed circular stone in the garden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stone {
    pub id: u32,
    /// World-space (x, z) center
    pub position: Vec2,
    pub radius: f32,
    pub scale: f32,
}

/// One finalized rake gesture
#[derive(Debug, Clone)]
pub struct RakeStroke {
    pub id: u32,
    /// Raw accumulated world points (smoothing happens at draw time)
    pub points: Vec<Vec2>,
    /// Creation time in ms (host clock)
    pub timestamp: f64,
    /// Current opacity in [0, 1]; the fade tick walks this to zero
    pub opacity: f32,
    /// Stones as they stood when the stroke was finalized
    pub stones_snapshot: Vec<Stone>,
}

/// Active interaction tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Rake,
    Stone,
}

/// Canonical garden state. Mutation happens only through these operations.
pub struct GardenState {
    pub stones: Vec<Stone>,
    pub strokes: Vec<RakeStroke>,
    /// In-progress gesture buffer (no id/timestamp/snapshot yet)
    pub current_stroke: Vec<Vec2>,
    pub is_raking: bool,
    pub tool: Tool,
    next_id: u32,
}

impl GardenState {
    /// Create a garden with the default stone layout.
    pub fn new() -> Self {
        let mut state = Self::empty();
        state.add_stone(-1.8, -1.2, 0.5, 1.2);
        state.add_stone(1.5, 0.8, 0.4, 1.0);
        state.add_stone(0.4, -2.3, 0.35, 0.8);
        state
    }

    /// Create a garden with no stones (used by load paths and tests).
    pub fn empty() -> Self {
        Self {
            stones: Vec::new(),
            strokes: Vec::new(),
            current_stroke: Vec::new(),
            is_raking: false,
            tool: Tool::default(),
            next_id: 1,
        }
    }

    /// Rebuild a garden from persisted stones and strokes (load path).
    /// The id counter resumes past the highest restored id.
    pub fn from_saved(stones: Vec<Stone>, strokes: Vec<RakeStroke>) -> Self {
        let next_id = stones
            .iter()
            .map(|s| s.id)
            .chain(strokes.iter().map(|s| s.id))
            .max()
            .map_or(1, |m| m + 1);
        Self {
            stones,
            strokes,
            current_stroke: Vec::new(),
            is_raking: false,
            tool: Tool::default(),
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    // === Stroke lifecycle ===

    /// Begin a rake gesture at a world position.
    pub fn start_stroke(&mut self, x: f32, z: f32) {
        self.current_stroke.clear();
        self.current_stroke.push(Vec2::new(x, z));
        self.is_raking = true;
    }

    /// Append a point to the active gesture. Points closer than
    /// `MIN_POINT_DISTANCE` to the last buffered point are dropped so the
    /// buffer stays bounded and the smoother never sees near-duplicates.
    pub fn continue_stroke(&mut self, x: f32, z: f32) {
        if !self.is_raking {
            return;
        }
        let point = Vec2::new(x, z);
        match self.current_stroke.last() {
            Some(last) if last.distance(point) < MIN_POINT_DISTANCE => {}
            _ => self.current_stroke.push(point),
        }
    }

    /// End the gesture. With at least 2 points the buffer becomes a
    /// persisted stroke stamped with `now_ms` and a deep stone snapshot;
    /// anything shorter is discarded silently.
    pub fn end_stroke(&mut self, now_ms: f64) {
        self.is_raking = false;

        if self.current_stroke.len() < 2 {
            self.current_stroke.clear();
            return;
        }

        let id = self.next_entity_id();
        let stroke = RakeStroke {
            id,
            points: std::mem::take(&mut self.current_stroke),
            timestamp: now_ms,
            opacity: 1.0,
            stones_snapshot: self.stones.clone(),
        };
        log::debug!("stroke {} persisted ({} points)", id, stroke.points.len());
        self.strokes.push(stroke);
    }

    pub fn update_stroke_opacity(&mut self, id: u32, value: f32) {
        if let Some(stroke) = self.strokes.iter_mut().find(|s| s.id == id) {
            stroke.opacity = value.clamp(0.0, 1.0);
        }
    }

    pub fn remove_stroke(&mut self, id: u32) {
        self.strokes.retain(|s| s.id != id);
    }

    pub fn clear_strokes(&mut self) {
        self.strokes.clear();
        self.current_stroke.clear();
        self.is_raking = false;
    }

    /// Advance stroke fades to `now_ms`: opacity holds at 1.0 for the grace
    /// period, falls linearly over the fade window, and the stroke is
    /// removed once it reaches zero.
    pub fn advance_fades(&mut self, now_ms: f64) {
        self.strokes.retain_mut(|stroke| {
            let age = now_ms - stroke.timestamp;
            if age <= FADE_START_MS {
                return true;
            }
            let progress = ((age - FADE_START_MS) / FADE_DURATION_MS).min(1.0) as f32;
            let target = 1.0 - progress;
            if target <= 0.0 {
                return false;
            }
            if (stroke.opacity - target).abs() > OPACITY_EPSILON {
                stroke.opacity = target;
            }
            true
        });
    }

    // === Stones ===

    /// Add a stone, up to `MAX_STONES`. Returns the new id, or `None` when
    /// the garden is full.
    pub fn add_stone(&mut self, x: f32, z: f32, radius: f32, scale: f32) -> Option<u32> {
        if self.stones.len() >= MAX_STONES {
            log::warn!("stone limit reached ({MAX_STONES})");
            return None;
        }
        let id = self.next_entity_id();
        self.stones.push(Stone {
            id,
            position: Vec2::new(x, z),
            radius,
            scale,
        });
        Some(id)
    }

    /// Move a stone. Persisted strokes keep rendering from their snapshots;
    /// only future strokes and the live preview see the new position.
    pub fn move_stone(&mut self, id: u32, x: f32, z: f32) {
        if let Some(stone) = self.stones.iter_mut().find(|s| s.id == id) {
            stone.position = Vec2::new(x, z);
        }
    }

    pub fn remove_stone(&mut self, id: u32) {
        self.stones.retain(|s| s.id != id);
    }

    /// True when a world position is blocked by a stone (with the rake
    /// clearance margin). Input glue uses this to refuse stroke points.
    pub fn stone_blocks(&self, x: f32, z: f32) -> bool {
        let p = Vec2::new(x, z);
        self.stones
            .iter()
            .any(|stone| p.distance(stone.position) < stone.radius + STONE_HIT_MARGIN)
    }
}

impl Default for GardenState {
    fn default() -> Self {
        Self::new()
    }
}
