//! Garden state store
//!
//! Owns the canonical stones, persisted strokes, and the in-progress
//! gesture buffer. Input glue and the compositor mutate it only through
//! the operations on [`GardenState`].

pub mod state;

pub use state::{GardenState, RakeStroke, Stone, Tool};
