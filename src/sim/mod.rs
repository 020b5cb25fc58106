//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - FIFO gate ordering (spawn order is retirement order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use state::{
    BackdropCue, Flyer, Gate, GateStream, GameEvent, GameMode, GameState, Playfield, SoundCue,
};
pub use tick::{Snapshot, spawn_gate, tick};
