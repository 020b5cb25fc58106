//! Gate Glider - a side-scrolling gate-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `highscore`: Best score persistence (LocalStorage on web)
//! - `settings`: Player preferences
//! - `audio`: WebAudio sound cues (web only)
//!
//! The simulation never touches the platform: the shell in `main.rs` feeds it
//! ticks, spawn timer firings, and input requests, then draws the snapshot it
//! returns and carries out the events it queues.

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscore;
pub mod settings;
pub mod sim;

pub use highscore::BestScore;
pub use settings::Settings;

/// Game configuration constants
///
/// All tuning was done at a 750px reference width; sizes and velocities are
/// expressed as fractions of it so the feel survives any board size.
pub mod consts {
    /// Reference width the proportional constants below derive from
    pub const BASE_WIDTH: f32 = 750.0;

    /// Downward acceleration per tick², applied before each position update
    pub const GRAVITY: f32 = BASE_WIDTH / 11000.0;
    /// Horizontal scroll velocity per tick (negative: gates move left)
    pub const SCROLL_DX: f32 = -BASE_WIDTH / 300.0;

    /// Width of a gate column
    pub const GATE_WIDTH: f32 = BASE_WIDTH / 25.0;
    /// Height of each gate half (top and bottom columns)
    pub const GATE_HEIGHT: f32 = BASE_WIDTH / 2.0;

    /// Flyer width bounds, so tiny and huge screens stay playable
    pub const MIN_FLYER_WIDTH: f32 = 20.0;
    pub const MAX_FLYER_WIDTH: f32 = BASE_WIDTH / 2.0;

    /// Gate spawn cadence in milliseconds (external timer, independent of
    /// the per-frame tick rate)
    pub const SPAWN_INTERVAL_MS: u32 = 1500;
}
