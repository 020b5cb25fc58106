//! Per-frame simulation tick
//!
//! The shell calls `tick` once per animation frame in every mode; outside
//! Running it is a pure snapshot read. Physics constants are per-tick, so the
//! step is fixed, and the spawn cadence is the shell's wall-clock timer.

use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use super::state::{Gate, GameMode, GameState, SoundCue};
use crate::consts::*;
use rand::Rng;

/// Immutable per-tick output for the rendering shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub flyer: Rect,
    /// Both halves of every active gate, oldest gate first
    pub obstacles: Vec<Rect>,
    pub score: u32,
    pub best_score: u32,
    pub mode: GameMode,
}

/// Advance one frame and describe it.
///
/// While Running: integrate the flyer, advance the gate stream, settle
/// scoring, then evaluate terminal conditions before the snapshot is taken,
/// so the terminal frame still shows the position at the moment of impact.
pub fn tick(state: &mut GameState) -> Snapshot {
    if state.mode == GameMode::Running {
        state.flyer.integrate();
        state.gates.advance(SCROLL_DX);

        let flyer_rect = state.flyer.rect();
        let mut collided = false;
        for gate in state.gates.iter_mut() {
            if !gate.passed && flyer_rect.pos.x > gate.trailing_edge() {
                gate.passed = true;
                state.score += 1;
            }
            if overlaps(&flyer_rect, &gate.top) || overlaps(&flyer_rect, &gate.bottom) {
                collided = true;
            }
        }

        if collided {
            state.finish_run(SoundCue::Collision);
        } else if state.flyer.fell_out(&state.playfield) {
            state.finish_run(SoundCue::Fall);
        }

        state.gates.retire_offscreen();
    }

    snapshot(state)
}

fn snapshot(state: &GameState) -> Snapshot {
    let mut obstacles = Vec::with_capacity(state.gates.len() * 2);
    for gate in state.gates.iter() {
        obstacles.push(gate.top);
        obstacles.push(gate.bottom);
    }
    Snapshot {
        flyer: state.flyer.rect(),
        obstacles,
        score: state.score,
        best_score: state.best_score,
        mode: state.mode,
    }
}

/// Spawn one gate at the right edge, its top edge randomized in the band a
/// quarter to three quarters of a column height above the board top.
///
/// Driven by the shell's fixed-interval timer; no-op unless Running.
pub fn spawn_gate(state: &mut GameState) {
    if state.mode != GameMode::Running {
        return;
    }
    let top_y = -GATE_HEIGHT / 4.0 - state.rng_mut().random_range(0.0..GATE_HEIGHT / 2.0);
    let gate = Gate::new(state.playfield.width, top_y, state.playfield.opening());
    log::debug!("gate spawned, top edge at {top_y:.1}");
    state.gates.push(gate);
}
