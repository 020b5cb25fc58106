//! Game state and core simulation types
//!
//! Everything the run-state machine owns lives here: the flyer, the gate
//! stream, the mode enum, and the event queue the shell drains each frame.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Playfield dimensions plus the proportional metrics derived from them.
///
/// The shell hands the board size in once at startup; every flyer and gate
/// measurement scales from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Flyer size: a tenth of the board wide (clamped), aspect preserved
    pub fn flyer_size(&self) -> Vec2 {
        let w = (self.width / 10.0).clamp(MIN_FLYER_WIDTH, MAX_FLYER_WIDTH);
        let h = w * (self.height * 0.8 / self.width);
        Vec2::new(w, h)
    }

    /// Fixed horizontal position; never changes during a run
    pub fn flyer_x(&self) -> f32 {
        self.width / 8.0
    }

    /// Default vertical position at reset
    pub fn flyer_start_y(&self) -> f32 {
        self.height / 4.0
    }

    /// Vertical opening between a gate's top and bottom halves
    pub fn opening(&self) -> f32 {
        self.height / 2.0
    }

    /// Impulse velocity. The shell passes `reduced` for touch-class devices,
    /// which get the gentler kick.
    pub fn impulse_velocity(&self, reduced: bool) -> f32 {
        if reduced {
            -self.height / 300.0
        } else {
            -self.height / 250.0
        }
    }
}

/// The player-controlled falling entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub pos: Vec2,
    pub size: Vec2,
    pub velocity_y: f32,
}

impl Flyer {
    pub fn new(playfield: &Playfield) -> Self {
        Self {
            pos: Vec2::new(playfield.flyer_x(), playfield.flyer_start_y()),
            size: playfield.flyer_size(),
            velocity_y: 0.0,
        }
    }

    /// One gravity step: accumulate velocity, move, clamp at the ceiling.
    /// The clamp silently absorbs what would otherwise be a ceiling hit.
    pub fn integrate(&mut self) {
        self.velocity_y += GRAVITY;
        self.pos.y = (self.pos.y + self.velocity_y).max(0.0);
    }

    /// Replace (not add to) the vertical velocity
    pub fn apply_impulse(&mut self, velocity: f32) {
        self.velocity_y = velocity;
    }

    /// Fully below the bottom boundary
    pub fn fell_out(&self, playfield: &Playfield) -> bool {
        self.pos.y > playfield.height
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A paired top/bottom obstacle sharing one x position and width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub top: Rect,
    pub bottom: Rect,
    /// Set once the flyer has scored this gate
    pub passed: bool,
}

impl Gate {
    /// Build a gate at `x` whose top column's upper edge sits at `top_y`
    /// (negative: most of the top column hangs above the board).
    pub fn new(x: f32, top_y: f32, opening: f32) -> Self {
        Self {
            top: Rect::new(x, top_y, GATE_WIDTH, GATE_HEIGHT),
            bottom: Rect::new(x, top_y + GATE_HEIGHT + opening, GATE_WIDTH, GATE_HEIGHT),
            passed: false,
        }
    }

    /// Shift both halves horizontally; they always share x
    pub fn advance(&mut self, dx: f32) {
        self.top.pos.x += dx;
        self.bottom.pos.x += dx;
    }

    pub fn x(&self) -> f32 {
        self.top.pos.x
    }

    /// The boundary the flyer must clear to score this gate
    pub fn trailing_edge(&self) -> f32 {
        self.top.right()
    }

    /// Fully left of the board, with a full column width of margin
    pub fn offscreen(&self) -> bool {
        self.x() < -GATE_WIDTH
    }
}

/// FIFO sequence of gates, oldest (leftmost) first.
///
/// Spawn cadence and scroll speed are both constant, so spawn order is
/// retirement order and only the front ever leaves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateStream {
    gates: VecDeque<Gate>,
}

impl GateStream {
    pub fn new() -> Self {
        Self {
            gates: VecDeque::new(),
        }
    }

    pub fn push(&mut self, gate: Gate) {
        self.gates.push_back(gate);
    }

    /// Shift every gate by `dx`
    pub fn advance(&mut self, dx: f32) {
        for gate in &mut self.gates {
            gate.advance(dx);
        }
    }

    /// Drop gates that have scrolled fully off the left edge, front only.
    /// Returns how many were retired.
    pub fn retire_offscreen(&mut self) -> usize {
        let mut retired = 0;
        while self.gates.front().is_some_and(Gate::offscreen) {
            self.gates.pop_front();
            retired += 1;
        }
        retired
    }

    pub fn iter(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Gate> {
        self.gates.iter_mut()
    }

    pub fn front(&self) -> Option<&Gate> {
        self.gates.front()
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn clear(&mut self) {
        self.gates.clear();
    }
}

/// Current mode of the run-state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Before the first run starts
    Idle,
    /// Active gameplay
    Running,
    /// Run suspended; nothing mutates until resumed
    Paused,
    /// Run ended by collision or fall
    Over,
}

/// Sound cues the shell may play; at most one per terminal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// Flyer fell below the board
    Fall,
    /// Flyer hit a gate
    Collision,
}

/// Background presentation requests (the shell runs a looping backdrop video)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackdropCue {
    Resume,
    Suspend,
}

/// Side-effect requests queued by the sim and drained by the shell each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundCue),
    Backdrop(BackdropCue),
    /// Best score improved; carries the new value for persistence
    BestScore(u32),
}

/// Complete simulation state, owned exclusively by the tick/state-machine pair
#[derive(Debug, Clone)]
pub struct GameState {
    pub playfield: Playfield,
    pub mode: GameMode,
    pub flyer: Flyer,
    pub gates: GateStream,
    /// Gates passed this run
    pub score: u32,
    /// Highest score of any run this session; monotonic non-decreasing
    pub best_score: u32,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// `best_score` comes from the persistence collaborator (0 when absent)
    pub fn new(playfield: Playfield, seed: u64, best_score: u32) -> Self {
        Self {
            playfield,
            mode: GameMode::Idle,
            flyer: Flyer::new(&playfield),
            gates: GateStream::new(),
            score: 0,
            best_score,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Start or resume. Coming from Over the run is fully reset first; from
    /// Paused play continues where it stopped; while Running this is a no-op.
    pub fn request_start(&mut self) {
        match self.mode {
            GameMode::Idle | GameMode::Paused => {
                self.mode = GameMode::Running;
                self.events.push(GameEvent::Backdrop(BackdropCue::Resume));
            }
            GameMode::Over => {
                self.reset();
                self.mode = GameMode::Running;
                self.events.push(GameEvent::Backdrop(BackdropCue::Resume));
            }
            GameMode::Running => {}
        }
    }

    /// Suspend an active run; ignored in any other mode
    pub fn request_pause(&mut self) {
        if self.mode == GameMode::Running {
            self.mode = GameMode::Paused;
            self.events.push(GameEvent::Backdrop(BackdropCue::Suspend));
        }
    }

    /// Full reset from any mode, then straight into Running
    pub fn request_restart(&mut self) {
        self.reset();
        self.mode = GameMode::Running;
        self.events.push(GameEvent::Backdrop(BackdropCue::Resume));
        log::info!("run restarted");
    }

    /// Upward kick; accepted only while Running. `reduced` is the shell's
    /// device-class flag.
    pub fn request_impulse(&mut self, reduced: bool) {
        if self.mode == GameMode::Running {
            self.flyer
                .apply_impulse(self.playfield.impulse_velocity(reduced));
        }
    }

    /// Flyer to default position/velocity, gates cleared, score zeroed.
    /// The best score survives; only a better run moves it.
    fn reset(&mut self) {
        self.flyer = Flyer::new(&self.playfield);
        self.gates.clear();
        self.score = 0;
    }

    /// Terminal transition out of Running. Emits exactly one sound cue,
    /// suspends the backdrop, and settles the best score once per run.
    pub(crate) fn finish_run(&mut self, cue: SoundCue) {
        debug_assert_eq!(self.mode, GameMode::Running);
        self.mode = GameMode::Over;
        self.events.push(GameEvent::Sound(cue));
        self.events.push(GameEvent::Backdrop(BackdropCue::Suspend));
        if self.score > self.best_score {
            self.best_score = self.score;
            self.events.push(GameEvent::BestScore(self.best_score));
            log::info!("new best score: {}", self.best_score);
        }
        log::info!("run over ({cue:?}) at score {}", self.score);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take everything queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(750.0, 750.0)
    }

    #[test]
    fn playfield_metrics_follow_reference_ratios() {
        let p = field();
        let size = p.flyer_size();
        assert_eq!(size.x, 75.0);
        assert!((size.y - 60.0).abs() < 1e-3);
        assert_eq!(p.flyer_x(), 93.75);
        assert_eq!(p.flyer_start_y(), 187.5);
        assert_eq!(p.opening(), 375.0);
        assert_eq!(p.impulse_velocity(false), -3.0);
        assert_eq!(p.impulse_velocity(true), -2.5);
    }

    #[test]
    fn flyer_width_clamps_on_extreme_boards() {
        assert_eq!(Playfield::new(100.0, 200.0).flyer_size().x, MIN_FLYER_WIDTH);
        assert_eq!(
            Playfield::new(10_000.0, 800.0).flyer_size().x,
            MAX_FLYER_WIDTH
        );
    }

    #[test]
    fn gate_halves_share_x_and_keep_the_opening() {
        let gate = Gate::new(750.0, -200.0, 375.0);
        assert_eq!(gate.top.pos.x, gate.bottom.pos.x);
        assert_eq!(gate.bottom.pos.y - gate.top.bottom(), 375.0);
        assert!(!gate.passed);
    }

    #[test]
    fn stream_retires_only_from_the_front() {
        let mut stream = GateStream::new();
        stream.push(Gate::new(40.0, -200.0, 300.0));
        stream.push(Gate::new(300.0, -200.0, 300.0));
        assert_eq!(stream.retire_offscreen(), 0);

        // 40 ticks of scroll moves everything 100px left: the first gate ends
        // at -60 (offscreen), the second at 200 (still active)
        for _ in 0..40 {
            stream.advance(SCROLL_DX);
        }
        assert_eq!(stream.retire_offscreen(), 1);
        assert_eq!(stream.len(), 1);
        assert!(stream.front().unwrap().x() > 0.0);
    }

    #[test]
    fn start_pause_resume_transitions() {
        let mut state = GameState::new(field(), 1, 0);
        assert_eq!(state.mode, GameMode::Idle);

        // Pause outside Running is a no-op
        state.request_pause();
        assert_eq!(state.mode, GameMode::Idle);

        state.request_start();
        assert_eq!(state.mode, GameMode::Running);
        state.request_pause();
        assert_eq!(state.mode, GameMode::Paused);
        state.request_start();
        assert_eq!(state.mode, GameMode::Running);
    }

    #[test]
    fn start_after_over_resets_the_run() {
        let mut state = GameState::new(field(), 1, 0);
        state.request_start();
        state.score = 4;
        state.finish_run(SoundCue::Fall);
        assert_eq!(state.mode, GameMode::Over);

        state.request_start();
        assert_eq!(state.mode, GameMode::Running);
        assert_eq!(state.score, 0);
        assert!(state.gates.is_empty());
    }

    #[test]
    fn backdrop_cues_follow_transitions() {
        let mut state = GameState::new(field(), 1, 0);
        state.request_start();
        state.request_pause();
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Backdrop(BackdropCue::Resume),
                GameEvent::Backdrop(BackdropCue::Suspend),
            ]
        );
        // Draining empties the queue
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn impulse_outside_running_is_ignored() {
        let mut state = GameState::new(field(), 1, 0);
        state.request_impulse(false);
        assert_eq!(state.flyer.velocity_y, 0.0);

        state.request_start();
        state.request_impulse(true);
        assert_eq!(state.flyer.velocity_y, -2.5);
        state.request_impulse(false);
        assert_eq!(state.flyer.velocity_y, -3.0);
    }
}
