//! Game state module - manages the complete game state
//!
//! This module ties together the core components: arena, pieces, RNG,
//! scoring and timers. It owns the active-piece lifecycle (spawn, move,
//! rotate with kick search, soft drop, lock), the two-phase line-clear
//! sequence and the session phase machine, and is advanced by caller-
//! supplied elapsed time via [`GameState::tick`].

use crate::core::pieces::{create_piece, Shape};
use crate::core::scoring::{clear_score, display_level, next_drop_interval};
use crate::core::timer::DelayTimer;
use crate::core::{Arena, PieceGenerator};
use crate::types::{
    Difficulty, GameEvent, Phase, RotationDir, ARENA_WIDTH, CLEAR_FLASH_MS, COUNTDOWN_START,
    COUNTDOWN_STEP_MS,
};

/// Active falling piece: its own rotated matrix copy plus the arena offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    arena: Arena,
    active: Option<ActivePiece>,
    /// Queued shape shown to the player; becomes active at the next spawn.
    next: Option<Shape>,
    generator: PieceGenerator,
    phase: Phase,
    /// Clear-flash sub-state nested inside `Running`; gates gravity and
    /// player input but not redraw queries.
    animating: bool,
    difficulty: Difficulty,
    /// Accumulated score; fractional because of the x1.5 medium multiplier.
    /// Exposed floored via [`GameState::score`].
    score: f64,
    drop_interval_ms: u32,
    drop_counter_ms: u32,
    countdown_step: u8,
    /// Whether the current countdown performs the first spawn on GO.
    countdown_spawns: bool,
    countdown_timer: DelayTimer,
    flash_timer: DelayTimer,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new engine in the menu phase with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            arena: Arena::new(),
            active: None,
            next: None,
            generator: PieceGenerator::new(seed),
            phase: Phase::Menu,
            animating: false,
            difficulty: Difficulty::Medium,
            score: 0.0,
            drop_interval_ms: Difficulty::Medium.drop_interval_ms(),
            drop_counter_ms: 0,
            countdown_step: 0,
            countdown_spawns: false,
            countdown_timer: DelayTimer::idle(),
            flash_timer: DelayTimer::idle(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn animating(&self) -> bool {
        self.animating
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Current score, floored to an integer for display.
    pub fn score(&self) -> u32 {
        self.score as u32
    }

    /// HUD level value derived from the current gravity interval.
    pub fn level(&self) -> u32 {
        display_level(self.drop_interval_ms)
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Countdown value currently displayed (3..=1, 0 for GO), if counting.
    pub fn countdown(&self) -> Option<u8> {
        (self.phase == Phase::Countdown).then_some(self.countdown_step)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// The queued next piece's matrix, once the first spawn has drawn it.
    pub fn next_shape(&self) -> Option<Shape> {
        self.next
    }

    /// True while player move/rotate/drop calls are honoured.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Running && !self.animating
    }

    /// Lowest non-colliding y for the active piece at its current x.
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.active?;
        let mut y = piece.y;
        while !self.arena.collide(&piece.shape, piece.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Take the events emitted since the last call. Each event is returned
    /// exactly once.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- session control ---

    /// Reset arena, score and speed for the chosen difficulty and start a
    /// countdown that spawns the first piece on GO.
    pub fn start_new_game(&mut self, difficulty: Difficulty) {
        self.flash_timer.cancel();
        self.arena.clear_all();
        self.active = None;
        self.next = None;
        self.difficulty = difficulty;
        self.score = 0.0;
        self.drop_interval_ms = difficulty.drop_interval_ms();
        self.drop_counter_ms = 0;
        self.animating = false;
        self.start_countdown(true);
    }

    /// Restart at the current difficulty.
    pub fn restart(&mut self) {
        self.start_new_game(self.difficulty);
    }

    /// Freeze the simulation. Honoured only while running and not mid-flash.
    pub fn pause(&mut self) {
        if self.phase == Phase::Running && !self.animating {
            self.phase = Phase::Paused;
        }
    }

    /// Leave pause via a fresh countdown; the active piece is kept.
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.start_countdown(false);
        }
    }

    /// Tear down to the menu. Cancels any pending countdown or flash so no
    /// stale deadline can fire against the next session.
    pub fn return_to_menu(&mut self) {
        self.countdown_timer.cancel();
        self.flash_timer.cancel();
        self.arena.clear_all();
        self.active = None;
        self.next = None;
        self.score = 0.0;
        self.drop_counter_ms = 0;
        self.animating = false;
        self.phase = Phase::Menu;
    }

    // --- player input ---

    /// Shift the active piece horizontally; rolled back if it would collide.
    pub fn move_active(&mut self, dx: i8) {
        if !self.accepts_input() {
            return;
        }
        let Some(mut piece) = self.active else {
            return;
        };
        piece.x += dx;
        if !self.arena.collide(&piece.shape, piece.x, piece.y) {
            self.active = Some(piece);
        }
    }

    /// Rotate the active piece with the alternating kick search.
    ///
    /// The rotated matrix is tried at the current x, then shifted by the
    /// offsets +1, -2, +3, -4, ... with collision re-tested after each
    /// shift. Offsets are applied while their magnitude stays within the
    /// matrix side length; once the next offset would exceed it, the
    /// rotation is a no-op.
    pub fn rotate_active(&mut self, dir: RotationDir) {
        if !self.accepts_input() {
            return;
        }
        let Some(piece) = self.active else {
            return;
        };
        let rotated = piece.shape.rotated(dir);
        let mut x = piece.x;
        let mut offset: i8 = 1;
        while self.arena.collide(&rotated, x, piece.y) {
            if offset.unsigned_abs() > piece.shape.side() {
                return;
            }
            x += offset;
            offset = -(offset + if offset > 0 { 1 } else { -1 });
        }
        self.active = Some(ActivePiece { shape: rotated, x, ..piece });
    }

    /// Advance the active piece one row; on contact it locks, the next piece
    /// spawns and the row sweep runs. Resets the gravity accumulator either
    /// way.
    pub fn soft_drop(&mut self) {
        if !self.accepts_input() {
            return;
        }
        self.drop_step();
    }

    // --- clock ---

    /// Advance the engine by elapsed real time.
    ///
    /// Gravity accumulates only while running and not animating; the
    /// accumulator resets on every drop, so at most one lock attempt happens
    /// per exceeded threshold. Countdown steps and the flash-to-collapse
    /// delay are driven from here as well.
    pub fn tick(&mut self, elapsed_ms: u32) {
        match self.phase {
            Phase::Menu | Phase::Paused | Phase::GameOver => {}
            Phase::Countdown => {
                if self.countdown_timer.advance(elapsed_ms) {
                    self.countdown_tick();
                }
            }
            Phase::Running => {
                if self.animating {
                    if self.flash_timer.advance(elapsed_ms) {
                        self.finish_clear();
                    }
                } else {
                    self.drop_counter_ms += elapsed_ms;
                    if self.drop_counter_ms > self.drop_interval_ms {
                        self.drop_step();
                    }
                }
            }
        }
    }

    // --- internals ---

    fn start_countdown(&mut self, spawns: bool) {
        self.countdown_timer.cancel();
        self.phase = Phase::Countdown;
        self.countdown_step = COUNTDOWN_START;
        self.countdown_spawns = spawns;
        self.countdown_timer.arm(COUNTDOWN_STEP_MS);
        self.events.push(GameEvent::CountdownTick {
            count: self.countdown_step,
        });
    }

    fn countdown_tick(&mut self) {
        if self.countdown_step > 1 {
            self.countdown_step -= 1;
            self.events.push(GameEvent::CountdownTick {
                count: self.countdown_step,
            });
            self.countdown_timer.arm(COUNTDOWN_STEP_MS);
        } else if self.countdown_step == 1 {
            // GO: the first spawn of a new game happens on this step.
            self.countdown_step = 0;
            self.events.push(GameEvent::CountdownTick { count: 0 });
            if self.countdown_spawns {
                self.spawn();
            }
            if self.phase == Phase::Countdown {
                self.countdown_timer.arm(COUNTDOWN_STEP_MS);
            }
        } else {
            // The accumulator is not reset here: a new game zeroed it in
            // start_new_game, and a resume keeps its frozen partial value.
            self.phase = Phase::Running;
        }
    }

    fn drop_step(&mut self) {
        self.drop_counter_ms = 0;
        let Some(mut piece) = self.active else {
            return;
        };
        piece.y += 1;
        if self.arena.collide(&piece.shape, piece.x, piece.y) {
            self.lock_active();
        } else {
            self.active = Some(piece);
        }
    }

    fn lock_active(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        self.arena.merge(&piece.shape, piece.x, piece.y);
        self.spawn();
        if self.phase != Phase::GameOver {
            self.sweep();
        }
    }

    /// Promote the queued shape to active at the spawn position. A blocked
    /// spawn is the game-over condition, not an error.
    fn spawn(&mut self) {
        let shape = match self.next.take() {
            Some(shape) => shape,
            None => create_piece(self.generator.draw()),
        };
        self.next = Some(create_piece(self.generator.draw()));

        let x = ARENA_WIDTH as i8 / 2 - shape.side() as i8 / 2;
        let piece = ActivePiece { shape, x, y: 0 };
        if self.arena.collide(&piece.shape, piece.x, piece.y) {
            self.active = None;
            self.animating = false;
            self.countdown_timer.cancel();
            self.flash_timer.cancel();
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::GameOver {
                final_score: self.score(),
            });
        } else {
            self.active = Some(piece);
        }
    }

    /// Detect full rows after a lock. No rows finishes synchronously with a
    /// lock signal; otherwise the rows are marked and the flash delay is
    /// scheduled.
    fn sweep(&mut self) {
        let rows = self.arena.full_rows();
        if rows.is_empty() {
            self.events.push(GameEvent::Locked);
            return;
        }
        self.arena.mark_rows(&rows);
        self.animating = true;
        self.flash_timer.arm(CLEAR_FLASH_MS);
        self.events.push(GameEvent::ClearStarted {
            rows: rows.len() as u32,
        });
    }

    /// Collapse the marked rows, apply score and speed-up, unblock input.
    fn finish_clear(&mut self) {
        let removed = self.arena.collapse_marked() as u32;
        if removed > 0 {
            self.score += clear_score(removed, self.difficulty.score_multiplier());
            self.drop_interval_ms = next_drop_interval(self.drop_interval_ms);
        }
        self.animating = false;
        self.events.push(GameEvent::ClearFinished { rows: removed });
    }

    /// Fill a caller-owned snapshot with everything the render and HUD
    /// collaborators consume per frame.
    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        use crate::core::snapshot::ActiveSnapshot;

        self.arena.write_grid(&mut out.grid);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.phase = self.phase;
        out.animating = self.animating;
        out.countdown = self.countdown();
        out.score = self.score();
        out.level = self.level();
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
