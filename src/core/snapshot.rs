//! Per-frame query snapshot for the render and HUD collaborators.
//!
//! Collaborators have no write access to engine state; once per frame they
//! fill a caller-owned snapshot via `GameState::snapshot_into` and draw
//! from that.

use crate::core::game::ActivePiece;
use crate::core::pieces::Shape;
use crate::types::{Phase, ARENA_HEIGHT, ARENA_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: [[u8; ARENA_WIDTH as usize]; ARENA_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Lowest non-colliding y for the active piece at its current x.
    pub ghost_y: Option<i8>,
    pub next: Option<Shape>,
    pub phase: Phase,
    pub animating: bool,
    /// Displayed countdown value while counting down (0 means "GO").
    pub countdown: Option<u8>,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[0u8; ARENA_WIDTH as usize]; ARENA_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.next = None;
        self.phase = Phase::Menu;
        self.animating = false;
        self.countdown = None;
        self.score = 0;
        self.level = 0;
        self.drop_interval_ms = 0;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            grid: [[0u8; ARENA_WIDTH as usize]; ARENA_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            phase: Phase::Menu,
            animating: false,
            countdown: None,
            score: 0,
            level: 0,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}
