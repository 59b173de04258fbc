//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, audio, or I/O.

pub mod arena;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

// Re-export commonly used types
pub use arena::Arena;
pub use game::{ActivePiece, GameState};
pub use pieces::{create_piece, Shape};
pub use rng::PieceGenerator;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timer::DelayTimer;
