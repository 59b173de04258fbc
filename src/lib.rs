//! Blockfall - simulation core of a falling-block puzzle game.
//!
//! The engine owns the arena grid, the active/next piece lifecycle,
//! collision and merge rules, rotation with kick search, the timed
//! two-phase line-clear sequence, scoring and the session phase machine.
//! Rendering, input devices, audio and persistence are external
//! collaborators that drive the engine through `GameState` calls and read
//! it back through snapshots and drained events.

pub mod core;
pub mod types;
