//! Scoring module - line-clear points and speed progression
//!
//! Points for a clear are quadratic in the number of rows removed at once
//! and linear in the session's difficulty multiplier: clearing four rows is
//! worth sixteen times a single-row clear at the same difficulty. Every
//! clear also shortens the gravity interval by a fixed step down to a floor.

use crate::types::{MIN_DROP_INTERVAL_MS, SPEED_UP_STEP_MS};

/// Points for clearing `rows` rows at once: rows * 10 * multiplier * rows.
pub fn clear_score(rows: u32, multiplier: f64) -> f64 {
    f64::from(rows * 10 * rows) * multiplier
}

/// Gravity interval after a clear: 20 ms faster, floored at 100 ms.
pub fn next_drop_interval(current_ms: u32) -> u32 {
    current_ms
        .saturating_sub(SPEED_UP_STEP_MS)
        .max(MIN_DROP_INTERVAL_MS)
}

/// HUD level derived from the gravity interval: 11 - interval/100.
pub fn display_level(drop_interval_ms: u32) -> u32 {
    11u32.saturating_sub(drop_interval_ms / 100)
}
