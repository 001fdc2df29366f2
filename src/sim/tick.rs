//! Per-frame simulation step
//!
//! Moves every live shape down by gravity × frame delta and culls the ones
//! that fell past the bottom of the canvas.

use super::state::{SessionState, Stats};
use crate::consts::{FRAME_MS, MAX_FRAME_DELTA};
use crate::platform::Display;

/// Move every shape down by `displacement` and remove those below the canvas
///
/// Iterates newest to oldest so removing index `i` never shifts a shape that
/// has not been visited yet. Returns the number of shapes removed.
pub fn advance<D: Display>(state: &mut SessionState, display: &mut D, displacement: f32) -> usize {
    let bottom = display.height();
    let mut removed = 0;

    for i in (0..state.shapes.len()).rev() {
        let shape = &mut state.shapes[i];
        shape.pos.y += displacement;
        let (handle, pos) = (shape.handle(), shape.pos);

        if pos.y > bottom {
            state.shapes.remove(i);
            display.remove_drawable(handle);
            removed += 1;
        } else {
            display.move_drawable(handle, pos);
        }
    }

    if removed > 0 {
        log::debug!("Culled {} shapes below y={}", removed, bottom);
    }
    removed
}

/// Run one frame: apply gravity, then recompute stats from what is left
///
/// `frame_delta` is in frame units (1.0 is one 60 Hz frame).
pub fn tick<D: Display>(state: &mut SessionState, display: &mut D, frame_delta: f32) -> Stats {
    let displacement = state.gravity() * frame_delta;
    advance(state, display, displacement);
    state.stats()
}

/// Convert elapsed milliseconds into clamped frame units
pub fn frame_delta_from_ms(elapsed_ms: f64) -> f32 {
    if !(elapsed_ms > 0.0) {
        return 0.0;
    }
    ((elapsed_ms / FRAME_MS) as f32).min(MAX_FRAME_DELTA)
}
