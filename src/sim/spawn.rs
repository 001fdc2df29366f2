//! Shape spawning and pointer handling

use glam::Vec2;
use rand::Rng;

use super::geometry::{ShapeKind, build_outline};
use super::shape::Shape;
use super::state::SessionState;
use crate::platform::{Display, PointerEvent, PointerTarget};

/// Largest 24-bit colour
const MAX_COLOR: u32 = 0xff_ffff;

/// Create a shape, register it with the display and add it to the session
///
/// With `at` the shape is placed exactly there (click-to-spawn). Otherwise it
/// gets a random x across the canvas and starts one shape size above the top
/// edge so it falls into view.
pub fn spawn<'a, D: Display>(
    state: &'a mut SessionState,
    display: &mut D,
    at: Option<Vec2>,
) -> &'a Shape {
    let color = state.rng.random_range(0..=MAX_COLOR);
    let kind = ShapeKind::ALL[state.rng.random_range(0..ShapeKind::ALL.len())];
    let size = state.shape_size();
    let pos = match at {
        Some(pos) => pos,
        None => Vec2::new(state.rng.random::<f32>() * display.width(), -size),
    };

    let outline = build_outline(kind, size, &mut state.rng);
    let handle = display.add_drawable(&outline, color, pos);
    let id = state.next_shape_id();
    log::debug!(
        "Spawned {} #{} at ({:.0}, {:.0})",
        kind.as_str(),
        id.0,
        pos.x,
        pos.y
    );

    state
        .shapes
        .push(Shape::new(id, kind, size, color, pos, outline, handle));
    &state.shapes[state.shapes.len() - 1]
}

/// Put the first shape on the canvas without waiting for the spawn timer
pub fn start_session<'a, D: Display>(state: &'a mut SessionState, display: &mut D) -> &'a Shape {
    log::info!("Session started at {}/s, gravity {:.1}", state.spawn_rate(), state.gravity());
    spawn(state, display, None)
}

/// Advance the spawn timer by `elapsed_ms` and spawn once per firing
///
/// Returns the number of shapes spawned.
pub fn pump_spawns<D: Display>(state: &mut SessionState, display: &mut D, elapsed_ms: f64) -> u32 {
    let due = state.spawn_timer.advance(elapsed_ms);
    for _ in 0..due {
        spawn(state, display, None);
    }
    due
}

/// Pointer press: remove the pressed shape, or spawn at the press point
///
/// A press on a shape never also spawns. A press on a shape that is already
/// gone does nothing.
pub fn handle_pointer<D: Display>(state: &mut SessionState, display: &mut D, event: PointerEvent) {
    match event.target {
        PointerTarget::Shape(id) => {
            state.remove_shape(id, display);
        }
        PointerTarget::Canvas => {
            spawn(state, display, Some(event.pos));
        }
    }
}
