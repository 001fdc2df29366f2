//! Deterministic simulation module
//!
//! All shape logic lives here. This module must stay free of rendering and
//! browser dependencies:
//! - Seeded RNG only
//! - Stable iteration order (creation order)
//! - Display access only through the `Display` trait

pub mod geometry;
pub mod shape;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod timer;

pub use geometry::{Outline, QuadSegment, ShapeKind, area_of, build_outline};
pub use shape::{Shape, ShapeId};
pub use spawn::{handle_pointer, pump_spawns, spawn, start_session};
pub use state::{SessionState, Stats};
pub use tick::{advance, frame_delta_from_ms, tick};
pub use timer::SpawnTimer;
