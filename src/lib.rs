//! Shape Rain - an interactive falling-shapes toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, spawning, gravity, session state)
//! - `renderer`: WebGPU rendering of the live shapes
//! - `platform`: Display/input contracts between the simulation and its host
//! - `settings`: Persisted configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use platform::{ControlSignal, Display, DrawableHandle, HeadlessDisplay, PointerEvent, PointerTarget};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Circumradius shared by every spawned shape
    pub const SHAPE_SIZE: f32 = 30.0;

    /// Ellipse minor semi-axis as a fraction of its size
    pub const ELLIPSE_RATIO: f32 = 0.6;

    /// Spawn rate controls (shapes per second)
    pub const DEFAULT_SPAWN_RATE: u32 = 1;
    pub const MIN_SPAWN_RATE: u32 = 1;
    /// Highest rate the 1 ms timer resolution can honour
    pub const MAX_SPAWN_RATE: u32 = 1000;

    /// Gravity controls (pixels per frame unit)
    pub const DEFAULT_GRAVITY: f32 = 1.0;
    pub const GRAVITY_STEP: f32 = 0.2;
    pub const MIN_GRAVITY: f32 = 0.2;

    /// Length of one frame unit in milliseconds (host ticks at 60 Hz nominal)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Largest frame delta applied in one tick (avoids a huge jump after a tab stall)
    pub const MAX_FRAME_DELTA: f32 = 6.0;

    /// Canvas background (light sky blue)
    pub const BACKGROUND_COLOR: u32 = 0x96d1e3;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unpack a 24-bit 0xRRGGBB colour into RGBA floats
#[inline]
pub fn rgb_to_rgba(color: u32, alpha: f32) -> [f32; 4] {
    let r = ((color >> 16) & 0xff) as f32 / 255.0;
    let g = ((color >> 8) & 0xff) as f32 / 255.0;
    let b = (color & 0xff) as f32 / 255.0;
    [r, g, b, alpha]
}
