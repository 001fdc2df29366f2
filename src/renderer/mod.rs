//! WebGPU rendering module
//!
//! `Scene` is the simulation's `Display` in the browser: it owns the
//! tessellated shapes. `RenderState` uploads the scene as a triangle list each
//! frame.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::Scene;
pub use vertex::Vertex;
