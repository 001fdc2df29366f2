//! A single falling shape

use glam::Vec2;

use super::geometry::{Outline, ShapeKind, area_of};
use crate::platform::DrawableHandle;

/// Stable identifier, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u32);

/// A live shape entity
///
/// Only `pos` changes after creation; kind, size, colour and outline are
/// fixed, so the area never changes either.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Position of the outline origin in canvas pixels (y grows downward)
    pub pos: Vec2,
    id: ShapeId,
    kind: ShapeKind,
    size: f32,
    color: u32,
    outline: Outline,
    handle: DrawableHandle,
}

impl Shape {
    pub fn new(
        id: ShapeId,
        kind: ShapeKind,
        size: f32,
        color: u32,
        pos: Vec2,
        outline: Outline,
        handle: DrawableHandle,
    ) -> Self {
        Self {
            pos,
            id,
            kind,
            size,
            color,
            outline,
            handle,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// 24-bit 0xRRGGBB
    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Display handle this shape was registered under
    pub fn handle(&self) -> DrawableHandle {
        self.handle
    }

    pub fn area(&self) -> f32 {
        area_of(self.kind, self.size)
    }

    /// Whether a canvas-space point hits this shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.outline.contains(point - self.pos)
    }
}
