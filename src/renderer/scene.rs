//! CPU-side scene: the browser's `Display`
//!
//! Each drawable is tessellated once when added and only translated after
//! that. `vertices()` flattens the scene in creation order, so newer shapes
//! draw on top.

use std::collections::BTreeMap;

use glam::Vec2;

use super::shapes::fill_outline;
use super::vertex::Vertex;
use crate::platform::{Display, DrawableHandle};
use crate::rgb_to_rgba;
use crate::sim::Outline;

#[derive(Debug, Clone)]
struct Drawable {
    /// Triangle list in local coordinates
    local: Vec<Vertex>,
    position: Vec2,
}

#[derive(Debug, Clone)]
pub struct Scene {
    width: f32,
    height: f32,
    curve_segments: u32,
    drawables: BTreeMap<DrawableHandle, Drawable>,
    next_handle: u32,
}

impl Scene {
    pub fn new(width: f32, height: f32, curve_segments: u32) -> Self {
        Self {
            width,
            height,
            curve_segments,
            drawables: BTreeMap::new(),
            next_handle: 1,
        }
    }

    /// Update the logical canvas size (CSS pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// All drawables as one triangle list in canvas pixels
    pub fn vertices(&self) -> Vec<Vertex> {
        let total = self.drawables.values().map(|d| d.local.len()).sum();
        let mut vertices = Vec::with_capacity(total);
        for drawable in self.drawables.values() {
            vertices.extend(drawable.local.iter().map(|v| v.translated(drawable.position)));
        }
        vertices
    }
}

impl Display for Scene {
    fn add_drawable(&mut self, outline: &Outline, color: u32, position: Vec2) -> DrawableHandle {
        let handle = DrawableHandle(self.next_handle);
        self.next_handle += 1;
        let local = fill_outline(outline, rgb_to_rgba(color, 1.0), self.curve_segments);
        self.drawables.insert(handle, Drawable { local, position });
        handle
    }

    fn move_drawable(&mut self, handle: DrawableHandle, position: Vec2) {
        if let Some(drawable) = self.drawables.get_mut(&handle) {
            drawable.position = position;
        }
    }

    fn remove_drawable(&mut self, handle: DrawableHandle) {
        self.drawables.remove(&handle);
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}
