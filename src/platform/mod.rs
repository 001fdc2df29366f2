//! Platform abstraction layer
//!
//! The simulation never touches the browser directly. It talks to:
//! - a `Display` that owns drawables and knows the canvas size
//! - pointer presses, already classified as hitting a shape or empty canvas
//! - discrete control-panel signals
//!
//! `HeadlessDisplay` implements `Display` without a GPU, for tests and the
//! native binary.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::sim::{Outline, ShapeId};

/// Opaque handle to something registered with a `Display`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawableHandle(pub u32);

/// Rendering surface the simulation draws into
pub trait Display {
    /// Register a filled outline at `position` and return its handle
    fn add_drawable(&mut self, outline: &Outline, color: u32, position: Vec2) -> DrawableHandle;

    /// Move an existing drawable. Unknown handles are ignored.
    fn move_drawable(&mut self, handle: DrawableHandle, position: Vec2);

    /// Remove a drawable. Unknown handles are ignored.
    fn remove_drawable(&mut self, handle: DrawableHandle);

    /// Canvas width in pixels
    fn width(&self) -> f32;

    /// Canvas height in pixels (y grows downward)
    fn height(&self) -> f32;
}

/// What a pointer press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Empty canvas
    Canvas,
    /// A live shape
    Shape(ShapeId),
}

/// A pointer press in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pos: Vec2,
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, target: PointerTarget) -> Self {
        Self {
            pos: Vec2::new(x, y),
            target,
        }
    }

    pub fn target_is_shape(&self) -> bool {
        matches!(self.target, PointerTarget::Shape(_))
    }
}

/// Control panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    IncreaseRate,
    DecreaseRate,
    IncreaseGravity,
    DecreaseGravity,
}

impl ControlSignal {
    /// DOM id of the button that emits this signal
    pub fn element_id(&self) -> &'static str {
        match self {
            ControlSignal::IncreaseRate => "increase-rate",
            ControlSignal::DecreaseRate => "decrease-rate",
            ControlSignal::IncreaseGravity => "increase-gravity",
            ControlSignal::DecreaseGravity => "decrease-gravity",
        }
    }

    pub const ALL: [ControlSignal; 4] = [
        ControlSignal::IncreaseRate,
        ControlSignal::DecreaseRate,
        ControlSignal::IncreaseGravity,
        ControlSignal::DecreaseGravity,
    ];
}

/// A drawable as seen by the headless display
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessDrawable {
    pub position: Vec2,
    pub color: u32,
}

/// In-memory display with a fixed size
#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    width: f32,
    height: f32,
    drawables: BTreeMap<DrawableHandle, HeadlessDrawable>,
    next_handle: u32,
    removals: u32,
}

impl HeadlessDisplay {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            drawables: BTreeMap::new(),
            next_handle: 1,
            removals: 0,
        }
    }

    /// Number of drawables currently registered
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn contains(&self, handle: DrawableHandle) -> bool {
        self.drawables.contains_key(&handle)
    }

    pub fn get(&self, handle: DrawableHandle) -> Option<&HeadlessDrawable> {
        self.drawables.get(&handle)
    }

    /// Total number of successful removals so far
    pub fn removals(&self) -> u32 {
        self.removals
    }

    /// Change the canvas size, as the browser host does on window resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
}

impl Display for HeadlessDisplay {
    fn add_drawable(&mut self, _outline: &Outline, color: u32, position: Vec2) -> DrawableHandle {
        let handle = DrawableHandle(self.next_handle);
        self.next_handle += 1;
        self.drawables
            .insert(handle, HeadlessDrawable { position, color });
        handle
    }

    fn move_drawable(&mut self, handle: DrawableHandle, position: Vec2) {
        if let Some(drawable) = self.drawables.get_mut(&handle) {
            drawable.position = position;
        }
    }

    fn remove_drawable(&mut self, handle: DrawableHandle) {
        if self.drawables.remove(&handle).is_some() {
            self.removals += 1;
        }
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_add_move_remove() {
        let mut display = HeadlessDisplay::new(640.0, 480.0);
        let outline = Outline::Circle { radius: 10.0 };

        let a = display.add_drawable(&outline, 0xff0000, Vec2::new(1.0, 2.0));
        let b = display.add_drawable(&outline, 0x00ff00, Vec2::new(3.0, 4.0));
        assert_ne!(a, b);
        assert_eq!(display.len(), 2);

        display.move_drawable(a, Vec2::new(5.0, 6.0));
        assert_eq!(display.get(a).unwrap().position, Vec2::new(5.0, 6.0));

        display.remove_drawable(a);
        display.remove_drawable(a);
        assert_eq!(display.len(), 1);
        assert_eq!(display.removals(), 1);
        assert!(!display.contains(a));
        assert!(display.contains(b));
    }

    #[test]
    fn test_pointer_event_target() {
        let canvas = PointerEvent::new(10.0, 20.0, PointerTarget::Canvas);
        assert!(!canvas.target_is_shape());

        let hit = PointerEvent::new(10.0, 20.0, PointerTarget::Shape(ShapeId(3)));
        assert!(hit.target_is_shape());
    }

    #[test]
    fn test_control_element_ids_unique() {
        let mut ids: Vec<_> = ControlSignal::ALL.iter().map(|s| s.element_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }
}
