//! Session state: the live shape set plus the spawn rate and gravity controls

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::shape::{Shape, ShapeId};
use super::timer::{SpawnTimer, period_for_rate};
use crate::consts::*;
use crate::platform::{ControlSignal, Display};
use crate::settings::Settings;

/// Aggregate statistics over the live shapes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    pub count: usize,
    pub total_area: f32,
}

impl Stats {
    /// Total area rounded for display
    pub fn area_label(&self) -> String {
        format!("{:.0}", self.total_area)
    }
}

/// Everything the simulation mutates
///
/// Shapes are kept in creation order. Every shape in the collection is
/// registered with the display; removal always goes through this type so the
/// two stay in step.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Source of all randomness (kinds, colours, positions, blob jitter)
    pub(crate) rng: Pcg32,
    /// Live shapes, oldest first
    pub(crate) shapes: Vec<Shape>,
    /// Periodic spawn trigger
    pub(crate) spawn_timer: SpawnTimer,
    spawn_rate: u32,
    gravity: f32,
    shape_size: f32,
    next_id: u32,
}

impl SessionState {
    /// Create a session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let settings = settings.clone().sanitized();
        Self {
            rng: Pcg32::seed_from_u64(seed),
            shapes: Vec::new(),
            spawn_timer: SpawnTimer::for_rate(settings.spawn_rate),
            spawn_rate: settings.spawn_rate,
            gravity: settings.gravity,
            shape_size: settings.shape_size,
            next_id: 1,
        }
    }

    /// Allocate a new shape ID
    pub(crate) fn next_shape_id(&mut self) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Size used for every spawned shape
    pub fn shape_size(&self) -> f32 {
        self.shape_size
    }

    pub fn spawn_rate(&self) -> u32 {
        self.spawn_rate
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.spawn_timer
    }

    /// Change the spawn rate and restart the spawn timer at the new period
    ///
    /// Rates outside `MIN_SPAWN_RATE..=MAX_SPAWN_RATE` are refused.
    pub fn set_spawn_rate(&mut self, rate: u32) -> bool {
        if !(MIN_SPAWN_RATE..=MAX_SPAWN_RATE).contains(&rate) {
            return false;
        }
        self.spawn_rate = rate;
        self.spawn_timer.reschedule(period_for_rate(rate));
        log::info!("Spawn rate: {}/s", rate);
        true
    }

    /// Set gravity; applies from the next simulation step
    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
        log::info!("Gravity: {:.1}", gravity);
    }

    /// Apply a control-panel button press
    ///
    /// Returns false when the rate would leave `MIN_SPAWN_RATE..=MAX_SPAWN_RATE`
    /// or gravity would drop below its minimum step; nothing changes then.
    pub fn apply_control(&mut self, signal: ControlSignal) -> bool {
        match signal {
            ControlSignal::IncreaseRate => {
                if self.spawn_rate < MAX_SPAWN_RATE {
                    self.set_spawn_rate(self.spawn_rate + 1)
                } else {
                    false
                }
            }
            ControlSignal::DecreaseRate => {
                if self.spawn_rate > MIN_SPAWN_RATE {
                    self.set_spawn_rate(self.spawn_rate - 1)
                } else {
                    false
                }
            }
            ControlSignal::IncreaseGravity => {
                self.set_gravity(self.gravity + GRAVITY_STEP);
                true
            }
            ControlSignal::DecreaseGravity => {
                let lowered = self.gravity - GRAVITY_STEP;
                // Tolerate float drift from repeated steps
                if lowered >= MIN_GRAVITY - 1e-4 {
                    self.set_gravity(lowered.max(MIN_GRAVITY));
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn spawn_rate_label(&self) -> String {
        self.spawn_rate.to_string()
    }

    pub fn gravity_label(&self) -> String {
        format!("{:.1}", self.gravity)
    }

    /// Topmost shape under a canvas point (newest shapes draw on top)
    pub fn shape_at(&self, point: Vec2) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains_point(point))
            .map(Shape::id)
    }

    /// Remove a shape from the session and the display
    ///
    /// Returns `None` if the shape is already gone.
    pub fn remove_shape<D: Display>(&mut self, id: ShapeId, display: &mut D) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| s.id() == id)?;
        let shape = self.shapes.remove(index);
        display.remove_drawable(shape.handle());
        log::debug!("Removed {} #{}", shape.kind().as_str(), id.0);
        Some(shape)
    }

    /// Remove every live shape
    pub fn clear<D: Display>(&mut self, display: &mut D) {
        for shape in self.shapes.drain(..) {
            display.remove_drawable(shape.handle());
        }
    }

    /// Count and total area of the live shapes
    pub fn stats(&self) -> Stats {
        Stats {
            count: self.shapes.len(),
            total_area: self.shapes.iter().map(Shape::area).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessDisplay;
    use crate::sim::spawn;
    use proptest::prelude::*;

    #[test]
    fn test_new_session_defaults() {
        let state = SessionState::new(7);
        assert!(state.is_empty());
        assert_eq!(state.spawn_rate(), 1);
        assert_eq!(state.gravity(), 1.0);
        assert_eq!(state.spawn_timer().period_ms(), 1000.0);
        assert_eq!(state.stats(), Stats::default());
    }

    #[test]
    fn test_rate_controls() {
        let mut state = SessionState::new(7);
        assert!(!state.apply_control(ControlSignal::DecreaseRate));
        assert_eq!(state.spawn_rate(), 1);

        assert!(state.apply_control(ControlSignal::IncreaseRate));
        assert!(state.apply_control(ControlSignal::IncreaseRate));
        assert_eq!(state.spawn_rate(), 3);
        assert!((state.spawn_timer().period_ms() - 1000.0 / 3.0).abs() < 1e-9);
        assert_eq!(state.spawn_rate_label(), "3");

        assert!(state.apply_control(ControlSignal::DecreaseRate));
        assert_eq!(state.spawn_rate(), 2);
        assert!(!state.set_spawn_rate(0));
        assert_eq!(state.spawn_rate(), 2);
    }

    #[test]
    fn test_rate_increase_stops_at_ceiling() {
        let settings = Settings {
            spawn_rate: u32::MAX,
            ..Settings::default()
        };
        let mut state = SessionState::with_settings(7, &settings);
        assert_eq!(state.spawn_rate(), MAX_SPAWN_RATE);

        assert!(!state.apply_control(ControlSignal::IncreaseRate));
        assert_eq!(state.spawn_rate(), MAX_SPAWN_RATE);
        assert!(!state.set_spawn_rate(MAX_SPAWN_RATE + 1));

        assert!(state.apply_control(ControlSignal::DecreaseRate));
        assert_eq!(state.spawn_rate(), MAX_SPAWN_RATE - 1);
    }

    #[test]
    fn test_gravity_controls_floor() {
        let mut state = SessionState::new(7);
        let mut applied = 0;
        while state.apply_control(ControlSignal::DecreaseGravity) {
            applied += 1;
            assert!(applied < 10, "gravity decrease never stopped");
        }
        // 1.0 -> 0.8 -> 0.6 -> 0.4 -> 0.2
        assert_eq!(applied, 4);
        assert_eq!(state.gravity_label(), "0.2");

        assert!(state.apply_control(ControlSignal::IncreaseGravity));
        assert_eq!(state.gravity_label(), "0.4");
    }

    #[test]
    fn test_set_gravity_accepts_any_value() {
        let mut state = SessionState::new(7);
        state.set_gravity(-2.5);
        assert_eq!(state.gravity(), -2.5);
    }

    #[test]
    fn test_remove_shape_idempotent() {
        let mut display = HeadlessDisplay::new(800.0, 600.0);
        let mut state = SessionState::new(11);
        let a = spawn(&mut state, &mut display, None).id();
        let b = spawn(&mut state, &mut display, None).id();

        assert!(state.remove_shape(a, &mut display).is_some());
        assert!(state.remove_shape(a, &mut display).is_none());
        assert_eq!(state.len(), 1);
        assert_eq!(display.len(), 1);
        assert_eq!(display.removals(), 1);
        assert!(state.get(b).is_some());
    }

    #[test]
    fn test_shape_at_prefers_newest() {
        let mut display = HeadlessDisplay::new(800.0, 600.0);
        let mut state = SessionState::new(5);
        let p = Vec2::new(300.0, 300.0);
        let older = spawn(&mut state, &mut display, Some(p)).id();
        let newer = spawn(&mut state, &mut display, Some(p)).id();

        assert_eq!(state.shape_at(p), Some(newer));
        state.remove_shape(newer, &mut display);
        assert_eq!(state.shape_at(p), Some(older));
        assert_eq!(state.shape_at(Vec2::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_stats_sum_areas() {
        let mut display = HeadlessDisplay::new(800.0, 600.0);
        let mut state = SessionState::new(3);
        for _ in 0..20 {
            spawn(&mut state, &mut display, None);
        }
        let expected: f32 = state.shapes().iter().map(Shape::area).sum();
        let stats = state.stats();
        assert_eq!(stats.count, 20);
        assert!((stats.total_area - expected).abs() < 1e-2);

        state.clear(&mut display);
        assert_eq!(state.stats(), Stats::default());
        assert!(display.is_empty());
    }

    #[test]
    fn test_area_label_rounds() {
        let stats = Stats {
            count: 1,
            total_area: 2827.43,
        };
        assert_eq!(stats.area_label(), "2827");
    }

    proptest! {
        #[test]
        fn prop_double_removal_is_noop(seed in any::<u64>(), n in 1usize..20, pick in any::<prop::sample::Index>()) {
            let mut display = HeadlessDisplay::new(800.0, 600.0);
            let mut state = SessionState::new(seed);
            for _ in 0..n {
                spawn(&mut state, &mut display, None);
            }
            let id = state.shapes()[pick.index(n)].id();

            state.remove_shape(id, &mut display);
            let ids_after_first: Vec<_> = state.shapes().iter().map(Shape::id).collect();
            prop_assert!(state.remove_shape(id, &mut display).is_none());
            let ids_after_second: Vec<_> = state.shapes().iter().map(Shape::id).collect();

            prop_assert_eq!(ids_after_first, ids_after_second);
            prop_assert_eq!(display.len(), n - 1);
        }
    }
}
