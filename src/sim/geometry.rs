//! Shape catalogue, outlines and area formulas
//!
//! Outlines are built once per shape in local coordinates (origin at the
//! shape's position, y down) and never change afterwards.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::consts::ELLIPSE_RATIO;
use crate::polar_to_cartesian;

/// Fewest jittered points on a blob outline
pub const BLOB_MIN_POINTS: usize = 8;
/// Number of distinct blob point counts (8..=12)
pub const BLOB_POINT_VARIANTS: usize = 5;
/// Blob point radius range, as a fraction of size: [0.8, 1.2)
pub const BLOB_RADIUS_MIN: f32 = 0.8;
pub const BLOB_RADIUS_SPREAD: f32 = 0.4;
/// Blob area is approximated as this fraction of the circle of the same size
pub const BLOB_AREA_FACTOR: f32 = 0.5;

/// Segment count used when flattening curves for hit testing
const HIT_TEST_SEGMENTS: u32 = 32;

/// Closed catalogue of shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Circle,
    Ellipse,
    /// Irregular blob
    Random,
}

impl ShapeKind {
    /// Every kind, in spawn-table order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Random,
    ];

    /// Side count for the regular polygons
    pub fn sides(self) -> Option<u32> {
        match self {
            ShapeKind::Triangle => Some(3),
            ShapeKind::Square => Some(4),
            ShapeKind::Pentagon => Some(5),
            ShapeKind::Hexagon => Some(6),
            ShapeKind::Circle | ShapeKind::Ellipse | ShapeKind::Random => None,
        }
    }

    /// Regular polygon kind with `sides` sides, if it is in the catalogue
    pub fn polygon(sides: u32) -> Option<Self> {
        match sides {
            3 => Some(ShapeKind::Triangle),
            4 => Some(ShapeKind::Square),
            5 => Some(ShapeKind::Pentagon),
            6 => Some(ShapeKind::Hexagon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Square => "Square",
            ShapeKind::Pentagon => "Pentagon",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Circle => "Circle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Random => "Random",
        }
    }
}

/// One quadratic curve piece of a blob outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub control: Vec2,
    pub end: Vec2,
}

/// Closed boundary of a shape in local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    /// Closed vertex path; the last vertex repeats the first
    Polygon { vertices: Vec<Vec2> },
    Circle { radius: f32 },
    Ellipse { radius_x: f32, radius_y: f32 },
    /// Quadratic curves starting at `start`; the last segment ends at `start`
    Blob { start: Vec2, segments: Vec<QuadSegment> },
}

/// Build the outline for a shape of `kind` with circumradius `size`
pub fn build_outline<R: Rng>(kind: ShapeKind, size: f32, rng: &mut R) -> Outline {
    match kind {
        ShapeKind::Circle => Outline::Circle { radius: size },
        ShapeKind::Ellipse => Outline::Ellipse {
            radius_x: size,
            radius_y: size * ELLIPSE_RATIO,
        },
        ShapeKind::Random => blob_outline(size, rng),
        ShapeKind::Triangle => regular_polygon(3, size),
        ShapeKind::Square => regular_polygon(4, size),
        ShapeKind::Pentagon => regular_polygon(5, size),
        ShapeKind::Hexagon => regular_polygon(6, size),
    }
}

/// Area of a shape of `kind` with circumradius `size`
///
/// Polygons use `n·s²/(4·tan(π/n))` with `s` = size. Blobs use a fixed
/// `0.5·π·size²` approximation instead of integrating their outline, so totals
/// do not depend on the jitter.
pub fn area_of(kind: ShapeKind, size: f32) -> f32 {
    match kind {
        ShapeKind::Circle => PI * size * size,
        ShapeKind::Ellipse => PI * size * (size * ELLIPSE_RATIO),
        ShapeKind::Random => BLOB_AREA_FACTOR * PI * size * size,
        ShapeKind::Triangle => regular_polygon_area(3, size),
        ShapeKind::Square => regular_polygon_area(4, size),
        ShapeKind::Pentagon => regular_polygon_area(5, size),
        ShapeKind::Hexagon => regular_polygon_area(6, size),
    }
}

fn regular_polygon_area(sides: u32, size: f32) -> f32 {
    let n = sides as f32;
    n * size * size / (4.0 * (PI / n).tan())
}

/// Regular n-gon centred on the origin, first vertex on +x
fn regular_polygon(sides: u32, size: f32) -> Outline {
    let step = TAU / sides as f32;
    let mut vertices: Vec<Vec2> = (0..sides)
        .map(|i| polar_to_cartesian(size, i as f32 * step))
        .collect();
    vertices.push(vertices[0]);
    Outline::Polygon { vertices }
}

/// Jittered ring of 8-12 points smoothed with quadratic curves
///
/// Odd-indexed points are controls and their successors are endpoints. The
/// closing segment always uses the last point as control and returns to the
/// first point.
fn blob_outline<R: Rng>(size: f32, rng: &mut R) -> Outline {
    let count = BLOB_MIN_POINTS + rng.random_range(0..BLOB_POINT_VARIANTS);
    let points: Vec<Vec2> = (0..count)
        .map(|i| {
            let radius = size * (BLOB_RADIUS_MIN + rng.random::<f32>() * BLOB_RADIUS_SPREAD);
            let angle = i as f32 / count as f32 * TAU;
            polar_to_cartesian(radius, angle)
        })
        .collect();

    let mut segments = Vec::with_capacity(count.div_ceil(2));
    let mut i = 1;
    while i + 1 < count {
        segments.push(QuadSegment {
            control: points[i],
            end: points[i + 1],
        });
        i += 2;
    }
    segments.push(QuadSegment {
        control: points[count - 1],
        end: points[0],
    });

    Outline::Blob {
        start: points[0],
        segments,
    }
}

/// Evaluate a quadratic Bézier at `t`
#[inline]
fn quad_point(from: Vec2, control: Vec2, to: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    from * (u * u) + control * (2.0 * u * t) + to * (t * t)
}

impl Outline {
    /// Sample the outline as a closed ring (the first point is not repeated)
    ///
    /// `segments` is the sample count for a full circle; blob curves get a
    /// proportional share each.
    pub fn flatten(&self, segments: u32) -> Vec<Vec2> {
        let segments = segments.max(8);
        match self {
            Outline::Polygon { vertices } => {
                vertices[..vertices.len().saturating_sub(1)].to_vec()
            }
            Outline::Circle { radius } => (0..segments)
                .map(|i| polar_to_cartesian(*radius, i as f32 / segments as f32 * TAU))
                .collect(),
            Outline::Ellipse { radius_x, radius_y } => (0..segments)
                .map(|i| {
                    let theta = i as f32 / segments as f32 * TAU;
                    Vec2::new(radius_x * theta.cos(), radius_y * theta.sin())
                })
                .collect(),
            Outline::Blob { start, segments: curves } => {
                let steps = (segments as usize / curves.len().max(1)).max(2);
                let mut ring = Vec::with_capacity(curves.len() * steps);
                let mut from = *start;
                for curve in curves {
                    ring.push(from);
                    for s in 1..steps {
                        let t = s as f32 / steps as f32;
                        ring.push(quad_point(from, curve.control, curve.end, t));
                    }
                    from = curve.end;
                }
                ring
            }
        }
    }

    /// Whether a point in local coordinates lies inside the outline
    pub fn contains(&self, p: Vec2) -> bool {
        match self {
            Outline::Circle { radius } => p.length_squared() <= radius * radius,
            Outline::Ellipse { radius_x, radius_y } => {
                let q = Vec2::new(p.x / radius_x, p.y / radius_y);
                q.length_squared() <= 1.0
            }
            Outline::Polygon { .. } | Outline::Blob { .. } => {
                p.length_squared() <= self.bounding_radius().powi(2)
                    && point_in_ring(p, &self.flatten(HIT_TEST_SEGMENTS))
            }
        }
    }

    /// Radius of a circle about the origin that encloses the whole outline
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Outline::Polygon { vertices } => {
                vertices.iter().map(|v| v.length()).fold(0.0, f32::max)
            }
            Outline::Circle { radius } => *radius,
            Outline::Ellipse { radius_x, radius_y } => radius_x.max(*radius_y),
            // A quadratic curve stays inside the hull of its control points
            Outline::Blob { start, segments } => segments
                .iter()
                .flat_map(|s| [s.control.length(), s.end.length()])
                .fold(start.length(), f32::max),
        }
    }
}

/// Even-odd point-in-polygon test against a closed ring
pub fn point_in_ring(p: Vec2, ring: &[Vec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
