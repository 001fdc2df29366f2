//! Tessellation of shape outlines into triangle lists

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::Outline;

/// Fill an outline as a triangle fan around its origin
///
/// Every outline in the catalogue is star-shaped about its origin, so a fan
/// from the centre covers it exactly. Vertices are in local coordinates.
pub fn fill_outline(outline: &Outline, color: [f32; 4], curve_segments: u32) -> Vec<Vertex> {
    let ring = outline.flatten(curve_segments);
    fan(Vec2::ZERO, &ring, color)
}

/// Triangle fan from `center` over a closed ring
fn fan(center: Vec2, ring: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if ring.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity(ring.len() * 3);

    for (i, &p1) in ring.iter().enumerate() {
        let p2 = ring[(i + 1) % ring.len()];
        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(p1, color));
        vertices.push(Vertex::at(p2, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ShapeKind, build_outline};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    /// Sum of triangle areas in a triangle list
    fn covered_area(vertices: &[Vertex]) -> f32 {
        vertices
            .chunks(3)
            .map(|t| {
                let a = Vec2::from(t[0].position);
                let b = Vec2::from(t[1].position);
                let c = Vec2::from(t[2].position);
                ((b - a).perp_dot(c - a) / 2.0).abs()
            })
            .sum()
    }

    #[test]
    fn test_polygon_triangle_count() {
        let mut rng = Pcg32::seed_from_u64(0);
        for kind in [ShapeKind::Triangle, ShapeKind::Square, ShapeKind::Pentagon, ShapeKind::Hexagon] {
            let outline = build_outline(kind, 30.0, &mut rng);
            let vertices = fill_outline(&outline, RED, 32);
            assert_eq!(vertices.len() as u32, kind.sides().unwrap() * 3);
        }
    }

    #[test]
    fn test_fan_covers_true_polygon_area() {
        let mut rng = Pcg32::seed_from_u64(0);
        let hexagon = build_outline(ShapeKind::Hexagon, 10.0, &mut rng);
        let area = covered_area(&fill_outline(&hexagon, RED, 32));
        // (n/2)·r²·sin(2π/n)
        let expected = 3.0 * 100.0 * (std::f32::consts::TAU / 6.0).sin();
        assert!((area - expected).abs() < 1e-2);
    }

    #[test]
    fn test_circle_quality_changes_detail() {
        let circle = Outline::Circle { radius: 5.0 };
        assert_eq!(fill_outline(&circle, RED, 16).len(), 48);
        assert_eq!(fill_outline(&circle, RED, 64).len(), 192);
    }

    #[test]
    fn test_fill_uses_color() {
        let circle = Outline::Circle { radius: 5.0 };
        assert!(fill_outline(&circle, RED, 16).iter().all(|v| v.color == RED));
    }
}
