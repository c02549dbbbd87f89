//! The fixed scene: an orange square on the left, an orange triangle on the right.
//!
//! Positions are in normalized device coordinates with `z = 0`.

use trishade_engine::paint::Color;
use trishade_engine::render::Vertex;

pub const BACKGROUND: Color = Color::white();
pub const FILL: Color = Color::new(1.0, 0.5, 0.0, 1.0);

/// Square as two counter-clockwise triangles.
pub const SQUARE_VERTICES: [Vertex; 6] = [
    Vertex::new(-0.9, -0.5, 0.0), // bottom left
    Vertex::new(-0.1, -0.5, 0.0), // bottom right
    Vertex::new(-0.9, 0.5, 0.0),  // top left
    Vertex::new(-0.9, 0.5, 0.0),  // top left
    Vertex::new(-0.1, -0.5, 0.0), // bottom right
    Vertex::new(-0.1, 0.5, 0.0),  // top right
];

/// Triangle with an obtuse angle at its first vertex.
pub const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex::new(0.3, -0.5, 0.0),
    Vertex::new(0.9, -0.5, 0.0),
    Vertex::new(0.0, 0.5, 0.0),
];

/// Shapes in draw order.
pub fn shapes() -> [(&'static str, &'static [Vertex]); 2] {
    [("square", &SQUARE_VERTICES), ("triangle", &TRIANGLE_VERTICES)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy(v: Vertex) -> (f32, f32) {
        (v.position[0], v.position[1])
    }

    /// Twice the signed area; positive for counter-clockwise winding.
    fn cross(a: Vertex, b: Vertex, c: Vertex) -> f32 {
        let (ax, ay) = xy(a);
        let (bx, by) = xy(b);
        let (cx, cy) = xy(c);
        (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
    }

    #[test]
    fn vertex_counts() {
        assert_eq!(SQUARE_VERTICES.len(), 6);
        assert_eq!(TRIANGLE_VERTICES.len(), 3);
    }

    #[test]
    fn all_positions_inside_ndc_on_z_zero() {
        for (_, verts) in shapes() {
            for v in verts {
                let [x, y, z] = v.position;
                assert!((-1.0..=1.0).contains(&x), "x out of range: {x}");
                assert!((-1.0..=1.0).contains(&y), "y out of range: {y}");
                assert_eq!(z, 0.0);
            }
        }
    }

    #[test]
    fn square_sits_in_left_half() {
        assert!(SQUARE_VERTICES.iter().all(|v| v.position[0] < 0.0));
    }

    #[test]
    fn square_halves_cover_its_bounds() {
        let area: f32 = SQUARE_VERTICES
            .chunks_exact(3)
            .map(|t| cross(t[0], t[1], t[2]) / 2.0)
            .sum();
        assert!((area - 0.8 * 1.0).abs() < 1e-6);
    }

    #[test]
    fn every_triangle_is_counter_clockwise() {
        for (name, verts) in shapes() {
            for t in verts.chunks_exact(3) {
                assert!(cross(t[0], t[1], t[2]) > 0.0, "{name} has a clockwise triangle");
            }
        }
    }

    #[test]
    fn triangle_is_obtuse_at_first_vertex() {
        let [a, b, c] = TRIANGLE_VERTICES;
        let (ax, ay) = xy(a);
        let (bx, by) = xy(b);
        let (cx, cy) = xy(c);
        let dot = (bx - ax) * (cx - ax) + (by - ay) * (cy - ay);
        assert!(dot < 0.0);
    }

    #[test]
    fn shapes_draw_square_first() {
        let names: Vec<_> = shapes().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["square", "triangle"]);
    }

    #[test]
    fn colors() {
        assert_eq!(BACKGROUND.to_array(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(FILL.to_array(), [1.0, 0.5, 0.0, 1.0]);
    }
}
