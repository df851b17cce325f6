//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::sim::Aabb;

/// Two triangles covering a box
pub fn quad(bounds: &Aabb, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (bounds.left(), bounds.right(), bounds.top(), bounds.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Quads for a whole list of boxes sharing one color
pub fn quads(boxes: &[Aabb], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(boxes.len() * 6);
    for bounds in boxes {
        vertices.extend_from_slice(&quad(bounds, color));
    }
    vertices
}
