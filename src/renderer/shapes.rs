//! Shape generation for 2D primitives

use super::Scene;
use super::palette;
use super::vertex::{Vertex, linear_rgba};
use crate::sim::Rect;

/// Generate vertices for a filled axis-aligned rectangle (two triangles)
///
/// Coordinates stay in field units; the pipeline maps them to clip space.
pub fn rect(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let x0 = rect.left() as f32;
    let y0 = rect.top() as f32;
    let x1 = rect.right() as f32;
    let y1 = rect.bottom() as f32;

    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Vertices produced by [`scene`]: two rectangles of two triangles each
pub const SCENE_VERTEX_COUNT: usize = 12;

/// All vertices for a scene, target first so the paddle draws on top
pub fn scene(scene: &Scene) -> Vec<Vertex> {
    let mut vertices = rect(&scene.target, linear_rgba(palette::TARGET));
    vertices.extend(rect(&scene.paddle, linear_rgba(palette::PADDLE)));
    vertices
}
