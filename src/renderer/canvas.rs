//! CPU rasterizer for pixel-buffer capture

use serde::Serialize;

use super::{Scene, palette};
use crate::sim::Rect;

/// An RGB frame, row-major `height x width x 3`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    /// Frame filled with a single color
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Array shape in `(height, width, channels)` order
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, 3)
    }

    /// Color at column `x`, row `y`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Fill a rectangle, clipped to the frame
    pub fn fill_rect(&mut self, rect: &Rect, color: [u8; 3]) {
        let x0 = rect.left().clamp(0, self.width as i32) as usize;
        let x1 = rect.right().clamp(0, self.width as i32) as usize;
        let y0 = rect.top().clamp(0, self.height as i32) as usize;
        let y1 = rect.bottom().clamp(0, self.height as i32) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let stride = self.width as usize * 3;
        for row in y0..y1 {
            let start = row * stride + x0 * 3;
            let end = row * stride + x1 * 3;
            for px in self.data[start..end].chunks_exact_mut(3) {
                px.copy_from_slice(&color);
            }
        }
    }
}

/// Draw a scene into a fresh frame
pub fn rasterize(scene: &Scene) -> Frame {
    let mut frame = Frame::filled(scene.field_size, scene.field_size, palette::BACKGROUND);
    frame.fill_rect(&scene.target, palette::TARGET);
    frame.fill_rect(&scene.paddle, palette::PADDLE);
    frame
}
