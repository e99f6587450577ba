//! Rendering module
//!
//! The simulation hands the renderer a [`Scene`] (two rectangles in field
//! units). `canvas` rasterizes it on the CPU for pixel-buffer capture;
//! `pipeline` draws it through WebGPU for the interactive window.

pub mod canvas;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use canvas::{Frame, rasterize};
pub use pipeline::RenderState;

use crate::sim::{EpisodeState, Geometry, Rect};

/// Frame colors (sRGB, 8 bits per channel)
pub mod palette {
    pub const BACKGROUND: [u8; 3] = [25, 25, 25];
    pub const PADDLE: [u8; 3] = [255, 255, 255];
    pub const TARGET: [u8; 3] = [255, 0, 0];
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scene {
    /// Canvas side length in pixels (one pixel per field unit)
    pub field_size: u32,
    pub paddle: Rect,
    pub target: Rect,
}

impl Scene {
    pub fn new(geometry: &Geometry, state: &EpisodeState) -> Self {
        Self {
            field_size: geometry.field_size as u32,
            paddle: geometry.agent_rect(state.agent),
            target: geometry.target_rect(state.target),
        }
    }
}
