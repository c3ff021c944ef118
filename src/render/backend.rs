use std::path::{Path, PathBuf};

use crate::foundation::error::QuizResult;
use crate::timeline::Timeline;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the `premultiplied` flag makes that explicit at API
/// boundaries. Quiz frames always sit on an opaque background, so alpha is 255 in practice.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Rasterizes one timeline instant.
pub trait RenderBackend {
    /// Frame at timeline time `t` (seconds).
    fn render_frame(&mut self, timeline: &Timeline, t: f64) -> QuizResult<FrameRGBA>;
}

/// Turns a whole timeline into a video file.
pub trait SceneRenderer {
    /// Encode `timeline` to `out_path` and return the written path.
    fn render(&mut self, timeline: &Timeline, out_path: &Path) -> QuizResult<PathBuf>;
}
