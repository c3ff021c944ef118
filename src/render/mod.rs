//! Frame rasterization and the render-to-video pipeline.

/// Frame type and renderer traits.
pub mod backend;
/// `vello_cpu` rasterizer.
pub mod cpu;
/// Frame loop and the ffmpeg-backed scene renderer.
pub mod pipeline;
/// Font lookup and Parley text layout.
pub mod text;

pub use backend::{FrameRGBA, RenderBackend, SceneRenderer};
pub use cpu::CpuRasterizer;
pub use pipeline::{EncodeSettings, FfmpegRenderer, RenderStats, render_to_sink};
pub use text::FontBook;
