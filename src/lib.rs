//! quizreel renders short vertical quiz videos: question, countdown, answer reveal.
//!
//! The crate is split into a pure composition layer and a narrow rendering boundary:
//!
//! - Pick a [`Template`] from a [`TemplateCatalog`]
//! - Turn caption segments and a [`QuestionPayload`] into a [`Timeline`] of [`Scene`]s
//! - Hand the timeline to a [`SceneRenderer`] (by default [`FfmpegRenderer`] over
//!   [`CpuRasterizer`]) to get an MP4
//!
//! [`QuizRenderer`] wires these together. Narration scripts and their caption timing can be
//! produced with [`script`] and [`captions`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Script-to-caption timing.
pub mod captions;
/// Render configuration.
pub mod config;
/// Encoding sinks.
pub mod encode;
/// Narration audio decode and PCM handling.
pub mod media;
/// Rasterization and the render pipeline.
pub mod render;
/// High-level quiz renderer.
pub mod renderer;
/// Scene data model and builders.
pub mod scene;
/// Narration script generation.
pub mod script;
/// Built-in visual templates.
pub mod template;
/// Caption segments, question payloads and timeline assembly.
pub mod timeline;

pub use crate::foundation::color::{hex_to_rgb, rgb_to_hex};
pub use crate::foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
pub use crate::foundation::error::{QuizError, QuizResult};

pub use crate::captions::{CaptionTrack, generate_captions};
pub use crate::config::RenderConfig;
pub use crate::encode::{FfmpegSink, FfmpegSinkOpts, FrameSink, InMemorySink, SinkConfig};
pub use crate::render::{
    CpuRasterizer, FfmpegRenderer, FontBook, FrameRGBA, RenderBackend, SceneRenderer,
    render_to_sink,
};
pub use crate::renderer::{QuizRenderer, RenderOpts};
pub use crate::scene::{Background, Scene, SceneBuilder, SceneKind, TextLayer};
pub use crate::script::{ScriptGenerator, ScriptInput, generate_script, math_to_speech};
pub use crate::template::{Template, TemplateCatalog};
pub use crate::timeline::{
    CaptionSegment, NarrationRef, QuestionPayload, SegmentKind, Timeline, parse_captions,
    plan_scenes,
};
