use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::foundation::error::QuizResult;
use crate::media::NarrationTrack;
use crate::render::{CpuRasterizer, FfmpegRenderer, SceneRenderer};
use crate::scene::SceneBuilder;
use crate::template::{Template, TemplateCatalog};
use crate::timeline::{CaptionSegment, NarrationRef, QuestionPayload, Timeline, plan_scenes};

/// Optional output features.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOpts {
    /// Overlay the "`<exam> <course>`" header on every frame.
    pub with_header: bool,
}

/// Renders quiz videos in one template.
///
/// The template is chosen once at construction; unknown ids fall back to the catalog default.
#[derive(Clone, Debug)]
pub struct QuizRenderer<'c> {
    template: &'c Template,
    config: RenderConfig,
    opts: RenderOpts,
}

impl<'c> QuizRenderer<'c> {
    /// Renderer for template `template_id` after validating `config`.
    pub fn new(
        catalog: &'c TemplateCatalog,
        template_id: u32,
        config: RenderConfig,
    ) -> QuizResult<Self> {
        config.validate()?;
        let template = catalog.get(template_id);
        if template.id != template_id {
            tracing::debug!(
                requested = template_id,
                using = template.id,
                "unknown template id, using default"
            );
        }
        Ok(Self {
            template,
            config,
            opts: RenderOpts::default(),
        })
    }

    /// Replace the output options.
    pub fn with_opts(mut self, opts: RenderOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Template every scene is styled with.
    pub fn template(&self) -> &'c Template {
        self.template
    }

    /// Active render config.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the timeline for a narration of known duration without touching fonts or ffmpeg.
    pub fn plan(
        &self,
        captions: &[CaptionSegment],
        payload: &QuestionPayload,
        narration: NarrationRef,
        exam_name: &str,
        course_name: &str,
    ) -> QuizResult<Timeline> {
        let builder = SceneBuilder::new(self.template, self.config.canvas())?;
        let scenes = plan_scenes(&builder, captions, payload, narration.duration_secs)?;
        let mut timeline =
            Timeline::new(self.config.canvas(), self.config.fps()?, scenes).with_narration(narration);

        if self.opts.with_header {
            let header = builder.header_layer(exam_name, course_name, timeline.duration_secs())?;
            timeline = timeline.with_overlay(header);
        }
        Ok(timeline)
    }

    /// Decode the narration and plan against its real duration.
    pub fn plan_with_audio(
        &self,
        audio_path: &Path,
        captions: &[CaptionSegment],
        payload: &QuestionPayload,
        exam_name: &str,
        course_name: &str,
    ) -> QuizResult<(Timeline, NarrationTrack)> {
        let track = NarrationTrack::load(audio_path, self.config.sample_rate)?;
        let narration = NarrationRef {
            path: audio_path.to_path_buf(),
            duration_secs: track.duration_secs(),
        };
        let timeline = self.plan(captions, payload, narration, exam_name, course_name)?;
        Ok((timeline, track))
    }

    /// CPU rasterizer for this renderer's canvas and fonts.
    pub fn rasterizer(&self) -> QuizResult<CpuRasterizer> {
        CpuRasterizer::new(self.config.canvas(), self.config.font_book())
    }

    /// Render the full quiz video to `out_path` and return that path.
    #[tracing::instrument(skip_all, fields(template = self.template.id, out = %out_path.display()))]
    pub fn render_video(
        &self,
        out_path: &Path,
        audio_path: &Path,
        captions: &[CaptionSegment],
        payload: &QuestionPayload,
        exam_name: &str,
        course_name: &str,
    ) -> QuizResult<PathBuf> {
        let (timeline, track) =
            self.plan_with_audio(audio_path, captions, payload, exam_name, course_name)?;
        tracing::info!(
            scenes = timeline.scenes.len(),
            duration_secs = timeline.duration_secs(),
            "rendering quiz video"
        );

        let mut renderer = FfmpegRenderer::new(self.rasterizer()?, self.config.encode_settings())
            .with_decoded_narration(track);
        renderer.render(&timeline, out_path)
    }
}
