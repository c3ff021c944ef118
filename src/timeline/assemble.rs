use std::path::PathBuf;

use crate::foundation::core::{Canvas, FrameIndex, Fps};
use crate::foundation::error::{QuizError, QuizResult};
use crate::scene::{Scene, SceneBuilder, SceneKind, TextLayer, TIMER_SCENE_SECS};
use crate::timeline::payload::QuestionPayload;
use crate::timeline::segment::{CaptionSegment, SegmentKind};

/// Narration audio attached to a timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NarrationRef {
    /// Audio file; empty when only the duration is known.
    pub path: PathBuf,
    /// Narration length in seconds.
    pub duration_secs: f64,
}

/// Scenes laid end to end, plus whole-video overlays and the narration track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    /// Output canvas.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Scenes in play order.
    pub scenes: Vec<Scene>,
    /// Drawn above every scene; times are on the timeline clock.
    #[serde(default)]
    pub overlays: Vec<TextLayer>,
    /// Single audio track, if any.
    #[serde(default)]
    pub narration: Option<NarrationRef>,
}

impl Timeline {
    /// Timeline without overlays or narration.
    pub fn new(canvas: Canvas, fps: Fps, scenes: Vec<Scene>) -> Self {
        Self {
            canvas,
            fps,
            scenes,
            overlays: Vec::new(),
            narration: None,
        }
    }

    /// Attach the narration track.
    pub fn with_narration(mut self, narration: NarrationRef) -> Self {
        self.narration = Some(narration);
        self
    }

    /// Add an overlay layer above every scene.
    pub fn with_overlay(mut self, layer: TextLayer) -> Self {
        self.overlays.push(layer);
        self
    }

    /// Sum of scene durations. Narration length does not extend the video.
    pub fn duration_secs(&self) -> f64 {
        self.scenes.iter().map(|s| s.duration_secs).sum()
    }

    /// Frames needed to cover [`Self::duration_secs`].
    pub fn frame_count(&self) -> u64 {
        self.fps.secs_to_frames_round(self.duration_secs())
    }

    /// Timeline time at which frame `idx` is sampled.
    pub fn frame_secs(&self, idx: FrameIndex) -> f64 {
        self.fps.frame_to_secs(idx)
    }

    /// Scene on screen at timeline time `t`, with `t` converted to that scene's clock.
    ///
    /// Frames that round past the final scene boundary sample the last scene at its end.
    pub fn scene_at(&self, t: f64) -> Option<(&Scene, f64)> {
        let mut offset = 0.0;
        for scene in &self.scenes {
            let end = offset + scene.duration_secs;
            if t < end {
                return Some((scene, (t - offset).max(0.0)));
            }
            offset = end;
        }
        let last = self.scenes.last()?;
        Some((last, (t - (offset - last.duration_secs)).min(last.duration_secs)))
    }

    /// Scene kinds in play order.
    pub fn kinds(&self) -> Vec<SceneKind> {
        self.scenes.iter().map(|s| s.kind).collect()
    }
}

/// Decide the scene sequence from caption segments.
///
/// With a `timer` segment present, the video is question → timer → answer, each included only
/// when its segment exists; question and answer last as long as their segments and the timer
/// always lasts [`TIMER_SCENE_SECS`]. Without a timer, the whole narration plays over a single
/// question scene.
#[tracing::instrument(skip_all, fields(segments = captions.len()))]
pub fn plan_scenes(
    builder: &SceneBuilder<'_>,
    captions: &[CaptionSegment],
    payload: &QuestionPayload,
    audio_duration_secs: f64,
) -> QuizResult<Vec<Scene>> {
    let first = |kind: SegmentKind| captions.iter().find(|c| c.kind == kind);
    let timer = first(SegmentKind::Timer);

    let Some(timer) = timer else {
        if !audio_duration_secs.is_finite() || audio_duration_secs < 0.0 {
            return Err(QuizError::input(format!(
                "narration duration must be non-negative, got {audio_duration_secs}"
            )));
        }
        let options = payload.parsed_options()?;
        tracing::debug!(audio_duration_secs, "no timer segment, single question scene");
        return Ok(vec![builder.question_scene(
            &payload.statement,
            options.as_ref(),
            audio_duration_secs,
        )]);
    };

    let mut scenes = Vec::with_capacity(3);
    if let Some(question) = first(SegmentKind::Question) {
        let options = payload.parsed_options()?;
        scenes.push(builder.question_scene(
            &payload.statement,
            options.as_ref(),
            question.span_secs()?,
        ));
    }

    scenes.push(builder.timer_scene(timer.span_secs().unwrap_or(TIMER_SCENE_SECS)));

    if let Some(answer) = first(SegmentKind::Answer) {
        scenes.push(builder.answer_scene(
            &payload.answer,
            payload.solution(),
            answer.span_secs()?,
        ));
    }

    tracing::debug!(scenes = scenes.len(), "planned timed scenes");
    Ok(scenes)
}
