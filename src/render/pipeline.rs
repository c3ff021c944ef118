use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{AudioInputConfig, FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{QuizError, QuizResult};
use crate::media::{NarrationTrack, TempFileGuard, temp_pcm_path, write_pcm_f32le};
use crate::render::backend::{RenderBackend, SceneRenderer};
use crate::timeline::Timeline;

/// Summary of a completed render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
}

/// Render every frame of `timeline` in order and stream it into `sink`.
pub fn render_to_sink(
    backend: &mut dyn RenderBackend,
    timeline: &Timeline,
    audio: Option<AudioInputConfig>,
    sink: &mut dyn FrameSink,
) -> QuizResult<RenderStats> {
    let frames_total = timeline.frame_count();
    if frames_total == 0 {
        return Err(QuizError::validation(
            "timeline has no frames to render (zero duration)",
        ));
    }

    sink.begin(SinkConfig {
        width: timeline.canvas.width,
        height: timeline.canvas.height,
        fps: timeline.fps,
        audio,
    })?;
    for f in 0..frames_total {
        let idx = FrameIndex(f);
        let frame = backend.render_frame(timeline, timeline.frame_secs(idx))?;
        sink.push_frame(idx, &frame)?;
    }
    sink.end()?;

    Ok(RenderStats { frames_total })
}

/// Encoder settings shared by every video the renderer writes.
#[derive(Clone, Debug)]
pub struct EncodeSettings {
    /// ffmpeg video encoder name.
    pub video_codec: String,
    /// ffmpeg audio encoder name.
    pub audio_codec: String,
    /// Value passed to ffmpeg's `-threads`.
    pub threads: u32,
    /// Narration decode sample rate in Hz.
    pub sample_rate: u32,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            threads: 4,
            sample_rate: crate::media::MIX_SAMPLE_RATE,
            overwrite: true,
        }
    }
}

/// [`SceneRenderer`] that rasterizes with any backend and encodes MP4 through `ffmpeg`.
///
/// Narration is decoded, padded with silence or cut to the video length, and handed to ffmpeg as
/// a temporary raw PCM file that is removed on every exit path.
pub struct FfmpegRenderer<B> {
    backend: B,
    settings: EncodeSettings,
    narration: Option<NarrationTrack>,
}

impl<B: RenderBackend> FfmpegRenderer<B> {
    /// Renderer that decodes narration on demand.
    pub fn new(backend: B, settings: EncodeSettings) -> Self {
        Self {
            backend,
            settings,
            narration: None,
        }
    }

    /// Reuse an already decoded narration when its source matches the timeline's.
    pub fn with_decoded_narration(mut self, track: NarrationTrack) -> Self {
        self.narration = Some(track);
        self
    }

    fn narration_for(&mut self, timeline: &Timeline) -> QuizResult<Option<NarrationTrack>> {
        let Some(narration) = timeline.narration.as_ref() else {
            return Ok(None);
        };
        match self.narration.take() {
            Some(track) if track.source == narration.path => Ok(Some(track)),
            _ => NarrationTrack::load(&narration.path, self.settings.sample_rate).map(Some),
        }
    }
}

impl<B: RenderBackend> SceneRenderer for FfmpegRenderer<B> {
    #[tracing::instrument(skip_all, fields(out = %out_path.display()))]
    fn render(&mut self, timeline: &Timeline, out_path: &Path) -> QuizResult<PathBuf> {
        let frames_total = timeline.frame_count();

        let mut audio_tmp = TempFileGuard(None);
        let audio = match self.narration_for(timeline)? {
            Some(mut track) => {
                track.pcm.fit_to_video(frames_total, timeline.fps);
                let path = temp_pcm_path();
                audio_tmp.0 = Some(path.clone());
                write_pcm_f32le(&track.pcm.interleaved_f32, &path)?;
                Some(AudioInputConfig {
                    path,
                    sample_rate: track.pcm.sample_rate,
                    channels: track.pcm.channels,
                })
            }
            None => None,
        };

        let mut sink = FfmpegSink::new(FfmpegSinkOpts {
            out_path: out_path.to_path_buf(),
            overwrite: self.settings.overwrite,
            video_codec: self.settings.video_codec.clone(),
            audio_codec: self.settings.audio_codec.clone(),
            threads: self.settings.threads,
        });
        let stats = render_to_sink(&mut self.backend, timeline, audio, &mut sink)?;

        tracing::info!(
            frames = stats.frames_total,
            duration_secs = timeline.duration_secs(),
            "video written"
        );
        Ok(out_path.to_path_buf())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
