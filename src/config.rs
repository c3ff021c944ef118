use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{QuizError, QuizResult};
use crate::render::pipeline::EncodeSettings;
use crate::render::text::FontBook;

/// Overrides [`RenderConfig::fonts_dir`] when set.
pub const FONTS_DIR_ENV: &str = "QUIZREEL_FONTS_DIR";

/// Output geometry, encoder knobs and font lookup.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output width in pixels; must be even.
    pub width: u32,
    /// Output height in pixels; must be even.
    pub height: u32,
    /// Whole frames per second.
    pub fps: u32,
    /// Value passed to ffmpeg's `-threads`.
    pub encoder_threads: u32,
    /// ffmpeg video encoder name.
    pub video_codec: String,
    /// ffmpeg audio encoder name.
    pub audio_codec: String,
    /// Narration decode and mux sample rate in Hz.
    pub sample_rate: u32,
    /// Directory searched for template font families.
    pub fonts_dir: PathBuf,
    /// Used when no file in `fonts_dir` matches a template's font family.
    pub fallback_font: Option<PathBuf>,
    /// Replace an existing output file.
    pub overwrite: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            encoder_threads: 4,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            sample_rate: crate::media::MIX_SAMPLE_RATE,
            fonts_dir: PathBuf::from("fonts"),
            fallback_font: None,
            overwrite: true,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> QuizResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| QuizError::serde(format!("render config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> QuizResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            QuizError::input(format!(
                "failed to read render config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// Apply environment overrides.
    pub fn with_env(mut self) -> Self {
        if let Some(dir) = std::env::var_os(FONTS_DIR_ENV).filter(|v| !v.is_empty()) {
            self.fonts_dir = PathBuf::from(dir);
        }
        self
    }

    /// Reject geometry and encoder values ffmpeg cannot use.
    pub fn validate(&self) -> QuizResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(QuizError::validation("width/height must be > 0"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(QuizError::validation(
                "width/height must be even (required for yuv420p output)",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(QuizError::validation("width/height must fit in u16"));
        }
        if self.fps == 0 {
            return Err(QuizError::validation("fps must be > 0"));
        }
        if self.encoder_threads == 0 {
            return Err(QuizError::validation("encoder_threads must be > 0"));
        }
        if self.sample_rate == 0 {
            return Err(QuizError::validation("sample_rate must be > 0"));
        }
        if self.video_codec.trim().is_empty() || self.audio_codec.trim().is_empty() {
            return Err(QuizError::validation("codec names must be non-empty"));
        }
        Ok(())
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Output frame rate.
    pub fn fps(&self) -> QuizResult<Fps> {
        Fps::new(self.fps, 1)
    }

    /// Font lookup over `fonts_dir` and `fallback_font`.
    pub fn font_book(&self) -> FontBook {
        FontBook::new(&self.fonts_dir, self.fallback_font.clone())
    }

    /// Encoder settings for [`crate::render::FfmpegRenderer`].
    pub fn encode_settings(&self) -> EncodeSettings {
        EncodeSettings {
            video_codec: self.video_codec.clone(),
            audio_codec: self.audio_codec.clone(),
            threads: self.encoder_threads,
            sample_rate: self.sample_rate,
            overwrite: self.overwrite,
        }
    }
}
