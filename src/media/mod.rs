//! Narration audio: decode through the system `ffmpeg`, measure, fit and spill to raw PCM.

use std::path::{Path, PathBuf};

use crate::foundation::core::Fps;
use crate::foundation::error::{QuizError, QuizResult};

/// Sample rate narration is decoded to and muxed at.
pub const MIX_SAMPLE_RATE: u32 = 48_000;

/// Decoded interleaved PCM.
#[derive(Clone, Debug, PartialEq)]
pub struct AudioPcm {
    /// Samples per second per channel.
    pub sample_rate: u32,
    /// Interleaved channel count.
    pub channels: u16,
    /// Samples, channel-interleaved.
    pub interleaved_f32: Vec<f32>,
}

impl AudioPcm {
    /// Number of sample frames (one sample per channel).
    pub fn frames(&self) -> u64 {
        if self.channels == 0 {
            return 0;
        }
        (self.interleaved_f32.len() / usize::from(self.channels)) as u64
    }

    /// Length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames() as f64 / f64::from(self.sample_rate)
    }

    /// Pad with silence or cut so the buffer holds exactly `video_frames` worth of audio.
    pub fn fit_to_video(&mut self, video_frames: u64, fps: Fps) {
        let frames = video_frame_to_sample(video_frames, fps, self.sample_rate);
        let len = frames as usize * usize::from(self.channels);
        self.interleaved_f32.resize(len, 0.0);
    }
}

/// Narration file plus its decoded samples.
#[derive(Clone, Debug)]
pub struct NarrationTrack {
    /// File the samples were decoded from.
    pub source: PathBuf,
    /// Decoded stereo samples.
    pub pcm: AudioPcm,
}

impl NarrationTrack {
    /// Decode `path` at `sample_rate`. A missing file is an input error.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path, sample_rate: u32) -> QuizResult<Self> {
        if !path.is_file() {
            return Err(QuizError::input(format!(
                "narration audio '{}' does not exist",
                path.display()
            )));
        }
        let pcm = decode_audio_f32_stereo(path, sample_rate)?;
        tracing::debug!(duration_secs = pcm.duration_secs(), "narration decoded");
        Ok(Self {
            source: path.to_path_buf(),
            pcm,
        })
    }

    /// Narration length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.pcm.duration_secs()
    }
}

/// Decode any ffmpeg-readable audio to stereo interleaved `f32` PCM.
pub fn decode_audio_f32_stereo(path: &Path, sample_rate: u32) -> QuizResult<AudioPcm> {
    if sample_rate == 0 {
        return Err(QuizError::validation("audio sample_rate must be > 0"));
    }
    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(path)
        .args([
            "-vn",
            "-f",
            "f32le",
            "-acodec",
            "pcm_f32le",
            "-ac",
            "2",
            "-ar",
            &sample_rate.to_string(),
            "pipe:1",
        ])
        .output()
        .map_err(|e| QuizError::input(format!("failed to run ffmpeg for audio decode: {e}")))?;

    if !out.status.success() {
        let msg = String::from_utf8_lossy(&out.stderr);
        return Err(QuizError::input(format!(
            "ffmpeg audio decode failed for '{}': {}",
            path.display(),
            msg.trim()
        )));
    }

    Ok(AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: pcm_from_f32le(&out.stdout)?,
    })
}

fn pcm_from_f32le(bytes: &[u8]) -> QuizResult<Vec<f32>> {
    if !bytes.len().is_multiple_of(4) {
        return Err(QuizError::input(
            "decoded audio byte length is not aligned to f32 samples",
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Write interleaved `f32` PCM samples to a raw little-endian `.f32le` file.
pub fn write_pcm_f32le(samples_interleaved: &[f32], out_path: &Path) -> QuizResult<()> {
    let mut bytes = Vec::<u8>::with_capacity(samples_interleaved.len() * 4);
    for &sample in samples_interleaved {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }
    std::fs::write(out_path, bytes).map_err(|e| {
        QuizError::render(format!(
            "failed to write audio file '{}': {e}",
            out_path.display()
        ))
    })
}

/// Nearest sample index for a video frame count at `sample_rate`.
pub fn video_frame_to_sample(frames: u64, fps: Fps, sample_rate: u32) -> u64 {
    let num = u128::from(frames) * u128::from(sample_rate) * u128::from(fps.den);
    let den = u128::from(fps.num.max(1));
    ((num + (den / 2)) / den) as u64
}

/// Unique path in the system temp dir for intermediate PCM.
pub fn temp_pcm_path() -> PathBuf {
    std::env::temp_dir().join(format!(
        "quizreel_narration_{}_{}.f32le",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ))
}

/// Removes the held file when dropped.
#[derive(Debug, Default)]
pub struct TempFileGuard(pub Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/mod.rs"]
mod tests;
