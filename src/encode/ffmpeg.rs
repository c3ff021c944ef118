use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{QuizError, QuizResult};
use crate::render::backend::FrameRGBA;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Final MP4 path. Encoding goes to a hidden sibling and is renamed here on success.
    pub out_path: PathBuf,
    /// Replace `out_path` if it already exists.
    pub overwrite: bool,
    /// ffmpeg video encoder name.
    pub video_codec: String,
    /// ffmpeg audio encoder name.
    pub audio_codec: String,
    /// Value passed to ffmpeg's `-threads`.
    pub threads: u32,
}

impl FfmpegSinkOpts {
    /// H.264 + AAC into `out_path` with four encoder threads.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            threads: 4,
        }
    }
}

/// Spawns the system `ffmpeg` and streams raw RGBA frames to its stdin.
///
/// Audio is optional and provided through [`SinkConfig::audio`]. The encoded file only appears
/// at `out_path` after ffmpeg exits successfully; a sink dropped before `end` succeeds kills the
/// child and removes the partial file.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    partial_path: PathBuf,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    scratch: Vec<u8>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create an idle sink; ffmpeg is spawned in `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        let partial_path = partial_path_for(&opts.out_path);
        Self {
            opts,
            partial_path,
            child: None,
            stdin: None,
            stderr_drain: None,
            scratch: Vec::new(),
            cfg: None,
            last_idx: None,
        }
    }

    /// Where frames are written while encoding is in progress.
    pub fn partial_path(&self) -> &Path {
        &self.partial_path
    }

    fn command(&self, cfg: &SinkConfig) -> QuizResult<Command> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.args([
            "-y",
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);

        if let Some(audio) = cfg.audio.as_ref() {
            if audio.sample_rate == 0 {
                return Err(QuizError::validation(
                    "audio sample_rate must be non-zero when audio is enabled",
                ));
            }
            if audio.channels == 0 {
                return Err(QuizError::validation(
                    "audio channels must be non-zero when audio is enabled",
                ));
            }
            cmd.args([
                "-f",
                "f32le",
                "-ar",
                &audio.sample_rate.to_string(),
                "-ac",
                &audio.channels.to_string(),
                "-i",
            ])
            .arg(&audio.path)
            .args(["-map", "0:v:0", "-map", "1:a:0"])
            .args(["-c:a", &self.opts.audio_codec, "-shortest"]);
        } else {
            cmd.arg("-an");
        }

        cmd.args([
            "-c:v",
            &self.opts.video_codec,
            "-pix_fmt",
            "yuv420p",
            "-threads",
            &self.opts.threads.to_string(),
            "-movflags",
            "+faststart",
            "-f",
            "mp4",
        ]);
        cmd.arg(&self.partial_path);
        Ok(cmd)
    }

    fn attach(&mut self, mut child: Child, cfg: SinkConfig) -> QuizResult<()> {
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| QuizError::render("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| QuizError::render("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(partial = %self.partial_path.display(), "ffmpeg started");
        self.scratch = vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4];
        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    // ffmpeg usually closed stdin because it failed; its stderr says why.
    fn abort_with_stderr(&mut self, what: &str) -> QuizError {
        drop(self.stdin.take());
        let status = self.child.take().and_then(|mut child| child.wait().ok());
        let stderr_bytes = self
            .stderr_drain
            .take()
            .and_then(|handle| handle.join().ok())
            .and_then(Result::ok)
            .unwrap_or_default();
        let _ = std::fs::remove_file(&self.partial_path);
        self.cfg = None;

        let stderr = String::from_utf8_lossy(&stderr_bytes);
        let stderr = stderr.trim();
        match status {
            Some(status) if !stderr.is_empty() => QuizError::render(format!(
                "{what}; ffmpeg exited with status {status}: {stderr}"
            )),
            Some(status) => QuizError::render(format!("{what}; ffmpeg exited with status {status}")),
            None => QuizError::render(what.to_string()),
        }
    }

    fn discard(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        let _ = std::fs::remove_file(&self.partial_path);
        self.cfg = None;
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> QuizResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(QuizError::validation("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(QuizError::validation(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
            return Err(QuizError::validation(
                "ffmpeg sink width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.opts.threads == 0 {
            return Err(QuizError::validation("ffmpeg encoder threads must be > 0"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(QuizError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(QuizError::render(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let child = self.command(&cfg)?.spawn().map_err(|e| {
            QuizError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;
        self.attach(child, cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> QuizResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| QuizError::render("ffmpeg sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(QuizError::render(
                "ffmpeg sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(QuizError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != self.scratch.len() {
            return Err(QuizError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        flatten_premul_to_opaque_rgba8(&mut self.scratch, &frame.data)?;

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(QuizError::render("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        if let Err(e) = stdin.write_all(&self.scratch) {
            return Err(self.abort_with_stderr(&format!(
                "failed to write frame to ffmpeg stdin: {e}"
            )));
        }
        Ok(())
    }

    fn end(&mut self) -> QuizResult<()> {
        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| QuizError::render("ffmpeg sink not started"))?;

        let status = child
            .wait()
            .map_err(|e| QuizError::render(format!("failed to wait for ffmpeg to finish: {e}")))?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| QuizError::render("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| QuizError::render(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let _ = std::fs::remove_file(&self.partial_path);
            self.cfg = None;
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(QuizError::render(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        std::fs::rename(&self.partial_path, &self.opts.out_path).map_err(|e| {
            let _ = std::fs::remove_file(&self.partial_path);
            QuizError::render(format!(
                "failed to move encoded video into '{}': {e}",
                self.opts.out_path.display()
            ))
        })?;

        self.cfg = None;
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() || self.cfg.is_some() {
            self.discard();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // rawvideo input rate goes before `-i`.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

/// Hidden sibling used while encoding: `dir/.name.partial.mp4` for `dir/name.mp4`.
pub fn partial_path_for(out_path: &Path) -> PathBuf {
    let stem = out_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = out_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_string());
    out_path.with_file_name(format!(".{stem}.partial.{ext}"))
}

// Composite premultiplied RGBA over black. Opaque pixels pass through unchanged.
fn flatten_premul_to_opaque_rgba8(dst: &mut [u8], src_premul: &[u8]) -> QuizResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(QuizError::validation(
            "flatten_premul_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        d[..3].copy_from_slice(&s[..3]);
        d[3] = 255;
    }

    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> QuizResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
