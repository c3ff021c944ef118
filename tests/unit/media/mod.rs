use super::*;

fn stereo(frames: usize, sample_rate: u32) -> AudioPcm {
    AudioPcm {
        sample_rate,
        channels: 2,
        interleaved_f32: vec![0.5; frames * 2],
    }
}

#[test]
fn duration_counts_frames_not_samples() {
    assert_eq!(stereo(48_000 * 3, 48_000).duration_secs(), 3.0);
    assert_eq!(stereo(0, 48_000).duration_secs(), 0.0);
}

#[test]
fn fit_pads_short_narration_with_silence() {
    let fps = Fps::new(30, 1).unwrap();
    let mut pcm = stereo(48_000, 48_000);
    pcm.fit_to_video(60, fps);
    assert_eq!(pcm.frames(), 96_000);
    assert_eq!(pcm.interleaved_f32[0], 0.5);
    assert_eq!(*pcm.interleaved_f32.last().unwrap(), 0.0);
}

#[test]
fn fit_cuts_long_narration() {
    let fps = Fps::new(30, 1).unwrap();
    let mut pcm = stereo(48_000 * 4, 48_000);
    pcm.fit_to_video(30, fps);
    assert_eq!(pcm.duration_secs(), 1.0);
}

#[test]
fn frame_to_sample_handles_rational_fps() {
    let ntsc = Fps::new(30_000, 1001).unwrap();
    assert_eq!(video_frame_to_sample(0, ntsc, 48_000), 0);
    assert_eq!(video_frame_to_sample(30_000, ntsc, 48_000), 48_048_000);
}

#[test]
fn pcm_file_round_trips_bytes() {
    let path = temp_pcm_path();
    let guard = TempFileGuard(Some(path.clone()));
    write_pcm_f32le(&[0.25, -1.0], &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(pcm_from_f32le(&bytes).unwrap(), vec![0.25, -1.0]);
    drop(guard);
    assert!(!path.exists());
}

#[test]
fn misaligned_pcm_is_rejected() {
    assert!(pcm_from_f32le(&[0, 0, 0]).is_err());
}

#[test]
fn missing_narration_is_an_input_error() {
    let err = NarrationTrack::load(Path::new("/nonexistent/quizreel.mp3"), MIX_SAMPLE_RATE)
        .unwrap_err();
    assert!(matches!(err, QuizError::Input(_)));
}
