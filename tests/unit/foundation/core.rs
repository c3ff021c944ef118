use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn fps_conversions_roundtrip_whole_seconds() {
    let fps = Fps::new(30, 1).unwrap();
    assert_eq!(fps.secs_to_frames_round(15.0), 450);
    assert!((fps.frame_to_secs(FrameIndex(45)) - 1.5).abs() < 1e-12);
}

#[test]
fn fps_rounds_float_noise_to_nearest_frame() {
    let fps = Fps::new(30, 1).unwrap();
    // 5.1 * 30 = 152.99999999999997 in f64.
    assert_eq!(fps.secs_to_frames_round(5.1), 153);
    assert_eq!(fps.secs_to_frames_round(-1.0), 0);
}

#[test]
fn rgb8_exposes_channels() {
    let c = Rgb8::new(13, 148, 136);
    assert_eq!(c.channels(), (13, 148, 136));
    assert_eq!(c.to_rgba8(), [13, 148, 136, 255]);
}
