use super::*;

fn layer(start: f64, duration: f64, fade_in: f64, fade_out: f64) -> TextLayer {
    TextLayer {
        text: "x".to_string(),
        style: TextStyle {
            font_family: "Inter".to_string(),
            size_px: 24.0,
            color: Rgb8::WHITE,
        },
        wrap_width: None,
        box_height: None,
        align: TextAlign::Center,
        x: HAnchor::Center,
        y: VAnchor::Center,
        start_secs: start,
        duration_secs: duration,
        fade_in_secs: fade_in,
        fade_out_secs: fade_out,
    }
}

#[test]
fn layer_is_hidden_outside_its_window() {
    let l = layer(1.0, 1.0, 0.0, 0.0);
    assert_eq!(l.opacity_at(0.999), None);
    assert_eq!(l.opacity_at(1.0), Some(1.0));
    assert_eq!(l.opacity_at(1.5), Some(1.0));
    assert_eq!(l.opacity_at(2.0), None);
}

#[test]
fn fades_ramp_at_both_edges() {
    let l = layer(0.0, 1.0, 0.2, 0.2);
    assert_eq!(l.opacity_at(0.0), Some(0.0));
    let mid_in = l.opacity_at(0.1).unwrap();
    assert!((mid_in - 0.5).abs() < 1e-6);
    assert_eq!(l.opacity_at(0.5), Some(1.0));
    let mid_out = l.opacity_at(0.9).unwrap();
    assert!((mid_out - 0.5).abs() < 1e-6);
}

#[test]
fn visible_layers_keeps_draw_order() {
    let mut a = layer(0.0, 2.0, 0.0, 0.0);
    a.text = "a".to_string();
    let mut b = layer(0.5, 1.0, 0.0, 0.0);
    b.text = "b".to_string();
    let scene = Scene {
        kind: SceneKind::Question,
        duration_secs: 2.0,
        background: Background::Solid(Rgb8::new(0, 0, 0)),
        layers: vec![a, b],
    };

    let at_0: Vec<&str> = scene.visible_layers(0.1).map(|(l, _)| l.text.as_str()).collect();
    assert_eq!(at_0, vec!["a"]);
    let at_1: Vec<&str> = scene.visible_layers(1.0).map(|(l, _)| l.text.as_str()).collect();
    assert_eq!(at_1, vec!["a", "b"]);
    assert_eq!(scene.layered_duration(), 2.0);
}
