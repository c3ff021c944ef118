use super::*;
use crate::template::TemplateCatalog;

const PORTRAIT: Canvas = Canvas {
    width: 1080,
    height: 1920,
};

fn options(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn question_options_are_sorted_by_letter_and_stacked() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let opts = options(&[("B", "4"), ("A", "3"), ("D", "6"), ("C", "5")]);
    let scene = b.question_scene("What is 2+2?", Some(&opts), 5.0);

    assert_eq!(scene.kind, SceneKind::Question);
    let texts: Vec<&str> = scene.layers.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["What is 2+2?", "A. 3", "B. 4", "C. 5", "D. 6"]);

    let ys: Vec<VAnchor> = scene.layers[1..].iter().map(|l| l.y).collect();
    assert_eq!(
        ys,
        vec![
            VAnchor::Top(800.0),
            VAnchor::Top(940.0),
            VAnchor::Top(1080.0),
            VAnchor::Top(1220.0)
        ]
    );
    assert!(
        scene.layers[1..]
            .iter()
            .all(|l| l.x == HAnchor::Left(100.0) && l.align == TextAlign::Left)
    );
}

#[test]
fn question_without_options_has_only_statement() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let scene = b.question_scene("Define entropy.", None, 12.5);
    assert_eq!(scene.layers.len(), 1);
    assert_eq!(scene.layers[0].wrap_width, Some(920.0));
    assert_eq!(scene.layers[0].box_height, Some(400.0));
    assert_eq!(scene.duration_secs, 12.5);
    assert_eq!(scene.layered_duration(), 12.5);
}

#[test]
fn timer_is_five_digits_one_second_each() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(2), PORTRAIT).unwrap();
    let scene = b.timer_scene(9.0);

    assert_eq!(scene.duration_secs, TIMER_SCENE_SECS);
    assert_eq!(scene.layered_duration(), TIMER_SCENE_SECS);
    let digits: Vec<&str> = scene.layers.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(digits, vec!["5", "4", "3", "2", "1"]);

    for (i, layer) in scene.layers.iter().enumerate() {
        assert_eq!(layer.start_secs, i as f64);
        assert_eq!(layer.duration_secs, 1.0);
        assert_eq!(layer.fade_in_secs, 0.2);
        assert_eq!(layer.fade_out_secs, 0.2);
        assert_eq!((layer.x, layer.y), (HAnchor::Center, VAnchor::Center));
    }
}

#[test]
fn timer_shows_exactly_one_digit_at_a_time() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let scene = b.timer_scene(TIMER_SCENE_SECS);

    for step in 0..50 {
        let t = step as f64 * 0.1 + 0.05;
        let visible: Vec<&str> = scene.visible_layers(t).map(|(l, _)| l.text.as_str()).collect();
        assert_eq!(visible.len(), 1, "t={t}");
    }
    let (digit, opacity) = scene.visible_layers(2.5).next().unwrap();
    assert_eq!(digit.text, "3");
    assert_eq!(opacity, 1.0);
}

#[test]
fn answer_scene_truncates_long_solution_to_200_chars() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(3), PORTRAIT).unwrap();
    let solution = "x".repeat(250);
    let scene = b.answer_scene("B", Some(&solution), 5.0);

    let texts: Vec<&str> = scene.layers.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts[0], "Correct Answer:");
    assert_eq!(texts[1], "B");
    assert_eq!(texts[2], "Solution:");
    assert_eq!(scene.layers[3].text.chars().count(), 200);
    assert_eq!(scene.layers[0].style.color, Rgb8::new(0x34, 0xd3, 0x99));
}

#[test]
fn truncation_counts_characters_not_bytes() {
    let s = "é".repeat(250);
    let cut = truncate_solution(&s);
    assert_eq!(cut.chars().count(), 200);
    assert_eq!(truncate_solution("short"), "short");
}

#[test]
fn empty_solution_adds_no_layers() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    assert_eq!(b.answer_scene("B", Some(""), 5.0).layers.len(), 2);
    assert_eq!(b.answer_scene("B", None, 5.0).layers.len(), 2);
}

#[test]
fn solid_template_uses_secondary_text_color() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(4), PORTRAIT).unwrap();
    let scene = b.question_scene("Q", None, 1.0);
    assert_eq!(scene.layers[0].style.color, Rgb8::new(0x1f, 0x29, 0x37));
    assert_eq!(scene.layers[0].style.font_family, "Inter");
}

#[test]
fn header_fades_in_unless_template_is_subtle() {
    let catalog = TemplateCatalog::builtin();
    let smooth = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let header = smooth.header_layer("IIT JAM", "Mathematics", 10.0).unwrap();
    assert_eq!(header.text, "IIT JAM Mathematics");
    assert_eq!(header.fade_in_secs, 0.5);
    assert_eq!(header.style.color, Rgb8::WHITE);

    let subtle = SceneBuilder::new(catalog.get(4), PORTRAIT).unwrap();
    let header = subtle.header_layer("GATE", "CS", 10.0).unwrap();
    assert_eq!(header.fade_in_secs, 0.0);
    assert_eq!(header.style.color, Rgb8::new(0xf3, 0xf4, 0xf6));
}
