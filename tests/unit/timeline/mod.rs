use super::*;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::QuizError;
use crate::scene::{SceneBuilder, SceneKind, TIMER_SCENE_SECS};
use crate::template::TemplateCatalog;

const PORTRAIT: Canvas = Canvas {
    width: 1080,
    height: 1920,
};

fn seg(kind: &str, start: &str, end: &str) -> CaptionSegment {
    CaptionSegment::new(SegmentKind::from(kind.to_string()), start, end, "")
}

fn payload() -> QuestionPayload {
    QuestionPayload::new("What is 2+2?", "4")
        .with_options_json(r#"{"B":"4","A":"3"}"#)
        .with_solution("Add them.")
}

#[test]
fn segments_accept_type_key_and_string_or_number_times() {
    let json = r#"[
        {"type":"question","start":"0.00","end":"5.00","text":"q"},
        {"kind":"timer","start":5,"end":10.0},
        {"type":"outro","start":"10","end":"11"}
    ]"#;
    let segs = parse_captions(json).unwrap();
    assert_eq!(segs[0].kind, SegmentKind::Question);
    assert_eq!(segs[1].kind, SegmentKind::Timer);
    assert_eq!(segs[2].kind, SegmentKind::Other("outro".to_string()));
    assert_eq!(segs[0].span_secs().unwrap(), 5.0);
    assert_eq!(segs[1].span_secs().unwrap(), 5.0);
}

#[test]
fn null_or_missing_kind_is_untyped_and_ignored() {
    let json = r#"[
        {"type":null,"start":"0","end":"1"},
        {"start":"1","end":"2"},
        {"type":"timer","start":"2","end":"7"}
    ]"#;
    let segs = parse_captions(json).unwrap();
    assert_eq!(segs[0].kind, SegmentKind::Untyped);
    assert_eq!(segs[1].kind, SegmentKind::Untyped);
    assert_eq!(segs[2].kind, SegmentKind::Timer);
}

#[test]
fn unparsable_time_is_an_input_error() {
    let err = seg("question", "zero", "5").span_secs().unwrap_err();
    assert!(matches!(err, QuizError::Input(_)));
    let err = seg("answer", "6", "5").span_secs().unwrap_err();
    assert!(matches!(err, QuizError::Input(_)));
}

#[test]
fn options_decode_in_letter_order() {
    let opts = payload().parsed_options().unwrap().unwrap();
    let letters: Vec<&str> = opts.keys().map(String::as_str).collect();
    assert_eq!(letters, vec!["A", "B"]);
}

#[test]
fn empty_or_missing_options_mean_none() {
    let p = QuestionPayload::new("Q", "A");
    assert_eq!(p.parsed_options().unwrap(), None);
    assert_eq!(p.clone().with_options_json("").parsed_options().unwrap(), None);
    assert_eq!(p.with_options_json("{}").parsed_options().unwrap(), None);
}

#[test]
fn malformed_options_are_rejected() {
    let err = QuestionPayload::new("Q", "A")
        .with_options_json("{not json")
        .parsed_options()
        .unwrap_err();
    assert!(matches!(err, QuizError::Serde(_)));

    let err = QuestionPayload::new("Q", "A")
        .with_options_json("[1,2]")
        .parsed_options()
        .unwrap_err();
    assert!(matches!(err, QuizError::Input(_)));
}

#[test]
fn non_string_option_values_are_stringified() {
    let opts = QuestionPayload::new("Q", "A")
        .with_options_json(r#"{"A":3,"B":true}"#)
        .parsed_options()
        .unwrap()
        .unwrap();
    assert_eq!(opts["A"], "3");
    assert_eq!(opts["B"], "true");
}

#[test]
fn payload_reads_from_json() {
    let p = QuestionPayload::from_json_str(
        r#"{"statement":"S","options":"{\"A\":\"x\"}","answer":"A","solution":""}"#,
    )
    .unwrap();
    assert_eq!(p.statement, "S");
    assert_eq!(p.solution(), None);
    assert!(QuestionPayload::from_json_str(r#"{"statement":"S"}"#).is_err());
}

#[test]
fn timed_plan_is_question_timer_answer() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let caps = vec![
        seg("question", "0.00", "5.00"),
        seg("timer", "5.00", "10.00"),
        seg("answer", "10.00", "15.00"),
    ];
    let scenes = plan_scenes(&b, &caps, &payload(), 15.0).unwrap();
    let kinds: Vec<SceneKind> = scenes.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SceneKind::Question, SceneKind::Timer, SceneKind::Answer]
    );
    assert_eq!(scenes[0].duration_secs, 5.0);
    assert_eq!(scenes[1].duration_secs, TIMER_SCENE_SECS);
    assert_eq!(scenes[2].duration_secs, 5.0);
}

#[test]
fn timer_duration_ignores_its_segment_span() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let caps = vec![
        seg("question", "0", "4.5"),
        seg("timer", "4.5", "12.25"),
        seg("answer", "12.25", "20"),
    ];
    let scenes = plan_scenes(&b, &caps, &payload(), 20.0).unwrap();
    assert_eq!(scenes[1].duration_secs, TIMER_SCENE_SECS);
    assert_eq!(scenes[2].duration_secs, 7.75);
}

#[test]
fn no_timer_means_one_question_scene_for_whole_narration() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(2), PORTRAIT).unwrap();
    let caps = vec![
        seg("question", "0", "3"),
        seg("answer", "3", "8"),
        seg("full", "0", "8"),
    ];
    let scenes = plan_scenes(&b, &caps, &payload(), 12.5).unwrap();
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].kind, SceneKind::Question);
    assert_eq!(scenes[0].duration_secs, 12.5);
}

#[test]
fn missing_sections_are_skipped_around_the_timer() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let caps = vec![seg("timer", "0", "5"), seg("answer", "5", "9")];
    let scenes = plan_scenes(&b, &caps, &payload(), 9.0).unwrap();
    let kinds: Vec<SceneKind> = scenes.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SceneKind::Timer, SceneKind::Answer]);
}

#[test]
fn first_segment_of_a_kind_wins() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let caps = vec![
        seg("question", "0", "2"),
        seg("question", "2", "9"),
        seg("timer", "9", "14"),
    ];
    let scenes = plan_scenes(&b, &caps, &payload(), 14.0).unwrap();
    assert_eq!(scenes.len(), 2);
    assert_eq!(scenes[0].duration_secs, 2.0);
}

#[test]
fn malformed_options_only_fail_when_question_is_shown() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let bad = QuestionPayload::new("Q", "A").with_options_json("{oops");
    let caps = vec![seg("timer", "0", "5"), seg("answer", "5", "9")];
    assert!(plan_scenes(&b, &caps, &bad, 9.0).is_ok());

    let caps = vec![seg("question", "0", "3"), seg("timer", "3", "8")];
    assert!(plan_scenes(&b, &caps, &bad, 8.0).is_err());
}

#[test]
fn timeline_duration_and_scene_lookup() {
    let catalog = TemplateCatalog::builtin();
    let b = SceneBuilder::new(catalog.get(1), PORTRAIT).unwrap();
    let caps = vec![
        seg("question", "0", "5"),
        seg("timer", "5", "10"),
        seg("answer", "10", "15"),
    ];
    let scenes = plan_scenes(&b, &caps, &payload(), 15.0).unwrap();
    let tl = Timeline::new(PORTRAIT, Fps::new(30, 1).unwrap(), scenes);

    assert_eq!(tl.duration_secs(), 15.0);
    assert_eq!(tl.frame_count(), 450);

    let (scene, local) = tl.scene_at(7.5).unwrap();
    assert_eq!(scene.kind, SceneKind::Timer);
    assert!((local - 2.5).abs() < 1e-9);

    let (scene, local) = tl.scene_at(10.0).unwrap();
    assert_eq!(scene.kind, SceneKind::Answer);
    assert_eq!(local, 0.0);

    let (scene, local) = tl.scene_at(99.0).unwrap();
    assert_eq!(scene.kind, SceneKind::Answer);
    assert_eq!(local, 5.0);
}

#[test]
fn empty_timeline_has_no_scene() {
    let tl = Timeline::new(PORTRAIT, Fps::new(30, 1).unwrap(), Vec::new());
    assert!(tl.scene_at(0.0).is_none());
    assert_eq!(tl.frame_count(), 0);
}
