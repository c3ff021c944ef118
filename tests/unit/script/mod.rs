use super::*;

fn sample_input() -> ScriptInput {
    ScriptInput {
        exam_name: "IIT JAM".to_string(),
        course_name: "Mathematics".to_string(),
        question_statement: "What is 1/2 + x^2?".to_string(),
        question_type: "MCQ".to_string(),
        options: Some(r#"{"B":"1","A":"0","C":"∞"}"#.to_string()),
        answer: "B".to_string(),
        solution: None,
    }
}

fn speak(text: &str) -> String {
    math_to_speech(text).unwrap()
}

#[test]
fn fractions_use_names_for_common_values() {
    assert_eq!(speak("1/2"), "one-half");
    assert_eq!(speak("1/3 and 2/3"), "one-third and two-thirds");
    assert_eq!(speak("1/4 3/4"), "one-fourth three-fourths");
    assert_eq!(speak("5/7"), "5 by 7");
}

#[test]
fn powers_and_symbols_become_words() {
    assert_eq!(speak("x^2"), "x squared");
    assert_eq!(speak("y^3"), "y cubed");
    assert_eq!(speak("z^5"), "z raised to power 5");
    assert_eq!(speak("a*b=c"), "a times b equals c");
    assert_eq!(speak("x≤y"), "x less than or equal to y");
    assert_eq!(speak("√π"), "square root of pi");
    assert_eq!(speak("a≠b"), "a not equals b");
}

#[test]
fn matrices_need_more_than_one_row() {
    assert_eq!(
        speak("[1,2;3,4]"),
        "a matrix of 2 by 2 with elements 1 and 2 next row 3 and 4"
    );
    assert_eq!(speak("[1,2]"), "[1,2]");
}

#[test]
fn latex_wrappers_are_stripped_and_spaces_collapse() {
    assert_eq!(speak(r"\frac{a}  \text{b}"), "a b");
    assert_eq!(speak("  lots   of\tspace "), "lots of space");
}

#[test]
fn choice_questions_read_options_in_letter_order() {
    let g = ScriptGenerator::new(1).unwrap();
    let text = g.options_text(sample_input().options.as_deref(), "mcq");
    assert_eq!(
        text,
        "The options are: Option A: 0. Option B: 1. Option C: infinity."
    );
}

#[test]
fn options_are_skipped_for_other_question_types_or_bad_json() {
    let g = ScriptGenerator::new(1).unwrap();
    assert_eq!(g.options_text(Some(r#"{"A":"x"}"#), "nat"), "");
    assert_eq!(g.options_text(Some("{broken"), "msq"), "");
    assert_eq!(g.options_text(None, "mcq"), "");
    assert_eq!(g.options_text(Some(r#"{"G":"x"}"#), "mcq"), "");
}

#[test]
fn script_joins_sections_in_order() {
    let script = generate_script(&sample_input(), 2).unwrap();
    assert!(script.starts_with("Hello! Quick question for IIT JAM Mathematics today."));
    assert!(script.contains("The question is: What is one-half + x squared?."));
    assert!(script.contains("5... 4... 3... 2... 1... Done!"));
    assert!(script.ends_with("Check your DMs!"));
    assert!(!script.contains('{'));
}

#[test]
fn unknown_style_falls_back_to_first() {
    let g = ScriptGenerator::new(42).unwrap();
    assert_eq!(g.style().id, DEFAULT_STYLE_ID);
    assert_eq!(style(0).name, "Engaging Teacher Style");
}

#[test]
fn every_style_speaks_the_countdown() {
    for s in &SCRIPT_STYLES {
        assert!(s.timer.contains("5... 4... 3... 2... 1"), "style {}", s.id);
    }
}
