use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        QuizError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(QuizError::input("x").to_string().contains("input error:"));
    assert!(QuizError::render("x").to_string().contains("render error:"));
    assert!(
        QuizError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = QuizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
