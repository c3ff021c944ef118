//! Narration scripts for quiz videos.
//!
//! A script is intro, question, spoken countdown, answer reveal and outro joined by single
//! spaces. The countdown sentence is what the caption generator later splits on.

/// Math notation to spoken words.
pub mod speech;
/// The built-in narration styles.
pub mod styles;

pub use speech::{MathSpeech, math_to_speech};
pub use styles::{DEFAULT_STYLE_ID, SCRIPT_STYLES, ScriptStyle, style};

use crate::foundation::error::QuizResult;

const OPTION_LETTERS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Everything a narration script is built from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptInput {
    /// Exam named in the intro and outro.
    pub exam_name: String,
    /// Course named in the intro and outro.
    pub course_name: String,
    /// Question text; math notation is spoken.
    pub question_statement: String,
    /// `mcq` and `msq` questions read their options aloud.
    #[serde(default)]
    pub question_type: String,
    /// JSON-encoded object mapping option letters to option text.
    #[serde(default)]
    pub options: Option<String>,
    /// Correct answer.
    pub answer: String,
    /// Worked solution.
    #[serde(default)]
    pub solution: Option<String>,
}

/// Builds narration scripts in one style.
#[derive(Debug, Clone)]
pub struct ScriptGenerator {
    style: &'static ScriptStyle,
    speech: MathSpeech,
}

impl ScriptGenerator {
    /// Generator for `style_id`; unknown ids use the first style.
    pub fn new(style_id: u32) -> QuizResult<Self> {
        Ok(Self {
            style: style(style_id),
            speech: MathSpeech::new()?,
        })
    }

    /// Style the generator speaks in.
    pub fn style(&self) -> &'static ScriptStyle {
        self.style
    }

    /// Full narration script for `input`.
    pub fn generate(&self, input: &ScriptInput) -> String {
        let question_speech = self.speech.convert(&input.question_statement);
        let options_text = self.options_text(input.options.as_deref(), &input.question_type);

        let parts = [
            fill_names(self.style.intro, input),
            self.style
                .question
                .replacen("{question_statement}", &question_speech, 1)
                .replacen("{options_text}", &options_text, 1),
            self.style.timer.to_string(),
            self.style.answer_reveal.to_string(),
            fill_names(self.style.outro, input),
        ];
        parts.join(" ").trim().to_string()
    }

    /// "The options are: Option A: ... . Option B: ...." for choice questions, else empty.
    ///
    /// Malformed options JSON reads as no options.
    pub fn options_text(&self, options: Option<&str>, question_type: &str) -> String {
        let Some(options) = options.filter(|o| !o.is_empty()) else {
            return String::new();
        };
        let kind = question_type.to_lowercase();
        if kind != "mcq" && kind != "msq" {
            return String::new();
        }

        let parsed: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(options)
        {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "options are not a JSON object, skipping them");
                return String::new();
            }
        };

        let spoken: Vec<String> = OPTION_LETTERS
            .iter()
            .filter_map(|letter| {
                let text = match parsed.get(*letter)? {
                    serde_json::Value::String(s) if !s.is_empty() => s.clone(),
                    serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => n.to_string(),
                    serde_json::Value::Bool(true) => "true".to_string(),
                    _ => return None,
                };
                Some(format!("Option {letter}: {}", self.speech.convert(&text)))
            })
            .collect();

        if spoken.is_empty() {
            return String::new();
        }
        format!("The options are: {}.", spoken.join(". "))
    }
}

fn fill_names(pattern: &str, input: &ScriptInput) -> String {
    pattern
        .replacen("{exam_name}", &input.exam_name, 1)
        .replacen("{course_name}", &input.course_name, 1)
}

/// Script in style `style_id` for `input`.
pub fn generate_script(input: &ScriptInput, style_id: u32) -> QuizResult<String> {
    Ok(ScriptGenerator::new(style_id)?.generate(input))
}

#[cfg(test)]
#[path = "../../tests/unit/script/mod.rs"]
mod tests;
