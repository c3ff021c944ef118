use std::collections::BTreeMap;
use std::path::Path;

use crate::foundation::error::{QuizError, QuizResult};

/// Question content shown by the question and answer scenes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuestionPayload {
    /// Question text.
    pub statement: String,
    /// JSON-encoded object mapping option letters to option text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
    /// Correct answer.
    pub answer: String,
    /// Worked solution; empty counts as none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl QuestionPayload {
    /// Payload without options or solution.
    pub fn new(statement: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            options: None,
            answer: answer.into(),
            solution: None,
        }
    }

    /// Attach options as a JSON-encoded object string.
    pub fn with_options_json(mut self, options: impl Into<String>) -> Self {
        self.options = Some(serde_json::Value::String(options.into()));
        self
    }

    /// Set the solution.
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    /// Parse a payload from JSON. Missing required keys are serde errors.
    pub fn from_json_str(json: &str) -> QuizResult<Self> {
        serde_json::from_str(json).map_err(|e| QuizError::serde(format!("question payload: {e}")))
    }

    /// Read and parse a payload JSON file.
    pub fn from_path(path: &Path) -> QuizResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            QuizError::input(format!(
                "failed to read question payload '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// Decode the options mapping, ordered by letter.
    ///
    /// Absent, `null`, empty-string and empty-object options all mean "no options".
    pub fn parsed_options(&self) -> QuizResult<Option<BTreeMap<String, String>>> {
        let object = match &self.options {
            None | Some(serde_json::Value::Null) => return Ok(None),
            Some(serde_json::Value::String(s)) if s.is_empty() => return Ok(None),
            Some(serde_json::Value::String(s)) => {
                let decoded: serde_json::Value = serde_json::from_str(s)
                    .map_err(|e| QuizError::serde(format!("options JSON: {e}")))?;
                match decoded {
                    serde_json::Value::Object(map) => map,
                    other => {
                        return Err(QuizError::input(format!(
                            "options JSON must be an object, got {other}"
                        )));
                    }
                }
            }
            Some(serde_json::Value::Object(map)) => map.clone(),
            Some(other) => {
                return Err(QuizError::input(format!(
                    "options must be a JSON-encoded object, got {other}"
                )));
            }
        };

        let options: BTreeMap<String, String> = object
            .into_iter()
            .map(|(letter, v)| {
                let text = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (letter, text)
            })
            .collect();

        Ok((!options.is_empty()).then_some(options))
    }

    /// Solution text, treating an empty string as absent.
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref().filter(|s| !s.is_empty())
    }
}
