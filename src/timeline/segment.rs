use std::fmt;

use crate::foundation::error::{QuizError, QuizResult};

/// Section a caption segment belongs to.
///
/// Kinds other than `question`, `timer` and `answer` are preserved verbatim and ignored when
/// scene durations are computed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum SegmentKind {
    /// `question`.
    Question,
    /// `timer`.
    Timer,
    /// `answer`.
    Answer,
    /// Any other kind, kept verbatim.
    Other(String),
    /// Missing, null or empty kind.
    #[default]
    Untyped,
}

impl From<String> for SegmentKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "question" => Self::Question,
            "timer" => Self::Timer,
            "answer" => Self::Answer,
            "" => Self::Untyped,
            _ => Self::Other(s),
        }
    }
}

// `"type": null` reads as an untyped segment.
impl From<Option<String>> for SegmentKind {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}

impl From<SegmentKind> for String {
    fn from(kind: SegmentKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question => f.write_str("question"),
            Self::Timer => f.write_str("timer"),
            Self::Answer => f.write_str("answer"),
            Self::Other(s) => f.write_str(s),
            Self::Untyped => Ok(()),
        }
    }
}

/// A timestamp as produced upstream: numeric text (`"5.00"`) or a bare JSON number.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SecondsText {
    /// Bare JSON number.
    Number(f64),
    /// Numeric text such as `"5.00"`.
    Text(String),
}

impl SecondsText {
    /// Seconds value. Non-numeric or non-finite input is an input error.
    pub fn as_secs(&self) -> QuizResult<f64> {
        let secs = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                QuizError::input(format!("caption time \"{s}\" is not a number of seconds"))
            })?,
        };
        if !secs.is_finite() {
            return Err(QuizError::input("caption time must be finite"));
        }
        Ok(secs)
    }
}

impl From<f64> for SecondsText {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for SecondsText {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// One timed caption produced by the upstream caption generator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionSegment {
    /// Section the caption belongs to.
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: SegmentKind,
    /// Start time.
    pub start: SecondsText,
    /// End time.
    pub end: SecondsText,
    /// Caption text.
    #[serde(default)]
    pub text: String,
}

impl CaptionSegment {
    /// Segment from its parts.
    pub fn new(
        kind: SegmentKind,
        start: impl Into<SecondsText>,
        end: impl Into<SecondsText>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            start: start.into(),
            end: end.into(),
            text: text.into(),
        }
    }

    /// `end - start` in seconds.
    pub fn span_secs(&self) -> QuizResult<f64> {
        let span = self.end.as_secs()? - self.start.as_secs()?;
        if span < 0.0 {
            return Err(QuizError::input(format!(
                "{} caption ends before it starts",
                self.kind
            )));
        }
        Ok(span)
    }
}

/// Parse a JSON array of caption segments.
pub fn parse_captions(json: &str) -> QuizResult<Vec<CaptionSegment>> {
    serde_json::from_str(json).map_err(|e| QuizError::serde(format!("caption segments: {e}")))
}
