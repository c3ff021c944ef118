/// Convenience result type used across quizreel.
pub type QuizResult<T> = Result<T, QuizError>;

/// Top-level error taxonomy used by composition and rendering APIs.
#[derive(thiserror::Error, Debug)]
pub enum QuizError {
    /// Invalid configuration or structurally malformed data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Caller-provided inputs (captions, question payload, narration) that cannot be used.
    #[error("input error: {0}")]
    Input(String),

    /// Failures while rasterizing frames or driving the encoder.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QuizError {
    /// Build a [`QuizError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`QuizError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`QuizError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QuizError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
