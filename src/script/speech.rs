use regex::{Captures, Regex};

use crate::foundation::error::{QuizError, QuizResult};

/// Rewrites written math into words a text-to-speech voice reads naturally.
#[derive(Debug, Clone)]
pub struct MathSpeech {
    fraction: Regex,
    bracketed: Regex,
    squared: Regex,
    cubed: Regex,
    power: Regex,
    latex_cmd: Regex,
    spaces: Regex,
}

const SYMBOLS: [(&str, &str); 13] = [
    ("*", " times "),
    ("÷", " divided by "),
    ("=", " equals "),
    ("≠", " not equals "),
    ("≤", " less than or equal to "),
    ("≥", " greater than or equal to "),
    ("<", " less than "),
    (">", " greater than "),
    ("√", " square root of "),
    ("∞", " infinity "),
    ("π", " pi "),
    ("∑", " sum of "),
    ("∫", " integral of "),
];

fn compile(pattern: &str) -> QuizResult<Regex> {
    Regex::new(pattern).map_err(|e| QuizError::validation(format!("speech rule '{pattern}': {e}")))
}

impl MathSpeech {
    /// Compile the rewrite rules.
    pub fn new() -> QuizResult<Self> {
        Ok(Self {
            fraction: compile(r"(\d+)/(\d+)")?,
            bracketed: compile(r"\[([^\]]+)\]")?,
            squared: compile(r"([0-9A-Za-z_])\^2")?,
            cubed: compile(r"([0-9A-Za-z_])\^3")?,
            power: compile(r"([0-9A-Za-z_])\^(\d+)")?,
            latex_cmd: compile(r"\\[a-z]+\{([^}]+)\}")?,
            spaces: compile(r"\s+")?,
        })
    }

    /// Apply every rewrite in order: fractions, matrices, powers, symbols, LaTeX wrappers, then
    /// whitespace collapse.
    pub fn convert(&self, text: &str) -> String {
        let s = self.fraction.replace_all(text, |c: &Captures<'_>| {
            match (&c[1], &c[2]) {
                ("1", "2") => "one-half".to_string(),
                ("1", "3") => "one-third".to_string(),
                ("1", "4") => "one-fourth".to_string(),
                ("2", "3") => "two-thirds".to_string(),
                ("3", "4") => "three-fourths".to_string(),
                (num, den) => format!("{num} by {den}"),
            }
        });

        let s = self.bracketed.replace_all(&s, |c: &Captures<'_>| {
            let content = &c[1];
            let rows: Vec<&str> = content.split(';').collect();
            if rows.len() > 1 {
                let cols = rows[0].split(',').count();
                format!(
                    "a matrix of {} by {cols} with elements {}",
                    rows.len(),
                    content.replace(';', " next row ").replace(',', " and ")
                )
            } else {
                c[0].to_string()
            }
        });

        let s = self.squared.replace_all(&s, "$1 squared");
        let s = self.cubed.replace_all(&s, "$1 cubed");
        let s = self.power.replace_all(&s, "$1 raised to power $2");

        let mut s = s.into_owned();
        for (symbol, words) in SYMBOLS {
            s = s.replace(symbol, words);
        }

        let s = self.latex_cmd.replace_all(&s, "$1");
        self.spaces.replace_all(&s, " ").trim().to_string()
    }
}

/// One-shot conversion; compiles the rules on every call.
pub fn math_to_speech(text: &str) -> QuizResult<String> {
    Ok(MathSpeech::new()?.convert(text))
}
