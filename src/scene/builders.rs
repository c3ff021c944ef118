use std::collections::BTreeMap;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::QuizResult;
use crate::scene::background::Background;
use crate::scene::model::{HAnchor, Scene, SceneKind, TextAlign, TextLayer, TextStyle, VAnchor};
use crate::template::{AnimationStyle, Template};

/// The countdown always runs for exactly this long.
pub const TIMER_SCENE_SECS: f64 = 5.0;
/// Countdown digits in display order, one per second.
pub const TIMER_DIGITS: [u32; 5] = [5, 4, 3, 2, 1];
/// Solutions are cut to this many characters before layout.
pub const SOLUTION_MAX_CHARS: usize = 200;

const TIMER_FADE_SECS: f64 = 0.2;
const HEADER_FADE_SECS: f64 = 0.5;

const HEADER_SIZE: f32 = 48.0;
const HEADER_TOP: f64 = 60.0;
const QUESTION_SIZE: f32 = 28.0;
const QUESTION_TOP: f64 = 300.0;
const QUESTION_BOX_HEIGHT: f32 = 400.0;
const OPTION_SIZE: f32 = 24.0;
const OPTION_LEFT: f64 = 100.0;
const OPTIONS_TOP: f64 = 800.0;
const OPTION_ROW_SPACING: f64 = 140.0;
const TIMER_SIZE: f32 = 120.0;
const ANSWER_LABEL: &str = "Correct Answer:";
const ANSWER_LABEL_SIZE: f32 = 32.0;
const ANSWER_LABEL_TOP: f64 = 400.0;
const ANSWER_LABEL_COLOR: Rgb8 = Rgb8::new(0x34, 0xd3, 0x99);
const ANSWER_SIZE: f32 = 36.0;
const ANSWER_TOP: f64 = 500.0;
const SOLUTION_LABEL: &str = "Solution:";
const SOLUTION_LABEL_SIZE: f32 = 28.0;
const SOLUTION_LABEL_TOP: f64 = 700.0;
const SOLUTION_SIZE: f32 = 22.0;
const SOLUTION_TOP: f64 = 800.0;
const SOLUTION_BOX_HEIGHT: f32 = 400.0;

/// Hard cut of `solution` to its first [`SOLUTION_MAX_CHARS`] characters.
pub fn truncate_solution(solution: &str) -> String {
    solution.chars().take(SOLUTION_MAX_CHARS).collect()
}

/// Builds scenes styled by one template on one canvas.
#[derive(Clone, Debug)]
pub struct SceneBuilder<'a> {
    template: &'a Template,
    canvas: Canvas,
    background: Background,
    text_color: Rgb8,
}

impl<'a> SceneBuilder<'a> {
    /// Builder for `template` on `canvas`. Fails on malformed template colors.
    pub fn new(template: &'a Template, canvas: Canvas) -> QuizResult<Self> {
        Ok(Self {
            template,
            canvas,
            background: Background::for_template(template)?,
            text_color: template.text_color()?,
        })
    }

    /// Background shared by every scene this builder makes.
    pub fn background(&self) -> Background {
        self.background
    }

    /// Statement caption near the top third, then one row per option ordered by letter.
    pub fn question_scene(
        &self,
        statement: &str,
        options: Option<&BTreeMap<String, String>>,
        duration_secs: f64,
    ) -> Scene {
        let mut layers = vec![
            self.layer(statement, QUESTION_SIZE, self.text_color, duration_secs)
                .wrapped(self.width_minus(160.0), Some(QUESTION_BOX_HEIGHT))
                .at(HAnchor::Center, VAnchor::Top(QUESTION_TOP)),
        ];

        // BTreeMap iterates in ascending key order.
        let rows = options.into_iter().flatten();
        for (row, (letter, text)) in rows.enumerate() {
            let y = OPTIONS_TOP + OPTION_ROW_SPACING * row as f64;
            layers.push(
                self.layer(
                    &format!("{letter}. {text}"),
                    OPTION_SIZE,
                    self.text_color,
                    duration_secs,
                )
                .wrapped(self.width_minus(200.0), None)
                .aligned(TextAlign::Left)
                .at(HAnchor::Left(OPTION_LEFT), VAnchor::Top(y)),
            );
        }

        self.scene(SceneKind::Question, duration_secs, layers)
    }

    /// Centered 5-4-3-2-1 countdown. Always [`TIMER_SCENE_SECS`] long; `requested_secs` is
    /// accepted for symmetry with the other builders and ignored.
    pub fn timer_scene(&self, requested_secs: f64) -> Scene {
        if (requested_secs - TIMER_SCENE_SECS).abs() > f64::EPSILON {
            tracing::debug!(
                requested_secs,
                "timer scene duration is fixed at {TIMER_SCENE_SECS}s"
            );
        }

        let layers = TIMER_DIGITS
            .iter()
            .enumerate()
            .map(|(i, digit)| {
                let mut layer = self
                    .layer(&digit.to_string(), TIMER_SIZE, self.text_color, 1.0)
                    .at(HAnchor::Center, VAnchor::Center);
                layer.start_secs = i as f64;
                layer.fade_in_secs = TIMER_FADE_SECS;
                layer.fade_out_secs = TIMER_FADE_SECS;
                layer
            })
            .collect();

        self.scene(SceneKind::Timer, TIMER_SCENE_SECS, layers)
    }

    /// "Correct Answer:" label, the answer, and an optional truncated solution.
    pub fn answer_scene(&self, answer: &str, solution: Option<&str>, duration_secs: f64) -> Scene {
        let mut layers = vec![
            self.layer(
                ANSWER_LABEL,
                ANSWER_LABEL_SIZE,
                ANSWER_LABEL_COLOR,
                duration_secs,
            )
            .at(HAnchor::Center, VAnchor::Top(ANSWER_LABEL_TOP)),
            self.layer(answer, ANSWER_SIZE, self.text_color, duration_secs)
                .wrapped(self.width_minus(200.0), None)
                .at(HAnchor::Center, VAnchor::Top(ANSWER_TOP)),
        ];

        if let Some(solution) = solution.filter(|s| !s.is_empty()) {
            layers.push(
                self.layer(
                    SOLUTION_LABEL,
                    SOLUTION_LABEL_SIZE,
                    self.text_color,
                    duration_secs,
                )
                .at(HAnchor::Center, VAnchor::Top(SOLUTION_LABEL_TOP)),
            );
            layers.push(
                self.layer(
                    &truncate_solution(solution),
                    SOLUTION_SIZE,
                    self.text_color,
                    duration_secs,
                )
                .wrapped(self.width_minus(200.0), Some(SOLUTION_BOX_HEIGHT))
                .at(HAnchor::Center, VAnchor::Top(SOLUTION_TOP)),
            );
        }

        self.scene(SceneKind::Answer, duration_secs, layers)
    }

    /// "`<exam> <course>`" banner. Not part of any scene; callers overlay it explicitly.
    pub fn header_layer(
        &self,
        exam_name: &str,
        course_name: &str,
        duration_secs: f64,
    ) -> QuizResult<TextLayer> {
        let mut layer = self
            .layer(
                &format!("{exam_name} {course_name}"),
                HEADER_SIZE,
                self.template.header_color()?,
                duration_secs,
            )
            .wrapped(self.width_minus(160.0), None)
            .at(HAnchor::Center, VAnchor::Top(HEADER_TOP));
        if self.template.animation != AnimationStyle::Subtle {
            layer.fade_in_secs = HEADER_FADE_SECS;
        }
        Ok(layer)
    }

    fn scene(&self, kind: SceneKind, duration_secs: f64, layers: Vec<TextLayer>) -> Scene {
        Scene {
            kind,
            duration_secs,
            background: self.background,
            layers,
        }
    }

    fn layer(&self, text: &str, size_px: f32, color: Rgb8, duration_secs: f64) -> TextLayer {
        TextLayer {
            text: text.to_string(),
            style: TextStyle {
                font_family: self.template.font_family.to_string(),
                size_px,
                color,
            },
            wrap_width: None,
            box_height: None,
            align: TextAlign::Center,
            x: HAnchor::Center,
            y: VAnchor::Center,
            start_secs: 0.0,
            duration_secs,
            fade_in_secs: 0.0,
            fade_out_secs: 0.0,
        }
    }

    fn width_minus(&self, margin: f32) -> f32 {
        (self.canvas.width as f32 - margin).max(1.0)
    }
}

impl TextLayer {
    fn wrapped(mut self, width: f32, box_height: Option<f32>) -> Self {
        self.wrap_width = Some(width);
        self.box_height = box_height;
        self
    }

    fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    fn at(mut self, x: HAnchor, y: VAnchor) -> Self {
        self.x = x;
        self.y = y;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/builders.rs"]
mod tests;
