use crate::foundation::core::Rgb8;
use crate::scene::background::Background;

/// Which part of the quiz a scene presents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Statement and options.
    Question,
    /// Five-second countdown.
    Timer,
    /// Answer and solution reveal.
    Answer,
}

/// Horizontal placement of a text block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAnchor {
    /// Centered on the canvas.
    Center,
    /// Left edge at the given x (px).
    Left(f64),
}

/// Vertical placement of a text block.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAnchor {
    /// Centered on the canvas.
    Center,
    /// Top edge at the given y (px).
    Top(f64),
}

/// Line alignment inside a text block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Lines start at the block's left edge.
    Left,
    /// Each line is centered within the block.
    Center,
}

/// Font and color of a text layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStyle {
    /// Family name resolved through the font book.
    pub font_family: String,
    /// Font size in px.
    pub size_px: f32,
    /// Fill color.
    pub color: Rgb8,
}

/// A positioned, time-bounded text element.
///
/// Times are relative to the start of the owning [`Scene`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextLayer {
    /// Text to lay out.
    pub text: String,
    /// Font and color.
    pub style: TextStyle,
    /// Wrap width in px. `None` lays the text out on a single line.
    pub wrap_width: Option<f32>,
    /// Fixed block height in px; text is vertically centered inside it when set.
    pub box_height: Option<f32>,
    /// Alignment of each line within the block.
    pub align: TextAlign,
    /// Horizontal placement.
    pub x: HAnchor,
    /// Vertical placement.
    pub y: VAnchor,
    /// Scene time the layer appears.
    pub start_secs: f64,
    /// Time on screen in seconds.
    pub duration_secs: f64,
    /// Linear fade-in length; 0 disables it.
    #[serde(default)]
    pub fade_in_secs: f64,
    /// Linear fade-out length; 0 disables it.
    #[serde(default)]
    pub fade_out_secs: f64,
}

impl TextLayer {
    /// Exclusive end of the layer on the scene clock.
    pub fn end_secs(&self) -> f64 {
        self.start_secs + self.duration_secs
    }

    /// Opacity at scene time `t`, or `None` when the layer is not on screen.
    ///
    /// Fades ramp linearly from 0 at the layer edges to 1 after `fade_in_secs` /
    /// before `fade_out_secs`.
    pub fn opacity_at(&self, t: f64) -> Option<f32> {
        if !(self.start_secs..self.end_secs()).contains(&t) {
            return None;
        }

        let mut opacity = 1.0f64;
        if self.fade_in_secs > 0.0 {
            opacity = opacity.min((t - self.start_secs) / self.fade_in_secs);
        }
        if self.fade_out_secs > 0.0 {
            opacity = opacity.min((self.end_secs() - t) / self.fade_out_secs);
        }
        Some(opacity.clamp(0.0, 1.0) as f32)
    }
}

/// A background plus ordered text layers, bounded to `duration_secs`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Quiz section shown.
    pub kind: SceneKind,
    /// Scene length in seconds.
    pub duration_secs: f64,
    /// Full-frame fill under the layers.
    pub background: Background,
    /// Draw order: first layer is painted first.
    pub layers: Vec<TextLayer>,
}

impl Scene {
    /// Layers on screen at scene time `t`, in draw order, with their opacity.
    pub fn visible_layers(&self, t: f64) -> impl Iterator<Item = (&TextLayer, f32)> {
        self.layers
            .iter()
            .filter_map(move |layer| layer.opacity_at(t).map(|o| (layer, o)))
    }

    /// Latest end time over all layers.
    pub fn layered_duration(&self) -> f64 {
        self.layers
            .iter()
            .map(TextLayer::end_secs)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
