use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::QuizResult;
use crate::template::{BackgroundKind, Template};

/// Full-frame color field drawn beneath every scene.
///
/// Both variants are time-invariant: the raster is identical at every instant of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// Single color over the whole frame.
    Solid(Rgb8),
    /// Diagonal blend, `from` at the top-left corner and `to` at the bottom-right corner.
    Gradient {
        /// Top-left color.
        from: Rgb8,
        /// Bottom-right color.
        to: Rgb8,
    },
}

impl Background {
    /// Background matching a template's background kind and colors.
    pub fn for_template(template: &Template) -> QuizResult<Self> {
        Ok(match template.background {
            BackgroundKind::Solid => Self::Solid(template.primary_rgb()?),
            BackgroundKind::Gradient => Self::Gradient {
                from: template.primary_rgb()?,
                to: template.secondary_rgb()?,
            },
        })
    }

    /// Color of pixel `(x, y)` on `canvas`.
    pub fn color_at(&self, x: u32, y: u32, canvas: Canvas) -> Rgb8 {
        match *self {
            Self::Solid(c) => c,
            Self::Gradient { from, to } => {
                let t = diagonal_factor(x, y, canvas, max_diagonal(canvas));
                lerp_rgb(from, to, t)
            }
        }
    }

    /// Frame for scene time `t`. The time is ignored; see the type docs.
    pub fn frame_at(&self, _t: f64, canvas: Canvas) -> Vec<u8> {
        self.rasterize(canvas)
    }

    /// Rasterize into tightly packed, opaque RGBA8 (row-major).
    pub fn rasterize(&self, canvas: Canvas) -> Vec<u8> {
        let (w, h) = (canvas.width as usize, canvas.height as usize);
        let mut out = vec![0u8; w * h * 4];

        match *self {
            Self::Solid(c) => {
                let px = c.to_rgba8();
                for d in out.chunks_exact_mut(4) {
                    d.copy_from_slice(&px);
                }
            }
            Self::Gradient { from, to } => {
                let max_d = max_diagonal(canvas);
                for (y, row) in out.chunks_exact_mut(w * 4).enumerate() {
                    for (x, d) in row.chunks_exact_mut(4).enumerate() {
                        let t = diagonal_factor(x as u32, y as u32, canvas, max_d);
                        d.copy_from_slice(&lerp_rgb(from, to, t).to_rgba8());
                    }
                }
            }
        }

        out
    }
}

fn raw_diagonal(x: u32, y: u32, canvas: Canvas) -> f64 {
    let fx = f64::from(x) / f64::from(canvas.width);
    let fy = f64::from(y) / f64::from(canvas.height);
    (fx * fx + fy * fy).sqrt()
}

// Largest raw value over the frame is at the last pixel, not at (W, H).
fn max_diagonal(canvas: Canvas) -> f64 {
    raw_diagonal(
        canvas.width.saturating_sub(1),
        canvas.height.saturating_sub(1),
        canvas,
    )
}

fn diagonal_factor(x: u32, y: u32, canvas: Canvas, max_d: f64) -> f64 {
    if max_d <= 0.0 {
        return 0.0;
    }
    (raw_diagonal(x, y, canvas) / max_d).clamp(0.0, 1.0)
}

fn lerp_rgb(a: Rgb8, b: Rgb8, t: f64) -> Rgb8 {
    fn ch(a: u8, b: u8, t: f64) -> u8 {
        (f64::from(a) * (1.0 - t) + f64::from(b) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    }
    Rgb8::new(ch(a.r, b.r, t), ch(a.g, b.g, t), ch(a.b, b.b, t))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
