use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{QuizError, QuizResult};
use crate::scene::TextAlign;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Font files resolved by family name from a directory.
///
/// `<dir>/<Family>-Regular.ttf`, `<Family>.ttf`, `<Family>-Regular.otf` and `<Family>.otf` are
/// tried in that order, then the fallback file if one is configured.
#[derive(Debug, Clone)]
pub struct FontBook {
    dir: PathBuf,
    fallback: Option<PathBuf>,
    loaded: HashMap<String, Arc<Vec<u8>>>,
}

impl FontBook {
    /// Look fonts up in `dir`, then `fallback`.
    pub fn new(dir: impl Into<PathBuf>, fallback: Option<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fallback,
            loaded: HashMap::new(),
        }
    }

    /// Candidate files for `family`, in lookup order.
    pub fn candidates(&self, family: &str) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = [
            format!("{family}-Regular.ttf"),
            format!("{family}.ttf"),
            format!("{family}-Regular.otf"),
            format!("{family}.otf"),
        ]
        .into_iter()
        .map(|name| self.dir.join(name))
        .collect();
        out.extend(self.fallback.iter().cloned());
        out
    }

    /// First existing candidate for `family`.
    pub fn resolve(&self, family: &str) -> QuizResult<PathBuf> {
        let candidates = self.candidates(family);
        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or_else(|| {
                let tried: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
                QuizError::render(format!(
                    "no font found for family '{family}' (tried {})",
                    tried.join(", ")
                ))
            })
    }

    /// Font bytes for `family`, read once and shared afterwards.
    pub fn bytes(&mut self, family: &str) -> QuizResult<Arc<Vec<u8>>> {
        if let Some(bytes) = self.loaded.get(family) {
            return Ok(bytes.clone());
        }
        let path = self.resolve(family)?;
        let bytes = std::fs::read(&path).map_err(|e| {
            QuizError::render(format!("failed to read font '{}': {e}", path.display()))
        })?;
        tracing::debug!(family, path = %path.display(), "font loaded");
        let bytes = Arc::new(bytes);
        self.loaded.insert(family.to_string(), bytes.clone());
        Ok(bytes)
    }
}

/// A shaped text block ready to draw, with per-line horizontal shifts applied at draw time.
pub(crate) struct PreparedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
    /// One x shift per line; non-zero only for centered lines.
    pub(crate) line_shifts: Vec<f32>,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    // Registered family name per font blob, keyed by the blob's address.
    families: HashMap<usize, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font_bytes: &Arc<Vec<u8>>) -> QuizResult<String> {
        let key = Arc::as_ptr(font_bytes) as usize;
        if let Some(name) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| QuizError::render("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| QuizError::render("registered font family has no name"))?
            .to_string();

        self.families.insert(key, family_name.clone());
        Ok(family_name)
    }

    /// Shape `text`, wrap it to `max_width_px` when given, and compute line shifts for `align`.
    pub(crate) fn prepare(
        &mut self,
        text: &str,
        font_bytes: &Arc<Vec<u8>>,
        size_px: f32,
        color: Rgb8,
        max_width_px: Option<f32>,
        align: TextAlign,
    ) -> QuizResult<PreparedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(QuizError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::from(
            color,
        )));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(max_width_px);
        layout.align(
            max_width_px,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let line_widths = line_extents(&layout);
        let width = max_width_px.unwrap_or_else(|| line_widths.iter().copied().fold(0.0, f32::max));
        let line_shifts = line_widths
            .iter()
            .map(|&w| match align {
                TextAlign::Left => 0.0,
                TextAlign::Center => ((width - w) / 2.0).max(0.0),
            })
            .collect();
        let height = layout.height();

        Ok(PreparedText {
            layout,
            font: vello_cpu::peniko::FontData::new(
                vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
                0,
            ),
            line_shifts,
            width,
            height,
        })
    }
}

// Right edge of the last glyph on each line.
fn line_extents(layout: &parley::Layout<TextBrushRgba8>) -> Vec<f32> {
    layout
        .lines()
        .map(|line| {
            line.items()
                .filter_map(|item| match item {
                    parley::layout::PositionedLayoutItem::GlyphRun(run) => run
                        .positioned_glyphs()
                        .map(|g| g.x + g.advance)
                        .reduce(f32::max),
                    _ => None,
                })
                .fold(0.0, f32::max)
        })
        .collect()
}
