use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Affine, Canvas, Rgb8};
use crate::foundation::error::{QuizError, QuizResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::text::{FontBook, PreparedText, TextLayoutEngine};
use crate::scene::{Background, HAnchor, TextAlign, TextLayer, VAnchor};
use crate::timeline::Timeline;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TextKey {
    text: String,
    family: String,
    size_bits: u32,
    color: Rgb8,
    wrap_bits: Option<u32>,
    align: TextAlign,
}

impl TextKey {
    fn for_layer(layer: &TextLayer) -> Self {
        Self {
            text: layer.text.clone(),
            family: layer.style.font_family.clone(),
            size_bits: layer.style.size_px.to_bits(),
            color: layer.style.color,
            wrap_bits: layer.wrap_width.map(f32::to_bits),
            align: layer.align,
        }
    }
}

/// CPU rasterizer powered by `vello_cpu`.
///
/// Backgrounds and shaped text are cached for the lifetime of the rasterizer, so rendering a
/// timeline shapes each distinct text block once.
pub struct CpuRasterizer {
    canvas: Canvas,
    fonts: FontBook,
    text_engine: TextLayoutEngine,
    ctx: Option<vello_cpu::RenderContext>,
    background_cache: HashMap<Background, vello_cpu::Image>,
    text_cache: HashMap<TextKey, Arc<PreparedText>>,
}

impl CpuRasterizer {
    /// Rasterizer for `canvas`; fonts are read lazily from `fonts`.
    pub fn new(canvas: Canvas, fonts: FontBook) -> QuizResult<Self> {
        canvas_dims(canvas)?;
        Ok(Self {
            canvas,
            fonts,
            text_engine: TextLayoutEngine::new(),
            ctx: None,
            background_cache: HashMap::new(),
            text_cache: HashMap::new(),
        })
    }

    /// Canvas frames are rendered at.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn with_ctx_mut<R>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> QuizResult<R>,
    ) -> QuizResult<R> {
        let (width, height) = canvas_dims(self.canvas)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn background_paint(&mut self, bg: Background) -> QuizResult<vello_cpu::Image> {
        if let Some(img) = self.background_cache.get(&bg).cloned() {
            return Ok(img);
        }
        let bytes = bg.rasterize(self.canvas);
        let img = rgba_opaque_to_image(&bytes, self.canvas)?;
        self.background_cache.insert(bg, img.clone());
        Ok(img)
    }

    fn text_for(&mut self, layer: &TextLayer) -> QuizResult<Arc<PreparedText>> {
        let key = TextKey::for_layer(layer);
        if let Some(t) = self.text_cache.get(&key) {
            return Ok(t.clone());
        }
        let font_bytes = self.fonts.bytes(&layer.style.font_family)?;
        let prepared = self.text_engine.prepare(
            &layer.text,
            &font_bytes,
            layer.style.size_px,
            layer.style.color,
            layer.wrap_width,
            layer.align,
        )?;
        let prepared = Arc::new(prepared);
        self.text_cache.insert(key, prepared.clone());
        Ok(prepared)
    }

    /// Top-left corner of the layer's glyph block on the canvas.
    fn text_origin(&self, layer: &TextLayer, t: &PreparedText) -> (f64, f64) {
        let x = match layer.x {
            HAnchor::Center => (f64::from(self.canvas.width) - f64::from(t.width)) / 2.0,
            HAnchor::Left(x) => x,
        };
        let block_h = f64::from(layer.box_height.unwrap_or(t.height));
        let top = match layer.y {
            VAnchor::Center => (f64::from(self.canvas.height) - block_h) / 2.0,
            VAnchor::Top(y) => y,
        };
        let y = top + (block_h - f64::from(t.height)) / 2.0;
        (x, y)
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        layer: &TextLayer,
        opacity: f32,
    ) -> QuizResult<()> {
        if opacity <= 0.0 || layer.text.is_empty() {
            return Ok(());
        }
        let t = self.text_for(layer)?;
        let (ox, oy) = self.text_origin(layer, &t);

        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for (line, shift) in t.layout.lines().zip(t.line_shifts.iter().copied()) {
            ctx.set_transform(affine_to_cpu(Affine::translate((
                ox + f64::from(shift),
                oy,
            ))));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&t.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }
}

impl RenderBackend for CpuRasterizer {
    fn render_frame(&mut self, timeline: &Timeline, t: f64) -> QuizResult<FrameRGBA> {
        if timeline.canvas != self.canvas {
            return Err(QuizError::validation(format!(
                "timeline canvas {}x{} does not match rasterizer canvas {}x{}",
                timeline.canvas.width,
                timeline.canvas.height,
                self.canvas.width,
                self.canvas.height
            )));
        }
        let (scene, local_t) = timeline
            .scene_at(t)
            .ok_or_else(|| QuizError::render("timeline has no scenes"))?;

        let (w, h) = canvas_dims(self.canvas)?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);

        self.with_ctx_mut(|this, ctx| {
            let bg = this.background_paint(scene.background)?;
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(bg);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));

            for (layer, opacity) in scene.visible_layers(local_t) {
                this.draw_text(ctx, layer, opacity)?;
            }
            for layer in &timeline.overlays {
                if let Some(opacity) = layer.opacity_at(t) {
                    this.draw_text(ctx, layer, opacity)?;
                }
            }

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn canvas_dims(canvas: Canvas) -> QuizResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| QuizError::validation("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| QuizError::validation("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(QuizError::validation("canvas width/height must be non-zero"));
    }
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

// Opaque pixels are already premultiplied.
fn rgba_opaque_to_image(bytes: &[u8], canvas: Canvas) -> QuizResult<vello_cpu::Image> {
    let (w, h) = canvas_dims(canvas)?;
    if bytes.len() != usize::from(w) * usize::from(h) * 4 {
        return Err(QuizError::render("background byte len mismatch"));
    }
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, false);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}
