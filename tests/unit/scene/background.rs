use super::*;
use crate::template::TemplateCatalog;

const PORTRAIT: Canvas = Canvas {
    width: 1080,
    height: 1920,
};

fn px(data: &[u8], canvas: Canvas, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * canvas.width + x) * 4) as usize;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

fn teal_gradient() -> Background {
    Background::for_template(TemplateCatalog::builtin().get(1)).unwrap()
}

#[test]
fn gradient_top_left_is_primary_exactly() {
    let bg = teal_gradient();
    assert_eq!(bg.color_at(0, 0, PORTRAIT), Rgb8::new(13, 148, 136));
}

#[test]
fn gradient_bottom_right_is_secondary_within_one() {
    let bg = teal_gradient();
    let c = bg.color_at(1079, 1919, PORTRAIT);
    let want = Rgb8::new(0x14, 0xb8, 0xa6);
    assert!(c.r.abs_diff(want.r) <= 1);
    assert!(c.g.abs_diff(want.g) <= 1);
    assert!(c.b.abs_diff(want.b) <= 1);
}

#[test]
fn gradient_raster_matches_per_pixel_color() {
    let canvas = Canvas {
        width: 16,
        height: 32,
    };
    let bg = Background::Gradient {
        from: Rgb8::new(0, 0, 0),
        to: Rgb8::new(200, 100, 50),
    };
    let data = bg.rasterize(canvas);
    assert_eq!(data.len(), 16 * 32 * 4);
    for (x, y) in [(0, 0), (5, 7), (15, 0), (0, 31), (15, 31)] {
        assert_eq!(px(&data, canvas, x, y), bg.color_at(x, y, canvas).to_rgba8());
    }
    assert_eq!(px(&data, canvas, 15, 31), [200, 100, 50, 255]);
}

#[test]
fn gradient_is_time_invariant() {
    let canvas = Canvas {
        width: 8,
        height: 8,
    };
    let bg = teal_gradient();
    assert_eq!(bg.frame_at(0.0, canvas), bg.frame_at(3.7, canvas));
}

#[test]
fn solid_fills_every_pixel() {
    let canvas = Canvas {
        width: 4,
        height: 4,
    };
    let bg = Background::for_template(TemplateCatalog::builtin().get(4)).unwrap();
    assert_eq!(bg, Background::Solid(Rgb8::new(0xf3, 0xf4, 0xf6)));
    let data = bg.rasterize(canvas);
    assert!(data.chunks_exact(4).all(|p| p == [0xf3, 0xf4, 0xf6, 255]));
}

#[test]
fn single_pixel_canvas_does_not_divide_by_zero() {
    let canvas = Canvas {
        width: 1,
        height: 1,
    };
    let bg = Background::Gradient {
        from: Rgb8::new(1, 2, 3),
        to: Rgb8::new(9, 9, 9),
    };
    assert_eq!(bg.color_at(0, 0, canvas), Rgb8::new(1, 2, 3));
}
