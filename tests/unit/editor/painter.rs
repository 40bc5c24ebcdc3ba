use super::*;

use image::Rgba;

fn size(w: u32, h: u32) -> SurfaceSize {
    SurfaceSize {
        width: w,
        height: h,
    }
}

#[test]
fn primary_button_paints_white() {
    let mut painter = SourcePainter::new(size(32, 32));
    assert!(!painter.is_stroking());

    painter.begin_stroke(PointerButton::Primary, Point::new(10.0, 10.5));
    assert!(painter.is_stroking());
    painter.continue_stroke(Point::new(18.0, 10.5));

    let px = painter.raster().pixel(14, 10);
    assert_eq!(px.a, 255);
    assert_eq!(px.r, 255);

    painter.end_stroke();
    assert!(!painter.is_stroking());
}

#[test]
fn secondary_button_erases() {
    let mut painter = SourcePainter::new(size(32, 32));
    painter.begin_stroke(PointerButton::Primary, Point::new(10.0, 10.5));
    painter.continue_stroke(Point::new(18.0, 10.5));
    painter.end_stroke();
    assert!(painter.raster().pixel(14, 10).a > 0);

    painter.begin_stroke(PointerButton::Secondary, Point::new(10.0, 10.5));
    painter.continue_stroke(Point::new(18.0, 10.5));
    painter.end_stroke();
    assert_eq!(painter.raster().pixel(14, 10).a, 0);
}

#[test]
fn move_without_begin_leaves_raster_untouched() {
    let mut painter = SourcePainter::new(size(16, 16));
    painter.continue_stroke(Point::new(8.0, 8.0));
    assert!(painter.raster().data().iter().all(|&b| b == 0));
}

#[test]
fn brush_width_grows_with_speed() {
    // A slow stroke stays narrow, a fast one fattens up.
    let mut slow = SourcePainter::new(size(64, 64));
    slow.begin_stroke(PointerButton::Primary, Point::new(30.0, 30.5));
    slow.continue_stroke(Point::new(32.0, 30.5));
    assert_eq!(slow.raster().pixel(31, 27).a, 0);

    let mut fast = SourcePainter::new(size(64, 64));
    fast.begin_stroke(PointerButton::Primary, Point::new(2.0, 30.5));
    fast.continue_stroke(Point::new(60.0, 30.5));
    assert!(fast.raster().pixel(31, 28).a > 0);
}

#[test]
fn apply_transform_moves_ink_and_clears_the_origin() {
    let mut painter = SourcePainter::new(size(32, 32));
    painter.begin_stroke(PointerButton::Primary, Point::new(8.0, 8.5));
    painter.continue_stroke(Point::new(12.0, 8.5));
    painter.end_stroke();
    assert!(painter.raster().pixel(10, 8).a > 0);

    painter.apply_transform(&Frame::translation(10.0, 5.0));
    assert!(painter.raster().pixel(20, 13).a > 0);
    assert_eq!(painter.raster().pixel(10, 8).a, 0);
}

#[test]
fn load_image_converts_brightness_to_alpha() {
    // 4x4 image centred on a 10x10 surface at offset (3, 3).
    let mut img = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([0, 0, 128, 255]));

    let mut painter = SourcePainter::new(size(10, 10));
    painter.load_image(&img);

    let raster = painter.raster();
    // Full red: full brightness, opaque white.
    assert_eq!(
        raster.pixel(3, 3),
        Rgba8Premul {
            r: 255,
            g: 255,
            b: 255,
            a: 255
        }
    );
    // Half-bright blue: half-alpha white.
    assert_eq!(raster.pixel(4, 3).a, 128);
    assert_eq!(raster.pixel(4, 3).r, 128);
    // Black maps to fully transparent.
    assert_eq!(raster.pixel(5, 5).a, 0);
    // Outside the centred image nothing is touched.
    assert_eq!(raster.pixel(0, 0).a, 0);
}

#[test]
fn load_image_scales_oversized_input_down_to_fit() {
    let img = RgbaImage::from_pixel(200, 100, Rgba([255, 255, 255, 255]));

    let mut painter = SourcePainter::new(size(100, 100));
    painter.load_image(&img);

    let raster = painter.raster();
    // Fits the width, letterboxed vertically: 100x50 at y offset 25.
    assert_eq!(raster.pixel(50, 50).a, 255);
    assert_eq!(raster.pixel(50, 10).a, 0);
    assert_eq!(raster.pixel(50, 90).a, 0);
}

#[test]
fn load_image_replaces_previous_content() {
    let mut painter = SourcePainter::new(size(10, 10));
    painter.begin_stroke(PointerButton::Primary, Point::new(0.0, 0.5));
    painter.continue_stroke(Point::new(9.0, 0.5));
    painter.end_stroke();

    painter.load_image(&RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
    assert!(painter.raster().data().iter().all(|&b| b == 0));
}

#[test]
fn resize_recentres_the_drawing() {
    let mut painter = SourcePainter::new(size(8, 8));
    painter.begin_stroke(PointerButton::Primary, Point::new(3.0, 4.5));
    painter.continue_stroke(Point::new(5.0, 4.5));
    painter.end_stroke();
    assert!(painter.raster().pixel(4, 4).a > 0);

    painter.resize(size(16, 16));
    assert_eq!(painter.raster().width(), 16);
    assert!(painter.raster().pixel(8, 8).a > 0);
}
