use egui::{pos2, vec2};
use sketch_classifier::{Canvas, RasterPolicy, Rasterizer};

const WHITE: [u8; 3] = [255, 255, 255];

// Antialiased edges may leave a little grey; ink is anything clearly dark
fn is_ink(pixel: [u8; 3]) -> bool {
    pixel.iter().all(|&channel| channel < 128)
}

#[test]
fn test_empty_canvas_renders_nothing() {
    let canvas = Canvas::new();
    assert!(Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).is_none());
}

#[test]
fn test_cleared_canvas_renders_nothing() {
    let mut canvas = Canvas::new();
    canvas.begin(pos2(10.0, 10.0));
    canvas.end(pos2(90.0, 90.0));
    canvas.clear();
    assert!(Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).is_none());
}

#[test]
fn test_large_drawing_is_padded() {
    let mut canvas = Canvas::new();
    canvas.begin(pos2(50.0, 60.0));
    canvas.extend(pos2(150.0, 200.0));
    canvas.end(pos2(250.0, 210.0));

    let image = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert_eq!(image.width(), 240);
    assert_eq!(image.height(), 190);
    assert_eq!(image.bounds().min, pos2(30.0, 40.0));
}

#[test]
fn test_small_drawing_is_centered_on_live_canvas() {
    let mut canvas = Canvas::new();
    canvas.begin(pos2(5.0, 5.0));
    canvas.end(pos2(5.0, 5.0));

    let image = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert_eq!((image.width(), image.height()), (100, 100));
    assert_eq!(image.bounds().center(), pos2(200.0, 150.0));

    // The dot lies outside the frame, so the whole image is blank
    assert!(image.pixels().pixels().all(|p| p.0 == WHITE));
}

#[test]
fn test_dot_renders_as_mark() {
    let mut canvas = Canvas::new();
    canvas.begin(pos2(200.0, 150.0));
    canvas.end(pos2(200.0, 150.0));

    let image = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert!(is_ink(image.pixel(50, 50)));
    assert_eq!(image.pixel(0, 0), WHITE);
    assert_eq!(image.pixel(60, 50), WHITE);
}

#[test]
fn test_strokes_are_black_on_white() {
    let mut canvas = Canvas::new();
    // Horizontal line through y = 100.5, well inside the frame
    canvas.begin(pos2(20.0, 100.5));
    canvas.end(pos2(220.0, 100.5));
    // Vertical line to make the drawing tall enough
    canvas.begin(pos2(120.0, 20.0));
    canvas.end(pos2(120.0, 180.0));

    let image = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    let origin = image.bounds().min;
    assert_eq!(origin, pos2(0.0, 0.0));

    // On the horizontal line
    assert!(is_ink(image.pixel(70, 100)));
    // Just off it
    assert_eq!(image.pixel(70, 110), WHITE);
    // Corners stay background
    assert_eq!(image.pixel(0, 0), WHITE);
    assert_eq!(image.pixel(image.width() - 1, image.height() - 1), WHITE);
}

#[test]
fn test_in_progress_stroke_follows_policy() {
    let mut canvas = Canvas::new();
    canvas.begin(pos2(20.0, 20.0));
    canvas.end(pos2(220.0, 20.0));
    canvas.begin(pos2(20.0, 180.0));
    canvas.extend(pos2(220.0, 180.0));

    // bounds (0,0)-(240,200); in-progress line lies on y = 180
    let excluded = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert_eq!(excluded.pixel(120, 180), WHITE);
    assert!(is_ink(excluded.pixel(120, 20)));

    let including = Rasterizer::new(RasterPolicy {
        include_in_progress: true,
        ..Default::default()
    });
    let included = including.render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert!(is_ink(included.pixel(120, 180)));

    // Rendering never seals the stroke
    assert_eq!(canvas.strokes().len(), 1);
    assert!(canvas.current_stroke().is_some());
}

#[test]
fn test_only_in_progress_stroke_still_renders() {
    let mut canvas = Canvas::new();
    canvas.begin(pos2(20.0, 20.0));
    canvas.extend(pos2(220.0, 180.0));

    let image = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert!(image.pixels().pixels().all(|p| p.0 == WHITE));
}

#[test]
fn test_line_is_three_pixels_wide() {
    let mut canvas = Canvas::new();
    // Vertical line on x = 80.5; the padded frame starts at the canvas origin
    canvas.begin(pos2(80.5, 20.0));
    canvas.end(pos2(80.5, 220.0));
    canvas.begin(pos2(20.0, 20.0));
    canvas.end(pos2(220.0, 20.0));

    let image = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert_eq!(image.bounds().min, pos2(0.0, 0.0));

    for y in [80, 120, 160] {
        let dark: Vec<u32> = (0..image.width())
            .filter(|&x| is_ink(image.pixel(x, y)))
            .collect();
        assert_eq!(dark, vec![79, 80, 81], "row {y}");
    }
}

#[test]
fn test_negative_coordinates_render() {
    let mut canvas = Canvas::new();
    canvas.begin(pos2(-150.0, -100.0));
    canvas.extend(pos2(-50.0, -30.0));
    canvas.end(pos2(50.0, 50.0));

    let image = Rasterizer::default().render(&canvas, vec2(400.0, 300.0)).unwrap();
    assert_eq!((image.width(), image.height()), (240, 190));
    assert_eq!(image.bounds().min, pos2(-170.0, -120.0));
    // Start of the stroke sits 20 pixels in from the corner
    assert!(is_ink(image.pixel(20, 20)));
}
