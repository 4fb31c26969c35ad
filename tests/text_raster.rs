#![cfg(feature = "raster")]

use std::path::Path;

use linkedin_designer::design::{Alignment, DesignState, Direction};
use linkedin_designer::rendering::raster::{rasterize, Frame, RasterCanvas};
use linkedin_designer::rendering::text::FontFace;
use linkedin_designer::rendering::{render, SurfaceSize};
use linkedin_designer::{Editor, Mode, TextField};

fn font() -> FontFace {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf");
    FontFace::load(&path).expect("load DejaVu fixture")
}

/// Banner with only a headline, so every inked pixel belongs to it.
fn headline_only(alignment: Alignment) -> DesignState {
    let mut state = DesignState::default();
    state.headline = "HHHH".into();
    state.subtext = String::new();
    state.set_alignment(alignment);
    state
}

/// Bounding box `(min_x, min_y, max_x, max_y)` of pixels that differ.
fn ink_box(with_text: &Frame, without: &Frame) -> (u32, u32, u32, u32) {
    let mut b = (u32::MAX, u32::MAX, 0, 0);
    for y in 0..with_text.height {
        for x in 0..with_text.width {
            if with_text.pixel(x, y) != without.pixel(x, y) {
                b = (b.0.min(x), b.1.min(y), b.2.max(x), b.3.max(y));
            }
        }
    }
    assert!(b.0 != u32::MAX, "no text was painted");
    b
}

fn headline_ink(state: &DesignState) -> (u32, u32, u32, u32) {
    let list = render(state);
    let inked = rasterize(&list, Some(font())).unwrap();
    let bare = rasterize(&list, None).unwrap();
    ink_box(&inked, &bare)
}

#[test]
fn left_text_starts_at_the_margin() {
    let (min_x, _, _, _) = headline_ink(&headline_only(Alignment::Left));
    assert!((100..=110).contains(&min_x), "min_x = {}", min_x);

    let mut nudged = headline_only(Alignment::Left);
    nudged.nudge(Direction::Right);
    let (shifted, _, _, _) = headline_ink(&nudged);
    assert_eq!(shifted, min_x + 10);
}

#[test]
fn centered_text_straddles_the_middle() {
    let (min_x, _, max_x, _) = headline_ink(&headline_only(Alignment::Center));
    let mid = (min_x + max_x) as i64 / 2;
    assert!((mid - 792).abs() <= 3, "ink spans {}..{}", min_x, max_x);
}

#[test]
fn right_text_ends_at_the_margin() {
    let (_, _, max_x, _) = headline_ink(&headline_only(Alignment::Right));
    assert!((1470..=1484).contains(&max_x), "max_x = {}", max_x);
}

#[test]
fn headline_sits_on_its_baseline() {
    // Banner centre is 198 and the headline baseline is 20px above it.
    let (_, min_y, _, max_y) = headline_ink(&headline_only(Alignment::Center));
    assert!((175..=178).contains(&max_y), "max_y = {}", max_y);
    // Capital H at 36px is well over 20px tall.
    assert!(max_y - min_y >= 20, "ink rows {}..{}", min_y, max_y);

    let mut raised = headline_only(Alignment::Center);
    raised.nudge(Direction::Up);
    let (_, _, _, raised_max) = headline_ink(&raised);
    assert_eq!(raised_max, max_y - 10);
}

#[test]
fn repainting_with_a_font_is_stable() {
    let canvas = RasterCanvas::new(SurfaceSize::for_mode(Mode::Banner), Some(font())).unwrap();
    let mut editor = Editor::new(canvas).unwrap();
    editor.set_text(TextField::Headline, "Open to work").unwrap();
    let first = editor.canvas().frame();

    editor.set_alignment(Alignment::Left).unwrap();
    editor.set_alignment(Alignment::Center).unwrap();
    let second = editor.canvas().frame();
    assert_eq!(first.digest(), second.digest());

    let one_shot = rasterize(&render(editor.state()), Some(font())).unwrap();
    assert_eq!(first.digest(), one_shot.digest());
}
