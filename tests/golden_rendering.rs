#![cfg(feature = "raster")]

use std::fs;
use std::path::PathBuf;

use linkedin_designer::design::{DesignState, Mode};
use linkedin_designer::rendering::raster::{rasterize, Frame, RasterCanvas};
use linkedin_designer::rendering::{render, SurfaceSize};
use linkedin_designer::{Editor, TextField};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

/// Compare the frame digest with a stored one; `UPDATE_GOLDENS=1` rewrites it.
fn check_golden(name: &str, frame: &Frame) {
    let expected_path = golden_path(name);
    let digest = frame.digest();
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim(), "{} drifted from its golden", name);
}

#[test]
fn golden_default_banner() {
    let frame = rasterize(&render(&DesignState::default()), None).expect("rasterize");
    check_golden("banner_default.sha256", &frame);
}

#[test]
fn golden_post_templates() {
    for id in 1..=4 {
        let mut state = DesignState::default();
        state.set_mode(Mode::Post);
        state.select_template(id).unwrap();
        let frame = rasterize(&render(&state), None).expect("rasterize");
        check_golden(&format!("post_template_{}.sha256", id), &frame);
    }
}

#[test]
fn editor_and_one_shot_raster_agree() {
    let canvas = RasterCanvas::new(SurfaceSize::for_mode(Mode::Banner), None).unwrap();
    let mut editor = Editor::new(canvas).unwrap();
    editor.set_mode(Mode::Post).unwrap();
    editor.select_template(3).unwrap();
    editor.set_text(TextField::Headline, "Same pixels").unwrap();

    let from_editor = editor.canvas().frame();
    let one_shot = rasterize(&render(editor.state()), None).unwrap();
    assert_eq!(from_editor.digest(), one_shot.digest());
}

#[test]
fn banner_accents_are_drawn() {
    let frame = rasterize(&render(&DesignState::default()), None).unwrap();
    // Midway along the top-left accent line vs. just above it.
    let on_line = frame.pixel(100, 50).unwrap();
    let off_line = frame.pixel(100, 40).unwrap();
    assert!(on_line.r > off_line.r + 20, "{:?} vs {:?}", on_line, off_line);
}

#[test]
fn text_is_skipped_without_font() {
    let mut state = DesignState::default();
    let plain = rasterize(&render(&state), None).unwrap();
    state.headline = "Completely different".into();
    let edited = rasterize(&render(&state), None).unwrap();
    assert_eq!(plain.digest(), edited.digest());
}
