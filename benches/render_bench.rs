use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linkedin_designer::design::{DesignState, TextField};
use linkedin_designer::rendering::{render, RecordingCanvas};
use linkedin_designer::Editor;

fn bench_display_list(c: &mut Criterion) {
    let state = DesignState::default();
    c.bench_function("render_display_list", |b| {
        b.iter(|| render(black_box(&state)))
    });
}

// Keystroke path: one text edit plus the repaint it triggers.
fn bench_editor_keystroke(c: &mut Criterion) {
    let mut editor = Editor::new(RecordingCanvas::new()).expect("editor");
    let mut n = 0u32;
    c.bench_function("editor_set_text", |b| {
        b.iter(|| {
            n = n.wrapping_add(1);
            editor
                .set_text(TextField::Headline, format!("Headline {}", n))
                .unwrap();
        })
    });
}

#[cfg(feature = "raster")]
fn bench_rasterize(c: &mut Criterion) {
    use linkedin_designer::design::Mode;
    use linkedin_designer::export::{self, ImageFormat};
    use linkedin_designer::rendering::raster::rasterize;

    let banner = render(&DesignState::default());
    let mut post_state = DesignState::default();
    post_state.set_mode(Mode::Post);
    let post = render(&post_state);

    c.bench_function("rasterize_banner", |b| {
        b.iter(|| rasterize(black_box(&banner), None).unwrap())
    });
    c.bench_function("rasterize_post", |b| {
        b.iter(|| rasterize(black_box(&post), None).unwrap())
    });

    let frame = rasterize(&banner, None).unwrap();
    c.bench_function("encode_banner_png", |b| {
        b.iter(|| export::encode(black_box(&frame), ImageFormat::Png).unwrap())
    });
}

#[cfg(not(feature = "raster"))]
fn bench_rasterize(_c: &mut Criterion) {}

criterion_group!(
    benches,
    bench_display_list,
    bench_editor_keystroke,
    bench_rasterize
);
criterion_main!(benches);
