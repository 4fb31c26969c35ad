use linkedin_designer::color::Rgba;
use linkedin_designer::design::{Alignment, Direction, Mode, TextField, Theme};
use linkedin_designer::rendering::{DisplayList, FontWeight, PaintCommand, RecordingCanvas};
use linkedin_designer::{Editor, Error, UiEvent};

fn last(editor: &Editor<RecordingCanvas>) -> &DisplayList {
    editor.canvas().last.as_ref().expect("editor paints on creation")
}

fn texts(list: &DisplayList) -> Vec<(String, f32, f32, u32, FontWeight)> {
    list.texts()
        .filter_map(|c| match c {
            PaintCommand::Text {
                text,
                x,
                y,
                size,
                weight,
                ..
            } => Some((text.clone(), *x, *y, *size, *weight)),
            _ => None,
        })
        .collect()
}

#[test]
fn professional_banner_centered() {
    let mut editor = Editor::new(RecordingCanvas::new()).unwrap();
    editor.select_template(1).unwrap();
    editor.set_text(TextField::Headline, "Hi").unwrap();
    editor.set_text(TextField::Subtext, "There").unwrap();

    let list = last(&editor);
    assert_eq!((list.width, list.height), (1584, 396));
    assert!(list.commands.iter().any(|c| matches!(
        c,
        PaintCommand::LinearGradient { stops, end, .. }
            if stops[0].to_string() == "#0077b5"
                && stops[1].to_string() == "#00a0dc"
                && *end == (1584.0, 396.0)
    )));
    assert_eq!(
        texts(list),
        vec![
            ("Hi".to_string(), 792.0, 178.0, 36, FontWeight::Bold),
            ("There".to_string(), 792.0, 234.0, 18, FontWeight::Regular),
        ]
    );
    let accents: Vec<_> = list
        .commands
        .iter()
        .filter_map(|c| match c {
            PaintCommand::StrokeLine { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
        .collect();
    assert_eq!(accents.len(), 2);
    assert_eq!(accents[0].0, (50.0, 50.0));
    assert_eq!(accents[1].1, (1534.0, 346.0));
    assert_eq!(accents[0].2.to_string(), "rgba(255, 255, 255, 0.2)");
}

#[test]
fn switching_to_post_resets_template_and_resizes() {
    let mut editor = Editor::new(RecordingCanvas::new()).unwrap();
    editor.select_template(5).unwrap();
    editor.set_mode(Mode::Post).unwrap();

    assert_eq!(editor.state().template_id, 1);
    assert_eq!(editor.picker().active_id(), 1);
    assert_eq!(editor.picker().entries().count(), 4);
    assert_eq!(editor.dimensions_label(), "1200 × 1200");
    let size = editor.canvas().size.unwrap();
    assert_eq!((size.style_width, size.style_height), (600.0, 600.0));
    // Template 5 does not exist for posts.
    assert!(matches!(
        editor.select_template(5),
        Err(Error::UnknownTemplate { id: 5, .. })
    ));
}

#[test]
fn same_mode_does_not_repaint() {
    let mut editor = Editor::new(RecordingCanvas::new()).unwrap();
    let before = editor.render_count();
    editor.set_mode(Mode::Banner).unwrap();
    assert_eq!(editor.render_count(), before);
    editor.set_alignment(Alignment::Right).unwrap();
    assert_eq!(editor.render_count(), before + 1);
}

#[test]
fn minimal_template_flips_text_to_dark() {
    let mut editor = Editor::new(RecordingCanvas::new()).unwrap();
    editor.select_template(6).unwrap();
    let colors: Vec<Rgba> = last(&editor)
        .texts()
        .filter_map(|c| match c {
            PaintCommand::Text { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(colors[0].to_string(), "#1f2937");
    assert_eq!(colors[1].to_string(), "#6b7280");

    // Any other start colour keeps white text, however pale.
    let pale = Theme::parse_pair("#fefefe,#ffffff").unwrap();
    editor.set_theme(pale).unwrap();
    let first = last(&editor).texts().next().cloned();
    assert!(matches!(first, Some(PaintCommand::Text { color, .. }) if color == Rgba::WHITE));
}

#[test]
fn nudges_accumulate_and_reset() {
    let mut editor = Editor::new(RecordingCanvas::new()).unwrap();
    for d in [Direction::Up, Direction::Up, Direction::Left] {
        editor.nudge(d).unwrap();
    }
    assert_eq!((editor.state().offset_x, editor.state().offset_y), (-10, -20));
    assert_eq!(texts(last(&editor))[0].1, 782.0);
    editor.nudge(Direction::Reset).unwrap();
    assert_eq!((editor.state().offset_x, editor.state().offset_y), (0, 0));
}

#[test]
fn slider_events_are_clamped() {
    let mut editor = Editor::new(RecordingCanvas::new()).unwrap();
    editor
        .dispatch(UiEvent::FontSizeSlider(TextField::Headline, 500))
        .unwrap();
    editor
        .dispatch(UiEvent::FontSizeSlider(TextField::Subtext, -3))
        .unwrap();
    assert_eq!(editor.state().headline_size, 72);
    assert_eq!(editor.state().subtext_size, 12);

    // Direct setters are not clamped.
    editor.set_font_size(TextField::Headline, 200).unwrap();
    assert_eq!(texts(last(&editor))[0].3, 200);
}

#[test]
fn every_mutation_paints_once() {
    let mut editor = Editor::new(RecordingCanvas::new()).unwrap();
    let events = vec![
        UiEvent::TemplateClicked(2),
        UiEvent::TextInput(TextField::Headline, String::new()),
        UiEvent::FontFamilyChanged("Georgia, serif".into()),
        UiEvent::AlignButton(Alignment::Left),
        UiEvent::PositionButton(Direction::Down),
    ];
    let n = events.len() as u64;
    for e in events {
        editor.dispatch(e).unwrap();
    }
    assert_eq!(editor.render_count(), 1 + n);
    assert_eq!(editor.canvas().paints as u64, 1 + n);

    let head = last(&editor).texts().next().unwrap();
    assert_eq!(head.css_font().unwrap(), "bold 36px Georgia, serif");
    assert!(matches!(head, PaintCommand::Text { text, x, .. } if text.is_empty() && *x == 100.0));
}
