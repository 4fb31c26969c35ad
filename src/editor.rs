//! The editor: design state bound to a drawing surface.
//!
//! `Editor` is the context object handed to input handlers. Every public
//! mutation applies a pure transition on [`DesignState`] and then repaints the
//! canvas before returning; there is no batching or deferred rendering.

use crate::design::{
    Alignment, DesignState, Direction, Mode, Template, TemplatePicker, TextField, Theme,
};
use crate::rendering::{self, Canvas, SurfaceSize};
use crate::{Error, Result};
use std::ops::RangeInclusive;

/// Range of the headline size slider, in px.
pub const HEADLINE_SIZE_RANGE: RangeInclusive<u32> = 20..=72;
/// Range of the subtext size slider, in px.
pub const SUBTEXT_SIZE_RANGE: RangeInclusive<u32> = 12..=36;

/// Input events coming from the editor controls.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ModeButton(Mode),
    TemplateClicked(u32),
    ThemeButton(Theme),
    TextInput(TextField, String),
    /// Raw slider value; clamped to the slider range before it reaches the state
    FontSizeSlider(TextField, i64),
    FontFamilyChanged(String),
    AlignButton(Alignment),
    PositionButton(Direction),
}

fn clamp_to(range: &RangeInclusive<u32>, value: i64) -> u32 {
    value.clamp(*range.start() as i64, *range.end() as i64) as u32
}

pub struct Editor<C: Canvas> {
    state: DesignState,
    picker: TemplatePicker,
    surface: SurfaceSize,
    canvas: C,
    renders: u64,
}

impl<C: Canvas> Editor<C> {
    /// Editor with the default design, sized and painted once.
    pub fn new(canvas: C) -> Result<Self> {
        Self::with_state(DesignState::default(), canvas)
    }

    pub fn with_state(state: DesignState, canvas: C) -> Result<Self> {
        if crate::design::templates::find_template(state.mode, state.template_id).is_none() {
            return Err(Error::UnknownTemplate {
                id: state.template_id,
                mode: state.mode.to_string(),
            });
        }
        let mut picker = TemplatePicker::new(state.mode);
        picker.activate(state.template_id);
        let mut editor = Self {
            surface: SurfaceSize::for_mode(state.mode),
            state,
            picker,
            canvas,
            renders: 0,
        };
        editor.canvas.resize(editor.surface)?;
        editor.render()?;
        Ok(editor)
    }

    pub fn state(&self) -> &DesignState {
        &self.state
    }

    pub fn picker(&self) -> &TemplatePicker {
        &self.picker
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Number of repaints since construction.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// `"1584 × 396"` for the active surface.
    pub fn dimensions_label(&self) -> String {
        self.surface.label()
    }

    /// Repaint the surface from the current state.
    pub fn render(&mut self) -> Result<()> {
        let list = rendering::render(&self.state);
        self.canvas.paint(&list)?;
        self.renders += 1;
        Ok(())
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<()> {
        if !self.state.set_mode(mode) {
            return Ok(());
        }
        log::debug!("mode -> {}", mode);
        self.picker.reload(mode);
        self.surface = SurfaceSize::for_mode(mode);
        self.canvas.resize(self.surface)?;
        self.render()
    }

    pub fn select_template(&mut self, id: u32) -> Result<&'static Template> {
        let template = self.state.select_template(id)?;
        self.picker.activate(template.id);
        log::debug!("template -> {} ({})", template.id, template.name);
        self.render()?;
        Ok(template)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.state.set_theme(theme);
        self.render()
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> Result<()> {
        self.state.set_text(field, value);
        self.render()
    }

    /// Set a font size verbatim; callers clamp to the slider range.
    pub fn set_font_size(&mut self, field: TextField, px: u32) -> Result<()> {
        self.state.set_font_size(field, px);
        self.render()
    }

    pub fn set_font_family(&mut self, stack: impl Into<String>) -> Result<()> {
        self.state.set_font_family(stack);
        self.render()
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> Result<()> {
        self.state.set_alignment(alignment);
        self.render()
    }

    pub fn nudge(&mut self, direction: Direction) -> Result<()> {
        self.state.nudge(direction);
        self.render()
    }

    /// Route a control event to the matching operation.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::ModeButton(mode) => self.set_mode(mode),
            UiEvent::TemplateClicked(id) => self.select_template(id).map(|_| ()),
            UiEvent::ThemeButton(theme) => self.set_theme(theme),
            UiEvent::TextInput(field, value) => self.set_text(field, value),
            UiEvent::FontSizeSlider(field, raw) => {
                let range = match field {
                    TextField::Headline => HEADLINE_SIZE_RANGE,
                    TextField::Subtext => SUBTEXT_SIZE_RANGE,
                };
                self.set_font_size(field, clamp_to(&range, raw))
            }
            UiEvent::FontFamilyChanged(stack) => self.set_font_family(stack),
            UiEvent::AlignButton(align) => self.set_alignment(align),
            UiEvent::PositionButton(direction) => self.nudge(direction),
        }
    }
}
