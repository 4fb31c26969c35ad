//! Design state: the editing session and its pure state transitions.
//!
//! Nothing in here touches a drawing surface. The `Editor` binds these
//! transitions to input events and repaints after each one.

pub mod templates;

pub use templates::{templates_for, Template, TemplatePicker};

use crate::color::Rgba;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Pixels moved per directional nudge.
pub const NUDGE_STEP: i32 = 10;

/// Output format being designed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Profile cover banner, 1584×396
    Banner,
    /// Square feed post, 1200×1200
    Post,
}

/// Bitmap size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Mode {
    /// Slug used in filenames and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Banner => "cover",
            Mode::Post => "post",
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        match self {
            Mode::Banner => Dimensions {
                width: 1584,
                height: 396,
            },
            Mode::Post => Dimensions {
                width: 1200,
                height: 1200,
            },
        }
    }

    /// Scale applied to the on-screen preview only, never to the bitmap.
    pub fn display_scale(&self) -> f32 {
        match self {
            Mode::Banner => 1.0,
            Mode::Post => 0.5,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "banner" | "cover" => Ok(Mode::Banner),
            "post" => Ok(Mode::Post),
            other => Err(Error::Validation(format!("Unknown mode: {}", other))),
        }
    }
}

/// Horizontal text alignment, with canvas `textAlign` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" | "centre" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(Error::Validation(format!("Unknown alignment: {}", other))),
        }
    }
}

/// Position-pad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Reset,
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "reset" => Ok(Direction::Reset),
            other => Err(Error::Validation(format!("Unknown direction: {}", other))),
        }
    }
}

/// Which of the two text lines an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Headline,
    Subtext,
}

/// Background gradient colours, start then end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub colors: [Rgba; 2],
}

impl Theme {
    pub fn new(start: Rgba, end: Rgba) -> Self {
        Self {
            colors: [start, end],
        }
    }

    pub fn primary(&self) -> Rgba {
        self.colors[0]
    }

    pub fn secondary(&self) -> Rgba {
        self.colors[1]
    }

    /// Parse `"#start,#end"`.
    pub fn parse_pair(s: &str) -> Result<Self> {
        let mut parts = s.splitn(2, ',');
        match (parts.next(), parts.next()) {
            (Some(a), Some(b)) => Ok(Self::new(a.parse()?, b.parse()?)),
            _ => Err(Error::Validation(format!(
                "Theme needs two comma-separated colours, got: {}",
                s
            ))),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: templates::BANNER_TEMPLATES[0].gradient,
        }
    }
}

/// The single mutable record describing the current design.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignState {
    pub mode: Mode,
    pub template_id: u32,
    pub theme: Theme,
    pub headline: String,
    pub subtext: String,
    pub headline_size: u32,
    pub subtext_size: u32,
    pub font_family: String,
    pub alignment: Alignment,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Default for DesignState {
    fn default() -> Self {
        Self {
            mode: Mode::Banner,
            template_id: 1,
            theme: Theme::default(),
            headline: "Professional LinkedIn Designer".to_string(),
            subtext: "Creating Impact Through Design".to_string(),
            headline_size: 36,
            subtext_size: 18,
            font_family: "'Segoe UI', sans-serif".to_string(),
            alignment: Alignment::Center,
            offset_x: 0,
            offset_y: 0,
        }
    }
}

impl DesignState {
    pub fn dimensions(&self) -> Dimensions {
        self.mode.dimensions()
    }

    /// Switch mode. Returns `false` without touching anything when `mode` is
    /// already active; otherwise resets the template and both offsets.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.template_id = 1;
        self.offset_x = 0;
        self.offset_y = 0;
        true
    }

    /// Select a template of the active mode and adopt its gradient.
    pub fn select_template(&mut self, id: u32) -> Result<&'static Template> {
        let template =
            templates::find_template(self.mode, id).ok_or_else(|| Error::UnknownTemplate {
                id,
                mode: self.mode.to_string(),
            })?;
        self.template_id = template.id;
        self.theme.colors = template.gradient;
        Ok(template)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::Headline => self.headline = value,
            TextField::Subtext => self.subtext = value,
        }
    }

    pub fn set_font_size(&mut self, field: TextField, px: u32) {
        match field {
            TextField::Headline => self.headline_size = px,
            TextField::Subtext => self.subtext_size = px,
        }
    }

    pub fn set_font_family(&mut self, stack: impl Into<String>) {
        self.font_family = stack.into();
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }

    pub fn nudge(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.offset_y -= NUDGE_STEP,
            Direction::Down => self.offset_y += NUDGE_STEP,
            Direction::Left => self.offset_x -= NUDGE_STEP,
            Direction::Right => self.offset_x += NUDGE_STEP,
            Direction::Reset => {
                self.offset_x = 0;
                self.offset_y = 0;
            }
        }
    }
}
