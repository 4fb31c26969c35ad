/// Paint command set produced by the renderer and consumed by canvases

use crate::color::Rgba;
use crate::design::Alignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A single drawing instruction, in surface pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Reset the region to transparent black
    Clear { width: u32, height: u32 },
    /// Fill the region with a two-stop linear gradient from `start` to `end`
    LinearGradient {
        width: u32,
        height: u32,
        start: (f32, f32),
        end: (f32, f32),
        stops: [Rgba; 2],
    },
    /// Fill a single line of text anchored on its alphabetic baseline
    Text {
        text: String,
        x: f32,
        y: f32,
        size: u32,
        weight: FontWeight,
        family: String,
        align: Alignment,
        color: Rgba,
    },
    StrokeLine {
        from: (f32, f32),
        to: (f32, f32),
        line_width: f32,
        color: Rgba,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Rgba,
    },
}

impl PaintCommand {
    /// CSS shorthand for a text command, e.g. `bold 36px 'Segoe UI', sans-serif`.
    pub fn css_font(&self) -> Option<String> {
        match self {
            PaintCommand::Text {
                size,
                weight,
                family,
                ..
            } => Some(match weight {
                FontWeight::Bold => format!("bold {}px {}", size, family),
                FontWeight::Regular => format!("{}px {}", size, family),
            }),
            _ => None,
        }
    }
}

/// Ordered paint commands for one full repaint of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, cmd: PaintCommand) {
        self.commands.push(cmd);
    }

    /// Text commands in paint order (headline first).
    pub fn texts(&self) -> impl Iterator<Item = &PaintCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::Text { .. }))
    }
}
