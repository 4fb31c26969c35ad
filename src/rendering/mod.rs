//! Rendering: design state to display list, display list to pixels.
//!
//! [`render`] is a pure function of a [`DesignState`]; calling it twice with
//! the same state yields the same [`DisplayList`]. A [`Canvas`] backend turns
//! the list into pixels, repainting from scratch each time.

pub mod paint;
#[cfg(feature = "raster")]
pub mod raster;
#[cfg(feature = "raster")]
pub mod text;

pub use paint::{DisplayList, FontWeight, PaintCommand};

use crate::color::Rgba;
use crate::design::{Alignment, DesignState, Mode, Theme};
use crate::Result;

/// Inset of the left/right alignment anchors from the surface edge.
pub const ALIGN_INSET: f32 = 100.0;
/// Headline baseline sits this far above the vertical anchor.
pub const HEADLINE_RISE: f32 = 20.0;

/// Bitmap size plus the on-screen size after the mode's display scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub style_width: f32,
    pub style_height: f32,
}

impl SurfaceSize {
    pub fn for_mode(mode: Mode) -> Self {
        let dim = mode.dimensions();
        let scale = mode.display_scale();
        Self {
            width: dim.width,
            height: dim.height,
            style_width: dim.width as f32 * scale,
            style_height: dim.height as f32 * scale,
        }
    }

    /// `"1584 × 396"`
    pub fn label(&self) -> String {
        format!("{} × {}", self.width, self.height)
    }
}

/// A drawing surface that can be resized and repainted.
pub trait Canvas {
    /// Reallocate the surface for a new bitmap size.
    fn resize(&mut self, size: SurfaceSize) -> Result<()>;

    /// Repaint the whole surface from `list`.
    fn paint(&mut self, list: &DisplayList) -> Result<()>;
}

/// Foreground colours derived from the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub headline: Rgba,
    pub subtext: Rgba,
    pub accent: Rgba,
}

/// Pick text and decoration colours for `theme`.
///
/// Only a pure white gradient start counts as a light background; every
/// other start colour gets white text, however light it is.
pub fn palette(theme: &Theme, mode: Mode) -> Palette {
    if theme.primary() == Rgba::WHITE {
        Palette {
            headline: Rgba::rgb(0x1f, 0x29, 0x37),
            subtext: Rgba::rgb(0x6b, 0x72, 0x80),
            accent: Rgba::with_alpha(0, 0, 0, 0.1),
        }
    } else {
        let accent_alpha = match mode {
            Mode::Banner => 0.2,
            Mode::Post => 0.3,
        };
        Palette {
            headline: Rgba::WHITE,
            subtext: Rgba::with_alpha(255, 255, 255, 0.9),
            accent: Rgba::with_alpha(255, 255, 255, accent_alpha),
        }
    }
}

/// Text anchor point for the current alignment and offsets.
pub fn anchor(state: &DesignState) -> (f32, f32) {
    let dim = state.dimensions();
    let (w, h) = (dim.width as f32, dim.height as f32);
    let offset_x = state.offset_x as f32;
    let x = match state.alignment {
        Alignment::Left => ALIGN_INSET + offset_x,
        Alignment::Center => w / 2.0 + offset_x,
        Alignment::Right => w - ALIGN_INSET + offset_x,
    };
    let y = h / 2.0 + state.offset_y as f32;
    (x, y)
}

/// Build the full display list for `state`.
pub fn render(state: &DesignState) -> DisplayList {
    let dim = state.dimensions();
    let (w, h) = (dim.width as f32, dim.height as f32);
    let mut list = DisplayList::new(dim.width, dim.height);

    list.push(PaintCommand::Clear {
        width: dim.width,
        height: dim.height,
    });
    list.push(PaintCommand::LinearGradient {
        width: dim.width,
        height: dim.height,
        start: (0.0, 0.0),
        end: (w, h),
        stops: state.theme.colors,
    });

    let colors = palette(&state.theme, state.mode);
    let (x, y) = anchor(state);

    list.push(PaintCommand::Text {
        text: state.headline.clone(),
        x,
        y: y - HEADLINE_RISE,
        size: state.headline_size,
        weight: FontWeight::Bold,
        family: state.font_family.clone(),
        align: state.alignment,
        color: colors.headline,
    });
    // Gap below the anchor follows the headline size.
    list.push(PaintCommand::Text {
        text: state.subtext.clone(),
        x,
        y: y + state.headline_size as f32,
        size: state.subtext_size,
        weight: FontWeight::Regular,
        family: state.font_family.clone(),
        align: state.alignment,
        color: colors.subtext,
    });

    match state.mode {
        Mode::Banner => {
            list.push(PaintCommand::StrokeLine {
                from: (50.0, 50.0),
                to: (150.0, 50.0),
                line_width: 2.0,
                color: colors.accent,
            });
            list.push(PaintCommand::StrokeLine {
                from: (w - 150.0, h - 50.0),
                to: (w - 50.0, h - 50.0),
                line_width: 2.0,
                color: colors.accent,
            });
        }
        Mode::Post => list.push(PaintCommand::StrokeRect {
            x: 30.0,
            y: 30.0,
            width: w - 60.0,
            height: h - 60.0,
            line_width: 3.0,
            color: colors.accent,
        }),
    }

    list
}

/// Canvas that only remembers what it was asked to paint.
///
/// Useful for driving an [`Editor`](crate::editor::Editor) without a pixel
/// buffer, e.g. in tests or when the `raster` feature is off.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub size: Option<SurfaceSize>,
    pub last: Option<DisplayList>,
    pub paints: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    fn resize(&mut self, size: SurfaceSize) -> Result<()> {
        self.size = Some(size);
        Ok(())
    }

    fn paint(&mut self, list: &DisplayList) -> Result<()> {
        self.last = Some(list.clone());
        self.paints += 1;
        Ok(())
    }
}
