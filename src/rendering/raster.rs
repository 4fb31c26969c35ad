//! Raster canvas: paints display lists into a tiny-skia pixmap

use crate::color::Rgba;
use crate::rendering::text::FontFace;
use crate::rendering::{Canvas, DisplayList, PaintCommand, SurfaceSize};
use crate::{Error, Result};
use sha2::{Digest, Sha256};
use tiny_skia::{
    BlendMode, Color, GradientStop, LinearGradient, Mask, Paint, PathBuilder, Pixmap, Point, Rect,
    SpreadMode, Stroke, Transform,
};

/// A painted surface as straight-alpha RGBA8 rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Frame {
    /// SHA-256 of the pixel data, hex encoded.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.rgba))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let p = &self.rgba[i..i + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    /// RGB8 copy with alpha dropped, for encoders without an alpha channel.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect()
    }
}

fn skia_color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn solid(c: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(c));
    paint.anti_alias = true;
    paint
}

/// Pixmap-backed [`Canvas`].
pub struct RasterCanvas {
    pixmap: Pixmap,
    font: Option<FontFace>,
    warned_no_font: bool,
}

impl RasterCanvas {
    pub fn new(size: SurfaceSize, font: Option<FontFace>) -> Result<Self> {
        Ok(Self {
            pixmap: allocate(size.width, size.height)?,
            font,
            warned_no_font: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Snapshot of the current pixels.
    pub fn frame(&self) -> Frame {
        let rgba = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Frame {
            width: self.pixmap.width(),
            height: self.pixmap.height(),
            rgba,
        }
    }

    fn fill_gradient(
        &mut self,
        width: u32,
        height: u32,
        start: (f32, f32),
        end: (f32, f32),
        stops: [Rgba; 2],
    ) {
        let Some(rect) = Rect::from_xywh(0.0, 0.0, width as f32, height as f32) else {
            return;
        };
        let shader = LinearGradient::new(
            Point::from_xy(start.0, start.1),
            Point::from_xy(end.0, end.1),
            vec![
                GradientStop::new(0.0, skia_color(stops[0])),
                GradientStop::new(1.0, skia_color(stops[1])),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        );
        let mut paint = Paint::default();
        match shader {
            Some(shader) => paint.shader = shader,
            // Degenerate gradient (start == end): canvas paints the last stop.
            None => paint.set_color(skia_color(stops[1])),
        }
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn stroke(&mut self, builder: PathBuilder, line_width: f32, color: Rgba) {
        if let Some(path) = builder.finish() {
            let stroke = Stroke {
                width: line_width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
        }
    }

    fn fill_text(&mut self, cmd: &PaintCommand) {
        let PaintCommand::Text {
            text,
            x,
            y,
            size,
            weight,
            align,
            color,
            ..
        } = cmd
        else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let Some(font) = &self.font else {
            if !self.warned_no_font {
                log::warn!("no font configured; text commands are not rasterized");
                self.warned_no_font = true;
            }
            return;
        };
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let Some(mut mask) = Mask::new(w, h) else {
            return;
        };
        font.coverage(
            text,
            *size as f32,
            *weight,
            *align,
            *x,
            *y,
            mask.data_mut(),
            w,
            h,
        );
        if let Some(rect) = Rect::from_xywh(0.0, 0.0, w as f32, h as f32) {
            self.pixmap
                .fill_rect(rect, &solid(*color), Transform::identity(), Some(&mask));
        }
    }
}

fn allocate(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("cannot allocate {}x{} surface", width, height)))
}

impl Canvas for RasterCanvas {
    fn resize(&mut self, size: SurfaceSize) -> Result<()> {
        if size.width != self.pixmap.width() || size.height != self.pixmap.height() {
            self.pixmap = allocate(size.width, size.height)?;
            log::debug!("surface resized to {}", size.label());
        }
        Ok(())
    }

    fn paint(&mut self, list: &DisplayList) -> Result<()> {
        for cmd in &list.commands {
            match cmd {
                PaintCommand::Clear { width, height } => {
                    if let Some(rect) = Rect::from_xywh(0.0, 0.0, *width as f32, *height as f32) {
                        let mut paint = Paint::default();
                        paint.blend_mode = BlendMode::Clear;
                        self.pixmap
                            .fill_rect(rect, &paint, Transform::identity(), None);
                    }
                }
                PaintCommand::LinearGradient {
                    width,
                    height,
                    start,
                    end,
                    stops,
                } => self.fill_gradient(*width, *height, *start, *end, *stops),
                PaintCommand::Text { .. } => self.fill_text(cmd),
                PaintCommand::StrokeLine {
                    from,
                    to,
                    line_width,
                    color,
                } => {
                    let mut pb = PathBuilder::new();
                    pb.move_to(from.0, from.1);
                    pb.line_to(to.0, to.1);
                    self.stroke(pb, *line_width, *color);
                }
                PaintCommand::StrokeRect {
                    x,
                    y,
                    width,
                    height,
                    line_width,
                    color,
                } => {
                    let mut pb = PathBuilder::new();
                    if let Some(rect) = Rect::from_xywh(*x, *y, *width, *height) {
                        pb.push_rect(rect);
                    }
                    self.stroke(pb, *line_width, *color);
                }
            }
        }
        Ok(())
    }
}

/// One-shot helper: paint `list` onto a fresh surface of its own size.
pub fn rasterize(list: &DisplayList, font: Option<FontFace>) -> Result<Frame> {
    let size = SurfaceSize {
        width: list.width,
        height: list.height,
        style_width: list.width as f32,
        style_height: list.height as f32,
    };
    let mut canvas = RasterCanvas::new(size, font)?;
    canvas.paint(list)?;
    Ok(canvas.frame())
}
