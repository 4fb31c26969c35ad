//! Glyph coverage for text commands, backed by fontdue

use crate::design::Alignment;
use crate::rendering::FontWeight;
use crate::{Error, Result};
use std::path::Path;

/// A loaded font face used for every text command.
///
/// The design state only carries a CSS font stack, which has no meaning
/// outside a browser, so one face is configured up front and bold is
/// synthesised by doubling each glyph one pixel to the right.
pub struct FontFace {
    font: fontdue::Font,
}

impl FontFace {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| Error::Config(format!("Unable to parse font: {}", e)))?;
        Ok(Self { font })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        log::debug!("loaded font {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes)
    }

    /// Advance width of `text` at `px`.
    pub fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars()
            .map(|c| self.font.metrics(c, px).advance_width)
            .sum()
    }

    /// Accumulate the coverage of `text` into an 8-bit mask of
    /// `mask_width × mask_height`, positioned like canvas `fillText`.
    #[allow(clippy::too_many_arguments)]
    pub fn coverage(
        &self,
        text: &str,
        px: f32,
        weight: FontWeight,
        align: Alignment,
        x: f32,
        baseline: f32,
        mask: &mut [u8],
        mask_width: u32,
        mask_height: u32,
    ) {
        let width = self.measure(text, px);
        let mut pen_x = match align {
            Alignment::Left => x,
            Alignment::Center => x - width / 2.0,
            Alignment::Right => x - width,
        };
        let passes: &[i32] = match weight {
            FontWeight::Regular => &[0],
            FontWeight::Bold => &[0, 1],
        };

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, px);
            let left = pen_x.round() as i32 + metrics.xmin;
            let top = baseline.round() as i32 - metrics.ymin - metrics.height as i32;
            for row in 0..metrics.height {
                let y = top + row as i32;
                if y < 0 || y >= mask_height as i32 {
                    continue;
                }
                for col in 0..metrics.width {
                    let cov = bitmap[row * metrics.width + col];
                    if cov == 0 {
                        continue;
                    }
                    for dx in passes {
                        let x = left + col as i32 + dx;
                        if x < 0 || x >= mask_width as i32 {
                            continue;
                        }
                        let idx = y as usize * mask_width as usize + x as usize;
                        mask[idx] = mask[idx].max(cov);
                    }
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}
