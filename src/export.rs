//! Export of a rendered frame to PNG or JPEG.

use crate::design::Mode;
use crate::notify::Notification;
use crate::rendering::raster::Frame;
use crate::{Error, Result};
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const JPEG_QUALITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// Upper-case name used in the download notification.
    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(Error::Validation(format!("Unknown export format: {}", other))),
        }
    }
}

/// Encode `frame` at its intrinsic size. JPEG drops alpha.
pub fn encode(frame: &Frame, format: ImageFormat) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        ImageFormat::Png => PngEncoder::new(&mut out)
            .write_image(&frame.rgba, frame.width, frame.height, ColorType::Rgba8)
            .map_err(|e| Error::Export(format!("PNG encode failed: {}", e)))?,
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
            .encode(&frame.to_rgb(), frame.width, frame.height, ColorType::Rgb8)
            .map_err(|e| Error::Export(format!("JPEG encode failed: {}", e)))?,
    }
    Ok(out)
}

/// `linkedin-<mode>-<millis>.<ext>`
pub fn filename(mode: Mode, unix_millis: i64, format: ImageFormat) -> String {
    format!(
        "linkedin-{}-{}.{}",
        mode.as_str(),
        unix_millis,
        format.extension()
    )
}

pub fn unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// `data:image/<png|jpeg>;base64,...`
pub fn data_url(frame: &Frame, format: ImageFormat) -> Result<String> {
    let bytes = encode(frame, format)?;
    Ok(format!(
        "data:{};base64,{}",
        format.mime(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

/// Write the frame into `dir` under a timestamped name.
pub fn save(
    frame: &Frame,
    format: ImageFormat,
    mode: Mode,
    dir: &Path,
) -> Result<(PathBuf, Notification)> {
    let bytes = encode(frame, format)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename(mode, unix_millis(), format));
    std::fs::write(&path, &bytes)?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    let note = Notification::success(format!("Design downloaded as {}!", format.label()));
    Ok((path, note))
}
