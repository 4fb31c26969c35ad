//! Runtime configuration
//!
//! Defaults are chosen so the CLI works against a locally running backend
//! without any flags. Every field can be overridden from the command line
//! or the environment (see `main.rs`).

use crate::{Error, Result};
use std::path::PathBuf;
use url::Url;

/// Configuration shared by the API client, the storage layer and exports.
///
/// # Examples
///
/// ```
/// let cfg = linkedin_designer::DesignerConfig::default();
/// assert!(cfg.api_base.starts_with("http://"));
/// assert!(cfg.font_path.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct DesignerConfig {
    /// Origin of the REST API (the page origin in the browser build)
    pub api_base: String,
    /// JSON file holding the client-side keys (token, user info, ...)
    pub storage_path: PathBuf,
    /// TrueType/OpenType font used to rasterize text; text is skipped without one
    pub font_path: Option<PathBuf>,
    /// Directory exported images are written to
    pub output_dir: PathBuf,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:3000".to_string(),
            storage_path: PathBuf::from(".linkedin-designer/storage.json"),
            font_path: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl DesignerConfig {
    /// Parsed API origin.
    pub fn api_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_base)
            .map_err(|e| Error::Config(format!("api_base {:?}: {}", self.api_base, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "api_base must be http(s), got {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    pub fn validate(&self) -> Result<()> {
        self.api_url()?;
        if let Some(font) = &self.font_path {
            if !font.is_file() {
                return Err(Error::Config(format!(
                    "font file {} does not exist",
                    font.display()
                )));
            }
        }
        Ok(())
    }
}
