//! LinkedIn Designer
//!
//! A headless editor for LinkedIn cover banners and feed posts: a small
//! design state store, a deterministic renderer, PNG/JPEG export and the
//! approval-gated account flow that guards the editor.
//!
//! # Features
//!
//! - **Pure state transitions**: [`DesignState`] never touches a surface
//! - **Render on every mutation**: [`Editor`] repaints its [`Canvas`] before returning
//! - **Raster backend** (`raster`, default): tiny-skia pixmap, fontdue glyphs, PNG/JPEG export
//! - **REST glue**: blocking [`ApiClient`] plus an async [`AsyncClient`] facade
//!
//! # Example
//!
//! ```
//! use linkedin_designer::rendering::{PaintCommand, RecordingCanvas};
//! use linkedin_designer::{Editor, Mode, TextField};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = Editor::new(RecordingCanvas::new())?;
//! editor.set_mode(Mode::Post)?;
//! editor.set_text(TextField::Headline, "Hiring!")?;
//!
//! let list = editor.canvas().last.as_ref().unwrap();
//! assert_eq!((list.width, list.height), (1200, 1200));
//! assert!(list
//!     .commands
//!     .iter()
//!     .any(|c| matches!(c, PaintCommand::Text { text, .. } if text == "Hiring!")));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod color;
pub mod config;
pub mod design;
pub mod editor;
pub mod notify;
pub mod rendering;
pub mod session;

// REST client and the flows built on it
pub mod api;
pub mod auth;

// Async-friendly API client (worker-thread backed)
pub mod async_api;

#[cfg(feature = "raster")]
pub mod export;

pub use api::{ApiClient, AuthApi};
pub use async_api::AsyncClient;
pub use color::Rgba;
pub use config::DesignerConfig;
pub use design::{Alignment, DesignState, Direction, Mode, TextField, Theme};
pub use editor::{Editor, UiEvent};
pub use notify::{Effects, Notification, Notifier};
pub use rendering::{render, Canvas, DisplayList};
pub use session::{FileStorage, MemoryStorage, Storage};
