//! Graphics adapter boundary
//!
//! The engine never draws anything itself. A [`GraphicsAdapter`] is handed to
//! the rendering system, which feeds it sprite paths and screen positions
//! once per frame.

mod headless;

pub use headless::{DrawCall, HeadlessAdapter};

use thiserror::Error;

/// Result type for adapter operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors reported by a graphics adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Image could not be loaded
    #[error("Failed to load image {path}: {reason}")]
    LoadFailed {
        /// Image path
        path: String,
        /// Backend specific reason
        reason: String,
    },

    /// Image was used before being loaded
    #[error("Image not loaded: {0}")]
    NotLoaded(String),
}

/// Backend that turns image paths into pixels
pub trait GraphicsAdapter {
    /// Load an image so it can be rendered
    fn load_image(&mut self, path: &str) -> RenderResult<()>;

    /// Whether the image is already loaded
    fn is_loaded(&self, path: &str) -> bool;

    /// Draw a loaded image with its centre at screen position (`x`, `y`)
    fn render_image(&mut self, path: &str, x: f32, y: f32) -> RenderResult<()>;

    /// Set the scale used for subsequent draws of the image
    fn set_image_scale(&mut self, path: &str, scale: f32);
}
