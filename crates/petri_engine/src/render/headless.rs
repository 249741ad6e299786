//! Adapter that records draw calls instead of drawing

use super::{GraphicsAdapter, RenderError, RenderResult};
use std::collections::HashMap;

/// One recorded `render_image` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Image path
    pub path: String,
    /// Screen x
    pub x: f32,
    /// Screen y
    pub y: f32,
    /// Scale in effect for the image at draw time
    pub scale: f32,
}

/// Graphics adapter with no window, used for headless runs and tests
///
/// Every call is recorded. Paths listed with [`fail_on`](Self::fail_on) fail
/// to load.
#[derive(Debug, Default)]
pub struct HeadlessAdapter {
    scales: HashMap<String, f32>,
    failing: Vec<String>,
    draw_calls: Vec<DrawCall>,
    load_count: usize,
}

impl HeadlessAdapter {
    /// Create an adapter with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loading `path` fail (builder)
    pub fn fail_on(mut self, path: impl Into<String>) -> Self {
        self.failing.push(path.into());
        self
    }

    /// Draw calls recorded since the last [`take_draw_calls`](Self::take_draw_calls)
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.draw_calls
    }

    /// Drain the recorded draw calls
    pub fn take_draw_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draw_calls)
    }

    /// Number of successful loads
    pub fn load_count(&self) -> usize {
        self.load_count
    }
}

impl GraphicsAdapter for HeadlessAdapter {
    fn load_image(&mut self, path: &str) -> RenderResult<()> {
        if self.failing.iter().any(|failing| failing == path) {
            return Err(RenderError::LoadFailed {
                path: path.to_string(),
                reason: "marked as failing".to_string(),
            });
        }
        log::debug!("Loaded image {}", path);
        self.scales.entry(path.to_string()).or_insert(1.0);
        self.load_count += 1;
        Ok(())
    }

    fn is_loaded(&self, path: &str) -> bool {
        self.scales.contains_key(path)
    }

    fn render_image(&mut self, path: &str, x: f32, y: f32) -> RenderResult<()> {
        let scale = *self
            .scales
            .get(path)
            .ok_or_else(|| RenderError::NotLoaded(path.to_string()))?;
        self.draw_calls.push(DrawCall {
            path: path.to_string(),
            x,
            y,
            scale,
        });
        Ok(())
    }

    fn set_image_scale(&mut self, path: &str, scale: f32) {
        if let Some(current) = self.scales.get_mut(path) {
            *current = scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_requires_load() {
        let mut adapter = HeadlessAdapter::new();
        assert_eq!(
            adapter.render_image("cell.png", 0.0, 0.0),
            Err(RenderError::NotLoaded("cell.png".to_string()))
        );
        adapter.load_image("cell.png").unwrap();
        adapter.set_image_scale("cell.png", 2.0);
        adapter.render_image("cell.png", 1.0, 2.0).unwrap();
        assert_eq!(adapter.draw_calls()[0].scale, 2.0);
    }

    #[test]
    fn test_failing_path() {
        let mut adapter = HeadlessAdapter::new().fail_on("broken.png");
        assert!(matches!(adapter.load_image("broken.png"), Err(RenderError::LoadFailed { .. })));
        assert!(!adapter.is_loaded("broken.png"));
    }
}
