//! Appearance and camera components

use crate::foundation::math::Vec2;

/// Image drawn at the entity position
///
/// An entity may hold several sprites; the first is its primary appearance
/// and later ones are extra layers drawn on top.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Image path understood by the graphics adapter
    pub path: String,

    /// Offset from the entity position
    pub offset: Vec2,

    /// Uniform scale
    pub scale: f32,
}

impl SpriteComponent {
    /// Sprite at the entity position with unit scale
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            offset: Vec2::zeros(),
            scale: 1.0,
        }
    }

    /// Set scale (builder)
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set offset (builder)
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }
}

/// Viewpoint the renderer draws relative to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraComponent {
    /// World position at the centre of the view
    pub position: Vec2,

    /// Zoom height
    pub height: f32,
}

impl CameraComponent {
    /// Camera at `position`
    pub fn new(position: Vec2, height: f32) -> Self {
        Self { position, height }
    }
}

/// Marks the entity cameras follow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraFollowComponent;
